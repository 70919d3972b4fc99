//! Execution context: an opaque key-value store threaded through a run
//!
//! Visitors receive `&mut dyn ExecutionContext` so cross-cutting data (styles,
//! charsets, flags) can reach them without widening every visit signature.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// When `true`, a source unit whose printed form differs from its input is rejected
pub const REQUIRE_PRINT_EQUALS_INPUT: &str = "reweave.requirePrintEqualsInput";

/// Charset the run should print with
pub const CHARSET: &str = "reweave.charset";

type Message = Arc<dyn Any + Send + Sync>;

/// Key-value storage for a transformation run
pub trait ExecutionContext: Send {
    fn get_raw(&self, key: &str) -> Option<Message>;

    fn put_raw(&mut self, key: &str, value: Message);

    fn remove(&mut self, key: &str);
}

impl dyn ExecutionContext + '_ {
    /// A stored message of type `M`, or `default` when absent or of another type
    pub fn get_message<M: Any + Clone>(&self, key: &str, default: M) -> M {
        self.get_raw(key)
            .and_then(|m| m.downcast_ref::<M>().cloned())
            .unwrap_or(default)
    }

    pub fn put_message<M: Any + Send + Sync>(&mut self, key: &str, value: M) {
        self.put_raw(key, Arc::new(value));
    }
}

/// An [`ExecutionContext`] backed by a hash map
#[derive(Default)]
pub struct InMemoryExecutionContext {
    messages: HashMap<String, Message>,
}

impl InMemoryExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExecutionContext for InMemoryExecutionContext {
    fn get_raw(&self, key: &str) -> Option<Message> {
        self.messages.get(key).cloned()
    }

    fn put_raw(&mut self, key: &str, value: Message) {
        self.messages.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.messages.remove(key);
    }
}

impl std::fmt::Debug for InMemoryExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryExecutionContext")
            .field("keys", &self.messages.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_with_default() {
        let mut ctx = InMemoryExecutionContext::new();
        let ctx: &mut dyn ExecutionContext = &mut ctx;

        assert!(!ctx.get_message(REQUIRE_PRINT_EQUALS_INPUT, false));
        ctx.put_message(REQUIRE_PRINT_EQUALS_INPUT, true);
        assert!(ctx.get_message(REQUIRE_PRINT_EQUALS_INPUT, false));

        ctx.put_message(CHARSET, String::from("UTF-8"));
        assert_eq!(ctx.get_message(CHARSET, String::new()), "UTF-8");
        assert_eq!(ctx.get_message(CHARSET, 0u32), 0, "wrong type falls back to default");

        ctx.remove(CHARSET);
        assert_eq!(ctx.get_message(CHARSET, String::from("none")), "none");
    }
}
