//! Result type alias for reweave operations

use crate::error::ReweaveError;

/// Standard Result type for reweave operations
pub type Result<T> = std::result::Result<T, ReweaveError>;

/// Error policy for runs over many source units
pub trait ResultExt<T> {
    /// Hand an error confined to one source unit to `on_error` and yield `None`;
    /// any other error is returned so the whole run stops
    fn recoverable(self, on_error: impl FnOnce(&ReweaveError)) -> Result<Option<T>>;

    /// The value, or `None` once the error has been logged
    fn log_and_continue(self) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn recoverable(self, on_error: impl FnOnce(&ReweaveError)) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_recoverable() => {
                tracing::debug!(kind = ?err.kind(), "skipping source unit: {}", err);
                on_error(&err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn log_and_continue(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(kind = ?err.kind(), "{}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::random_id;

    #[test]
    fn test_recoverable_reports_and_skips_unit_errors() {
        let mut reported = Vec::new();
        let failed: Result<u32> = Err(ReweaveError::parse_error("unexpected ';'", 1, 5));
        let skipped = failed.recoverable(|e| reported.push(e.to_string())).unwrap();
        assert!(skipped.is_none());
        assert_eq!(reported.len(), 1);
        assert!(reported[0].contains("line 1, column 5"));

        let ok: Result<u32> = Ok(7);
        assert_eq!(ok.recoverable(|_| panic!("no error")).unwrap(), Some(7));
    }

    #[test]
    fn test_invariant_violations_stop_the_run() {
        let failed: Result<u32> = Err(ReweaveError::duplicate_id(random_id()));
        assert!(failed.recoverable(|_| panic!("not recoverable")).is_err());
    }

    #[test]
    fn test_log_and_continue() {
        let failed: Result<u32> = Err(ReweaveError::internal_error("boom"));
        assert_eq!(failed.log_and_continue(), None);
        assert_eq!(Ok::<u32, ReweaveError>(3).log_and_continue(), Some(3));
    }
}
