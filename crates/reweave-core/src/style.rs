//! Styles: plain, read-only policy records consumed by formatting visitors

use std::fmt::Debug;
use std::sync::Arc;

use crate::identity::{TreeId, random_id};
use crate::markers::{AsAny, Marker};

/// A style record
pub trait Style: AsAny + Debug + Send + Sync + 'static {
    /// Combine with a style of lower precedence; by default the higher one wins outright
    fn merge(&self, _lower_precedence: &Self) -> Self
    where
        Self: Sized + Clone,
    {
        self.clone()
    }

    /// Fill unset values from defaults
    fn apply_defaults(&self) -> Self
    where
        Self: Sized + Clone,
    {
        self.clone()
    }
}

/// A named set of styles, attached to a source unit as a marker
#[derive(Debug, Clone)]
pub struct NamedStyles {
    pub id: TreeId,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub styles: Vec<Arc<dyn Style>>,
}

impl NamedStyles {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>, styles: Vec<Arc<dyn Style>>) -> Self {
        Self {
            id: random_id(),
            name: name.into(),
            display_name: display_name.into(),
            description: None,
            tags: Vec::new(),
            styles,
        }
    }

    /// The first style of type `S` in this set
    pub fn style<S: Style>(&self) -> Option<&S> {
        self.styles.iter().find_map(|s| {
            let s: &dyn Style = &**s;
            s.as_any().downcast_ref::<S>()
        })
    }

    /// Merge every style of type `S` across `named`; later sets take precedence
    pub fn merge<S: Style + Clone>(named: &[&NamedStyles]) -> Option<S> {
        named
            .iter()
            .filter_map(|n| n.style::<S>())
            .fold(None, |merged: Option<S>, style| {
                Some(match merged {
                    Some(lower) => style.merge(&lower),
                    None => style.clone(),
                })
            })
            .map(|s| s.apply_defaults())
    }
}

impl Marker for NamedStyles {
    fn id(&self) -> TreeId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Indent {
        size: Option<usize>,
        tab: Option<bool>,
    }

    impl Style for Indent {
        fn merge(&self, lower: &Self) -> Self {
            Indent {
                size: self.size.or(lower.size),
                tab: self.tab.or(lower.tab),
            }
        }

        fn apply_defaults(&self) -> Self {
            Indent {
                size: self.size.or(Some(4)),
                tab: self.tab.or(Some(false)),
            }
        }
    }

    #[test]
    fn test_later_named_styles_take_precedence() {
        let base = NamedStyles::new(
            "base",
            "Base",
            vec![Arc::new(Indent {
                size: Some(2),
                tab: Some(true),
            })],
        );
        let project = NamedStyles::new(
            "project",
            "Project",
            vec![Arc::new(Indent {
                size: Some(8),
                tab: None,
            })],
        );

        let merged = NamedStyles::merge::<Indent>(&[&base, &project]).unwrap();
        assert_eq!(
            merged,
            Indent {
                size: Some(8),
                tab: Some(true)
            }
        );
        assert!(NamedStyles::merge::<Indent>(&[]).is_none());
    }
}
