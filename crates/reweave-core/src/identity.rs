//! Stable node identity and reference-identity comparison
//!
//! Every node carries a [`TreeId`] that survives edits that do not explicitly
//! replace it. Reference identity ([`RefEq`]) is what the "did anything change"
//! fast paths compare: a visit that does not touch a value must hand back the
//! same allocation, so these checks stay pointer comparisons.

use std::sync::Arc;

use uuid::Uuid;

/// Identifier shared by a node and every edited copy of it
pub type TreeId = Uuid;

/// Allocate a fresh identifier
pub fn random_id() -> TreeId {
    Uuid::new_v4()
}

/// Reference identity: true when `other` is the very same value, not merely an equal one.
///
/// Plain-data leaves (numbers, booleans, operator enums) have no allocation to
/// compare and fall back to value equality.
pub trait RefEq {
    fn ref_eq(&self, other: &Self) -> bool;
}

impl<T: ?Sized> RefEq for Arc<T> {
    fn ref_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: RefEq> RefEq for Option<T> {
    fn ref_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.ref_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: RefEq> RefEq for Vec<T> {
    fn ref_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.ref_eq(b))
    }
}

macro_rules! ref_eq_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RefEq for $ty {
                fn ref_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

ref_eq_by_value!(bool, char, u8, u16, u32, u64, usize, i32, i64, String, Uuid);
