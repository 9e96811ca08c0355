//! Per-record access check.
//!
//! A caller may act on a record only when it owns it. Existence is checked
//! before ownership, so a missing record is reported as such regardless of
//! who asks.

use crate::domain::UserId;

/// Records that belong to exactly one user.
pub trait Owned {
    fn owner_id(&self) -> &UserId;
}

/// Why the guard refused access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OwnershipError {
    #[error("record not found")]
    NotFound,
    #[error("caller does not own the record")]
    NotOwner,
}

/// Release `record` to `caller` if it exists and `caller` owns it.
///
/// # Examples
/// ```
/// use expense_tracker::domain::{Owned, OwnershipError, UserId, guard};
///
/// struct Note(UserId);
/// impl Owned for Note {
///     fn owner_id(&self) -> &UserId { &self.0 }
/// }
///
/// let alice = UserId::random();
/// let bob = UserId::random();
/// assert!(guard(&alice, Some(Note(alice.clone()))).is_ok());
/// assert_eq!(guard(&bob, Some(Note(alice.clone()))).err(), Some(OwnershipError::NotOwner));
/// assert_eq!(guard::<Note>(&alice, None).err(), Some(OwnershipError::NotFound));
/// ```
pub fn guard<T: Owned>(caller: &UserId, record: Option<T>) -> Result<T, OwnershipError> {
    let record = record.ok_or(OwnershipError::NotFound)?;
    if record.owner_id() == caller {
        Ok(record)
    } else {
        Err(OwnershipError::NotOwner)
    }
}
