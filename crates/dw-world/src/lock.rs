//! Locks shared by doors and containers.

use serde::{Deserialize, Serialize};

use crate::error::LockError;

/// What opens a lock: a named key item, or a literal code string.
///
/// Exactly one mechanism exists per lock; a lock is never both key- and
/// code-operated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockMechanism {
    /// Opened by the key item with this name.
    Key(String),
    /// Opened by entering this code.
    Code(String),
}

/// A lock securing a door or a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lock {
    /// Whether the lock is currently engaged.
    pub locked: bool,
    /// The single mechanism that opens this lock.
    pub mechanism: LockMechanism,
}

impl Lock {
    /// Create an engaged key lock.
    pub fn key(key_name: impl Into<String>) -> Self {
        Self {
            locked: true,
            mechanism: LockMechanism::Key(key_name.into()),
        }
    }

    /// Create an engaged code lock.
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            locked: true,
            mechanism: LockMechanism::Code(code.into()),
        }
    }

    /// Returns true if the lock is currently engaged.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns true if this is a key lock.
    pub fn has_key_lock(&self) -> bool {
        matches!(self.mechanism, LockMechanism::Key(_))
    }

    /// Returns true if this is a code lock.
    pub fn has_code_lock(&self) -> bool {
        matches!(self.mechanism, LockMechanism::Code(_))
    }

    /// The name of the key that opens this lock, if it is a key lock.
    pub fn key_name(&self) -> Option<&str> {
        match &self.mechanism {
            LockMechanism::Key(name) => Some(name),
            LockMechanism::Code(_) => None,
        }
    }

    /// Attempt to open the lock with a key item.
    pub fn unlock_with_key(&mut self, key_name: &str) -> Result<(), LockError> {
        let LockMechanism::Key(expected) = &self.mechanism else {
            return Err(LockError::WrongMechanism("key"));
        };
        if !self.locked {
            return Err(LockError::AlreadyUnlocked);
        }
        if key_name != expected {
            return Err(LockError::WrongKey);
        }
        self.locked = false;
        Ok(())
    }

    /// Attempt to open the lock by entering a code.
    pub fn unlock_with_code(&mut self, code: &str) -> Result<(), LockError> {
        let LockMechanism::Code(expected) = &self.mechanism else {
            return Err(LockError::WrongMechanism("code"));
        };
        if !self.locked {
            return Err(LockError::AlreadyUnlocked);
        }
        if code != expected {
            return Err(LockError::WrongCode);
        }
        self.locked = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_lock_opens_with_matching_key() {
        let mut lock = Lock::key("iron key");
        assert!(lock.is_locked());
        assert!(lock.has_key_lock());
        assert_eq!(lock.key_name(), Some("iron key"));

        lock.unlock_with_key("iron key").unwrap();
        assert!(!lock.is_locked());
    }

    #[test]
    fn key_lock_rejects_wrong_key() {
        let mut lock = Lock::key("iron key");
        assert_eq!(
            lock.unlock_with_key("brass key"),
            Err(LockError::WrongKey)
        );
        assert!(lock.is_locked());
    }

    #[test]
    fn code_lock_opens_with_matching_code() {
        let mut lock = Lock::code("2468");
        assert!(lock.has_code_lock());
        assert_eq!(lock.key_name(), None);

        assert_eq!(lock.unlock_with_code("1234"), Err(LockError::WrongCode));
        lock.unlock_with_code("2468").unwrap();
        assert!(!lock.is_locked());
    }

    #[test]
    fn unlocking_twice_fails() {
        let mut lock = Lock::code("2468");
        lock.unlock_with_code("2468").unwrap();
        assert_eq!(
            lock.unlock_with_code("2468"),
            Err(LockError::AlreadyUnlocked)
        );
    }

    #[test]
    fn mechanism_mismatch() {
        let mut key_lock = Lock::key("iron key");
        assert_eq!(
            key_lock.unlock_with_code("2468"),
            Err(LockError::WrongMechanism("code"))
        );

        let mut code_lock = Lock::code("2468");
        assert_eq!(
            code_lock.unlock_with_key("iron key"),
            Err(LockError::WrongMechanism("key"))
        );
    }

    #[test]
    fn mechanism_error_message() {
        let mut code_lock = Lock::code("2468");
        let err = code_lock.unlock_with_key("iron key").unwrap_err();
        assert_eq!(err.to_string(), "this lock doesn't take a key");
    }
}
