use tracing::{info, warn};

use crate::errors::ClientError;
use crate::models::{Session, User};
use crate::store::KeyValueStorage;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Persists the single active session across reloads. Tokens never expire
/// client-side; the backend decides when one stops working.
#[derive(Debug, Clone)]
pub struct SessionStore<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn load(&self) -> Option<Session> {
        let token = self.read(TOKEN_KEY)?;
        let raw_user = self.read(USER_KEY)?;

        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some(Session { user, token }),
            Err(e) => {
                warn!("Ignoring stored session with malformed user: {e}");
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), ClientError> {
        let user = serde_json::to_string(&session.user).map_err(ClientError::Encode)?;
        self.storage.set(TOKEN_KEY, &session.token)?;
        self.storage.set(USER_KEY, &user)?;
        info!("Session saved for user {}", session.user.id);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)?;
        info!("Session cleared");
        Ok(())
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read '{key}' from storage: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::store::MemoryStorage;

    fn session() -> Session {
        Session {
            user: User { id: 1, name: "A".into(), email: None },
            token: "t1".into(),
        }
    }

    #[test]
    fn test_save_then_load() {
        let storage = Rc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        assert_eq!(store.load(), None);

        store.save(&session()).unwrap();
        assert_eq!(store.load(), Some(session()));
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("t1"));
        assert_eq!(
            storage.get(USER_KEY).unwrap().as_deref(),
            Some(r#"{"id":1,"name":"A"}"#)
        );
    }

    #[test]
    fn test_clear_removes_everything() {
        let storage = Rc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        store.save(&session()).unwrap();

        store.clear().unwrap();
        assert_eq!(store.load(), None);
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_incomplete_or_corrupt_entries() {
        let storage = Rc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());

        storage.set(USER_KEY, r#"{"id":1,"name":"A"}"#).unwrap();
        assert_eq!(store.load(), None, "token missing");

        storage.set(TOKEN_KEY, "t1").unwrap();
        storage.set(USER_KEY, "null").unwrap();
        assert_eq!(store.load(), None, "user JSON is null");

        storage.set(USER_KEY, "{not json").unwrap();
        assert_eq!(store.load(), None);
    }
}
