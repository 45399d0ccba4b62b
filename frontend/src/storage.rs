use chatmind::ClientError;
use chatmind::store::{KeyValueStorage, SessionStore};
use wasm_bindgen::JsValue;

/// `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn local() -> Result<web_sys::Storage, ClientError> {
        web_sys::window()
            .ok_or_else(|| ClientError::Storage("no window".into()))?
            .local_storage()
            .map_err(storage_error)?
            .ok_or_else(|| ClientError::Storage("localStorage is unavailable".into()))
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Self::local()?.get_item(key).map_err(storage_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        Self::local()?.set_item(key, value).map_err(storage_error)
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        Self::local()?.remove_item(key).map_err(storage_error)
    }
}

fn storage_error(e: JsValue) -> ClientError {
    ClientError::Storage(format!("{e:?}"))
}

pub fn session_store() -> SessionStore<BrowserStorage> {
    SessionStore::new(BrowserStorage)
}
