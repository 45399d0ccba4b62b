use tracing::info;

use crate::api::{ApiClient, HttpTransport};
use crate::errors::ClientError;
use crate::models::Session;
use crate::store::{KeyValueStorage, SessionStore};

/// Login, signup, and logout. Login is the only writer of the session store
/// besides logout.
pub struct AuthService<T: HttpTransport, S: KeyValueStorage> {
    api: ApiClient<T>,
    store: SessionStore<S>,
}

impl<T: HttpTransport, S: KeyValueStorage> AuthService<T, S> {
    pub fn new(api: ApiClient<T>, store: SessionStore<S>) -> Self {
        Self { api, store }
    }

    pub fn current_session(&self) -> Option<Session> {
        self.store.load()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        require("email", email)?;
        require("password", password)?;

        let session = self.api.login(email.trim(), password).await?;
        self.store.save(&session)?;
        info!("User {} logged in", session.user.id);
        Ok(session)
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<(), ClientError> {
        require("name", name)?;
        require("email", email)?;
        require("password", password)?;

        self.api.signup(name.trim(), email.trim(), password).await?;
        info!("Account created");
        Ok(())
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        self.store.clear()
    }
}

fn require(field_name: &str, value: &str) -> Result<(), ClientError> {
    if value.trim().is_empty() {
        return Err(ClientError::empty_field(field_name));
    }
    Ok(())
}
