use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::endpoints::Endpoints;
use crate::api::schema::{
    DirectRoomRequest, DirectRoomResponse, LoginRequest, LoginResponse, MessageList, RoomList,
    SendMessageRequest, SignupRequest, UserList,
};
use crate::api::transport::{HttpRequest, HttpResponse, HttpTransport, Method};
use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::models::{Message, Room, RoomId, Session, User, UserId};

/// One async operation per backend endpoint. Callers only learn whether a
/// call worked; the backend's error bodies are never interpreted.
#[derive(Clone, Debug)]
pub struct ApiClient<T: HttpTransport> {
    transport: T,
    endpoints: Endpoints,
    bearer: Option<String>,
}

/// How a non-2xx status should be reported.
#[derive(Clone, Copy)]
enum Failure {
    Auth,
    Request,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            endpoints: Endpoints::new(config),
            bearer: None,
        }
    }

    /// Attaches `Authorization: Bearer <token>` to every request.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let url = self.endpoints.login();
        let body = LoginRequest { email, password };
        let response = self.call(Method::Post, &url, Some(&body), Failure::Auth).await?;
        let login: LoginResponse = decode(&url, &response)?;
        Ok(Session { user: login.user, token: login.token })
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<(), ClientError> {
        let url = self.endpoints.signup();
        let body = SignupRequest { name, email, password };
        self.call(Method::Post, &url, Some(&body), Failure::Auth).await?;
        Ok(())
    }

    pub async fn list_rooms(&self, user_id: UserId) -> Result<Vec<Room>, ClientError> {
        let url = self.endpoints.rooms(user_id);
        let response = self.call(Method::Get, &url, None::<&()>, Failure::Request).await?;
        decode::<RoomList>(&url, &response).map(|list| list.rooms)
    }

    pub async fn list_messages(&self, room_id: RoomId) -> Result<Vec<Message>, ClientError> {
        let url = self.endpoints.messages(room_id);
        let response = self.call(Method::Get, &url, None::<&()>, Failure::Request).await?;
        decode::<MessageList>(&url, &response).map(|list| list.messages)
    }

    pub async fn send_message(
        &self,
        room_id: RoomId,
        sender_id: UserId,
        content: &str,
    ) -> Result<(), ClientError> {
        let url = self.endpoints.send_message();
        let body = SendMessageRequest { room_id, sender_id, content };
        self.call(Method::Post, &url, Some(&body), Failure::Request).await?;
        Ok(())
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<User>, ClientError> {
        let url = self.endpoints.user_search(query);
        let response = self.call(Method::Get, &url, None::<&()>, Failure::Request).await?;
        decode::<UserList>(&url, &response).map(|list| list.users)
    }

    /// Returns the id of the (possibly pre-existing) direct room.
    pub async fn create_direct_room(
        &self,
        user_id: UserId,
        other_user_id: UserId,
    ) -> Result<RoomId, ClientError> {
        let url = self.endpoints.direct_room();
        let body = DirectRoomRequest { user_id, other_user_id };
        let response = self.call(Method::Post, &url, Some(&body), Failure::Request).await?;
        decode::<DirectRoomResponse>(&url, &response).map(|r| r.room_id)
    }

    async fn call<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        failure: Failure,
    ) -> Result<HttpResponse, ClientError> {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(ClientError::Encode)?;

        debug!("{method:?} {url}");
        let response = self
            .transport
            .send(HttpRequest {
                method,
                url: url.to_string(),
                body,
                bearer: self.bearer.clone(),
            })
            .await?;

        if response.is_success() {
            return Ok(response);
        }

        warn!("{method:?} {url} returned {}", response.status);
        let endpoint = url.to_string();
        let status = response.status;
        Err(match failure {
            Failure::Auth => ClientError::Auth { endpoint, status },
            Failure::Request => ClientError::Request { endpoint, status },
        })
    }
}

fn decode<R: DeserializeOwned>(url: &str, response: &HttpResponse) -> Result<R, ClientError> {
    serde_json::from_str(&response.body).map_err(|source| {
        warn!("Unexpected response shape from {url}: {source}");
        ClientError::Decode { endpoint: url.to_string(), source }
    })
}
