pub mod auth_service;
pub mod chat_service;
pub mod chat_state;

pub use auth_service::AuthService;
pub use chat_service::{ChatObserver, ChatService, SendOutcome};
pub use chat_state::{ChatState, MessageLog, RoomTicket};
