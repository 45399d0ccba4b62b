use url::form_urlencoded;

use crate::config::ClientConfig;
use crate::models::{RoomId, UserId};

/// URL builder for every backend route the client talks to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    api_base: String,
    socket_base: String,
}

impl Endpoints {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            api_base: config.api_base().to_string(),
            socket_base: config.socket_base().to_string(),
        }
    }

    pub fn login(&self) -> String {
        format!("{}/auth/login", self.api_base)
    }

    pub fn signup(&self) -> String {
        format!("{}/auth/signup", self.api_base)
    }

    pub fn rooms(&self, user_id: UserId) -> String {
        format!("{}/chats/{user_id}", self.api_base)
    }

    pub fn direct_room(&self) -> String {
        format!("{}/chats/direct", self.api_base)
    }

    pub fn messages(&self, room_id: RoomId) -> String {
        format!("{}/messages/{room_id}", self.api_base)
    }

    pub fn send_message(&self) -> String {
        format!("{}/messages", self.api_base)
    }

    pub fn user_search(&self, query: &str) -> String {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .append_pair("q", query)
            .finish();
        format!("{}/users/search?{encoded}", self.api_base)
    }

    pub fn room_socket(&self, room_id: RoomId) -> String {
        format!("{}/ws/rooms/{room_id}", self.socket_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::new(&ClientConfig::new("https://chat.example.com").unwrap())
    }

    #[test]
    fn test_rest_paths() {
        let e = endpoints();
        assert_eq!(e.login(), "https://chat.example.com/auth/login");
        assert_eq!(e.rooms(1), "https://chat.example.com/chats/1");
        assert_eq!(e.direct_room(), "https://chat.example.com/chats/direct");
        assert_eq!(e.messages(5), "https://chat.example.com/messages/5");
        assert_eq!(e.send_message(), "https://chat.example.com/messages");
    }

    #[test]
    fn test_search_query_is_encoded() {
        assert_eq!(
            endpoints().user_search("bob & co"),
            "https://chat.example.com/users/search?q=bob+%26+co"
        );
    }

    #[test]
    fn test_room_socket_uses_ws_scheme() {
        assert_eq!(endpoints().room_socket(5), "wss://chat.example.com/ws/rooms/5");
    }
}
