//! Request and response bodies, one struct per backend payload.

use serde::{Deserialize, Serialize};

use crate::models::{Message, Room, RoomId, User, UserId};

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct RoomList {
    #[serde(default)]
    pub rooms: Vec<Room>,
}

#[derive(Debug, Serialize)]
pub struct DirectRoomRequest {
    pub user_id: UserId,
    pub other_user_id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct DirectRoomResponse {
    pub room_id: RoomId,
}

#[derive(Debug, Deserialize)]
pub struct MessageList {
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub room_id: RoomId,
    pub sender_id: UserId,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct UserList {
    #[serde(default)]
    pub users: Vec<User>,
}
