use chrono::DateTime;
use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type RoomId = i64;
pub type MessageId = i64;

/// Label shown for rooms the backend sent without a name.
pub const UNNAMED_ROOM_LABEL: &str = "Direct chat";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The signed-in identity plus its bearer token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    Direct,
    Group,
}

impl RoomKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomKind::Direct => "direct",
            RoomKind::Group => "group",
        }
    }
}

impl std::fmt::Display for RoomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: RoomKind,
    #[serde(default)]
    pub members: Vec<UserId>,
}

impl Room {
    /// A direct room between `me` and `other`, built from what the client
    /// already knows rather than from a backend round trip.
    pub fn direct(id: RoomId, me: &User, other: &User) -> Self {
        Self {
            id,
            name: Some(other.name.clone()),
            kind: RoomKind::Direct,
            members: vec![me.id, other.id],
        }
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(UNNAMED_ROOM_LABEL)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub room_id: RoomId,
    pub sender_id: UserId,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Message {
    pub fn is_from(&self, user: &User) -> bool {
        self.sender_id == user.id
    }

    /// `HH:MM` for an RFC 3339 `created_at`, `None` when absent or unparseable.
    pub fn time_label(&self) -> Option<String> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|ts| ts.format("%H:%M").to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient, user-facing notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, text: text.into() }
    }
}

/// The notice currently on screen. Every `show` gets a fresh sequence
/// number; a dismissal timer only clears the notice it was started for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeSlot {
    current: Option<Notice>,
    seq: u64,
}

impl NoticeSlot {
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn show(&mut self, notice: Notice) -> u64 {
        self.seq += 1;
        self.current = Some(notice);
        self.seq
    }

    /// Clears the notice shown as `seq`. Returns false if a newer notice
    /// replaced it or it is already gone.
    pub fn expire(&mut self, seq: u64) -> bool {
        if seq != self.seq || self.current.is_none() {
            return false;
        }
        self.current = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_without_email() {
        let user: User = serde_json::from_str(r#"{"id":1,"name":"A"}"#).unwrap();
        assert_eq!(user, User { id: 1, name: "A".into(), email: None });
        assert_eq!(serde_json::to_string(&user).unwrap(), r#"{"id":1,"name":"A"}"#);
    }

    #[test]
    fn test_room_wire_shape() {
        let room: Room = serde_json::from_str(r#"{"id":3,"type":"group","name":"Ops"}"#).unwrap();
        assert_eq!(room.kind, RoomKind::Group);
        assert!(room.members.is_empty());
        assert_eq!(room.display_name(), "Ops");

        let unknown = serde_json::from_str::<Room>(r#"{"id":3,"type":"channel"}"#);
        assert!(unknown.is_err());
    }

    #[test]
    fn test_direct_room_uses_other_name() {
        let me = User { id: 1, name: "A".into(), email: None };
        let bob = User { id: 7, name: "Bob".into(), email: None };
        let room = Room::direct(42, &me, &bob);
        assert_eq!(room.display_name(), "Bob");
        assert_eq!(room.kind, RoomKind::Direct);
        assert_eq!(room.members, vec![1, 7]);

        let unnamed = Room { name: None, ..room };
        assert_eq!(unnamed.display_name(), UNNAMED_ROOM_LABEL);
    }

    #[test]
    fn test_message_time_label() {
        let mut msg: Message =
            serde_json::from_str(r#"{"id":9,"room_id":5,"sender_id":2,"content":"hi","extra":true}"#)
                .unwrap();
        assert_eq!(msg.time_label(), None);

        msg.created_at = Some("2024-03-01T14:05:00+00:00".into());
        assert_eq!(msg.time_label().as_deref(), Some("14:05"));

        msg.created_at = Some("yesterday".into());
        assert_eq!(msg.time_label(), None);
    }

    #[test]
    fn test_older_timer_keeps_newer_identical_notice() {
        let mut slot = NoticeSlot::default();
        let first = slot.show(Notice::error("Message not sent"));
        let second = slot.show(Notice::error("Message not sent"));

        assert!(!slot.expire(first));
        assert_eq!(slot.current(), Some(&Notice::error("Message not sent")));

        assert!(slot.expire(second));
        assert_eq!(slot.current(), None);
        assert!(!slot.expire(second));
    }
}
