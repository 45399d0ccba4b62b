use std::collections::HashSet;

use crate::live::ConnectionState;
use crate::models::{Message, MessageId, Room, RoomId, User};

/// Messages of the active room in arrival order, at most one per id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageLog {
    messages: Vec<Message>,
    seen: HashSet<MessageId>,
}

impl MessageLog {
    /// Returns false if a message with the same id is already present.
    pub fn push(&mut self, message: Message) -> bool {
        if !self.seen.insert(message.id) {
            return false;
        }
        self.messages.push(message);
        true
    }

    /// Replaces the log with `history`, keeping live messages that arrived
    /// before the history response and are not part of it.
    pub fn merge_history(&mut self, history: Vec<Message>) {
        let live = std::mem::take(self);
        for message in history.into_iter().chain(live.messages) {
            self.push(message);
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.seen.clear();
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Proof that a history request was issued for a particular room selection.
/// A response whose ticket is no longer current belongs to a room the user
/// already left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomTicket {
    pub room_id: RoomId,
    generation: u64,
}

/// Everything the chat view renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatState {
    rooms: Vec<Room>,
    active_room: Option<Room>,
    messages: MessageLog,
    search_results: Vec<User>,
    connection: ConnectionState,
    history_loaded: bool,
    generation: u64,
}

impl ChatState {
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn active_room(&self) -> Option<&Room> {
        self.active_room.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        self.messages.as_slice()
    }

    pub fn search_results(&self) -> &[User] {
        &self.search_results
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn set_rooms(&mut self, rooms: Vec<Room>) {
        self.rooms = rooms;
    }

    pub fn set_search_results(&mut self, users: Vec<User>) {
        self.search_results = users;
    }

    pub fn set_connection(&mut self, connection: ConnectionState) {
        self.connection = connection;
    }

    /// Makes `room` the active room with an empty log.
    pub fn begin_room(&mut self, room: Room) -> RoomTicket {
        self.generation += 1;
        let ticket = RoomTicket { room_id: room.id, generation: self.generation };
        self.active_room = Some(room);
        self.messages.clear();
        self.history_loaded = false;
        ticket
    }

    pub fn end_room(&mut self) {
        self.generation += 1;
        self.active_room = None;
        self.messages.clear();
        self.history_loaded = false;
        self.connection = ConnectionState::Closed;
    }

    pub fn is_current(&self, ticket: RoomTicket) -> bool {
        ticket.generation == self.generation
            && self.active_room.as_ref().map(|r| r.id) == Some(ticket.room_id)
    }

    /// Applies a history response. Returns false and changes nothing when the
    /// ticket is stale.
    pub fn apply_history(&mut self, ticket: RoomTicket, history: Vec<Message>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.messages.merge_history(history);
        self.history_loaded = true;
        true
    }

    /// True when `room_id` is active, its history arrived, and its socket is
    /// still up. Selecting such a room again has nothing to refresh.
    pub fn is_live(&self, room_id: RoomId) -> bool {
        self.history_loaded
            && self.connection != ConnectionState::Closed
            && self.active_room.as_ref().map(|r| r.id) == Some(room_id)
    }

    /// Appends a pushed message if it belongs to the active room.
    pub fn append_live(&mut self, message: Message) -> bool {
        match &self.active_room {
            Some(room) if room.id == message.room_id => self.messages.push(message),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoomKind;

    fn msg(id: MessageId, room_id: RoomId) -> Message {
        Message {
            id,
            room_id,
            sender_id: 2,
            content: format!("m{id}"),
            created_at: None,
        }
    }

    fn room(id: RoomId) -> Room {
        Room { id, name: None, kind: RoomKind::Group, members: vec![] }
    }

    fn ids(state: &ChatState) -> Vec<MessageId> {
        state.messages().iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_log_rejects_duplicates() {
        let mut log = MessageLog::default();
        assert!(log.push(msg(1, 5)));
        assert!(!log.push(msg(1, 5)));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_history_merges_with_early_live_messages() {
        let mut state = ChatState::default();
        let ticket = state.begin_room(room(5));

        // socket delivered 3 and 4 before the history response came back
        state.append_live(msg(3, 5));
        state.append_live(msg(4, 5));
        assert!(state.apply_history(ticket, vec![msg(1, 5), msg(2, 5), msg(3, 5)]));

        assert_eq!(ids(&state), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_stale_history_is_discarded() {
        let mut state = ChatState::default();
        let old = state.begin_room(room(5));
        let current = state.begin_room(room(6));

        assert!(!state.apply_history(old, vec![msg(1, 5)]));
        assert!(state.messages().is_empty());

        assert!(state.apply_history(current, vec![msg(2, 6)]));
        assert_eq!(ids(&state), vec![2]);

        // reselecting the same room still invalidates the earlier request
        let first = state.begin_room(room(6));
        let second = state.begin_room(room(6));
        assert!(!state.is_current(first));
        assert!(state.is_current(second));
    }

    #[test]
    fn test_live_messages_for_other_rooms_are_ignored() {
        let mut state = ChatState::default();
        assert!(!state.append_live(msg(1, 5)));

        state.begin_room(room(5));
        assert!(!state.append_live(msg(2, 6)));
        assert!(state.append_live(msg(3, 5)));
        assert_eq!(ids(&state), vec![3]);

        state.end_room();
        assert!(state.active_room().is_none());
        assert!(state.messages().is_empty());
    }

    #[test]
    fn test_room_is_live_only_after_history() {
        let mut state = ChatState::default();
        let ticket = state.begin_room(room(5));
        state.set_connection(ConnectionState::Open);
        assert!(!state.is_live(5));

        assert!(state.apply_history(ticket, vec![msg(1, 5)]));
        assert!(state.is_live(5));
        assert!(!state.is_live(6));

        state.set_connection(ConnectionState::Closed);
        assert!(!state.is_live(5));

        state.set_connection(ConnectionState::Open);
        state.begin_room(room(5));
        assert!(!state.is_live(5));
    }
}
