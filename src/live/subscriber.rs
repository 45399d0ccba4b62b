use std::rc::Rc;

use tracing::{debug, info};

use crate::errors::ClientError;
use crate::live::frame::{decode_frame, LiveEvent};
use crate::models::{Message, RoomId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Closed,
    Connecting,
    Open,
}

/// Identifies one socket over the lifetime of a subscriber. Events carry it
/// so that late events from a replaced socket can be told apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

/// Something that happened on a socket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SocketEvent {
    Opened,
    Frame(String),
    Closed,
}

pub type EventSink = Rc<dyn Fn(SocketEvent)>;

/// An open (or opening) socket. Closing must be idempotent.
pub trait SocketHandle {
    fn close(&self);
}

/// Opens sockets. Events for the new socket go to `sink`, never synchronously
/// from inside `connect`.
pub trait SocketConnector {
    type Handle: SocketHandle;

    fn connect(&self, url: &str, sink: EventSink) -> Result<Self::Handle, ClientError>;
}

impl<C: SocketConnector> SocketConnector for Rc<C> {
    type Handle = C::Handle;

    fn connect(&self, url: &str, sink: EventSink) -> Result<Self::Handle, ClientError> {
        (**self).connect(url, sink)
    }
}

struct ActiveSocket<H> {
    id: ConnectionId,
    room_id: RoomId,
    handle: H,
    state: ConnectionState,
}

/// Keeps at most one live socket, always for the currently selected room.
pub struct RoomSubscriber<C: SocketConnector> {
    connector: C,
    active: Option<ActiveSocket<C::Handle>>,
    next_id: u64,
}

impl<C: SocketConnector> RoomSubscriber<C> {
    pub fn new(connector: C) -> Self {
        Self { connector, active: None, next_id: 0 }
    }

    /// Replaces the current socket with one for `room_id`. The previous
    /// socket is closed before the new one is opened.
    pub fn subscribe(
        &mut self,
        room_id: RoomId,
        url: &str,
        make_sink: impl FnOnce(ConnectionId) -> EventSink,
    ) -> Result<ConnectionId, ClientError> {
        self.close();

        self.next_id += 1;
        let id = ConnectionId(self.next_id);
        let handle = self.connector.connect(url, make_sink(id))?;
        debug!("Connecting to room {room_id} at {url}");

        self.active = Some(ActiveSocket {
            id,
            room_id,
            handle,
            state: ConnectionState::Connecting,
        });
        Ok(id)
    }

    pub fn close(&mut self) {
        if let Some(active) = self.active.take() {
            active.handle.close();
            debug!("Closed socket for room {}", active.room_id);
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.active
            .as_ref()
            .map_or(ConnectionState::Closed, |a| a.state)
    }

    pub fn room_id(&self) -> Option<RoomId> {
        self.active.as_ref().map(|a| a.room_id)
    }

    fn current_mut(&mut self, id: ConnectionId) -> Option<&mut ActiveSocket<C::Handle>> {
        self.active.as_mut().filter(|a| a.id == id)
    }

    /// Returns false when the event belongs to a socket that was replaced.
    pub fn mark_open(&mut self, id: ConnectionId) -> bool {
        match self.current_mut(id) {
            Some(active) => {
                active.state = ConnectionState::Open;
                info!("Live updates connected for room {}", active.room_id);
                true
            }
            None => false,
        }
    }

    /// The backend dropped the socket. There is no reconnect; selecting the
    /// room again opens a new one.
    pub fn mark_closed(&mut self, id: ConnectionId) -> bool {
        if self.current_mut(id).is_none() {
            return false;
        }
        if let Some(active) = self.active.take() {
            active.handle.close();
            info!("Live updates disconnected for room {}", active.room_id);
        }
        true
    }

    /// Decodes a frame from socket `id`. Frames from replaced sockets,
    /// malformed frames, and messages addressed to another room yield `None`.
    pub fn accept_frame(&self, id: ConnectionId, text: &str) -> Option<Message> {
        let active = self.active.as_ref().filter(|a| a.id == id)?;

        match decode_frame(text) {
            Ok(LiveEvent::Message(message)) if message.room_id == active.room_id => Some(message),
            Ok(LiveEvent::Message(message)) => {
                debug!(
                    "Dropping message {} for room {} on room {} socket",
                    message.id, message.room_id, active.room_id
                );
                None
            }
            Ok(LiveEvent::Ignored(kind)) => {
                debug!("Ignoring '{kind}' frame");
                None
            }
            Err(e) => {
                debug!("Dropping frame: {e}");
                None
            }
        }
    }
}

impl<C: SocketConnector> Drop for RoomSubscriber<C> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockConnector;

    fn noop_sink(_: ConnectionId) -> EventSink {
        Rc::new(|_: SocketEvent| {})
    }

    const FRAME: &str =
        r#"{"type":"message","payload":{"id":9,"room_id":5,"sender_id":2,"content":"hi"}}"#;

    #[test]
    fn test_state_machine() {
        let connector = MockConnector::new();
        let mut sub = RoomSubscriber::new(connector.clone());
        assert_eq!(sub.state(), ConnectionState::Closed);

        let id = sub.subscribe(5, "ws://api.test/ws/rooms/5", noop_sink).unwrap();
        assert_eq!(sub.state(), ConnectionState::Connecting);
        assert_eq!(sub.room_id(), Some(5));

        assert!(sub.mark_open(id));
        assert_eq!(sub.state(), ConnectionState::Open);

        assert!(sub.mark_closed(id));
        assert_eq!(sub.state(), ConnectionState::Closed);
        assert_eq!(connector.live_count(), 0);
    }

    #[test]
    fn test_switching_rooms_never_overlaps_sockets() {
        let connector = MockConnector::new();
        let mut sub = RoomSubscriber::new(connector.clone());

        for room in [1, 2, 3, 2] {
            sub.subscribe(room, &format!("ws://api.test/ws/rooms/{room}"), noop_sink)
                .unwrap();
            assert_eq!(connector.live_count(), 1);
        }
        assert_eq!(connector.peak_live(), 1);
        assert_eq!(connector.opened_urls().len(), 4);

        drop(sub);
        assert_eq!(connector.live_count(), 0);
    }

    #[test]
    fn test_events_from_replaced_socket_are_ignored() {
        let connector = MockConnector::new();
        let mut sub = RoomSubscriber::new(connector.clone());

        let first = sub.subscribe(5, "ws://api.test/ws/rooms/5", noop_sink).unwrap();
        let second = sub.subscribe(5, "ws://api.test/ws/rooms/5", noop_sink).unwrap();
        assert_ne!(first, second);

        assert!(!sub.mark_open(first));
        assert_eq!(sub.accept_frame(first, FRAME), None);
        assert!(!sub.mark_closed(first));
        assert_eq!(sub.state(), ConnectionState::Connecting);

        assert!(sub.accept_frame(second, FRAME).is_some());
    }

    #[test]
    fn test_frame_filtering() {
        let connector = MockConnector::new();
        let mut sub = RoomSubscriber::new(connector);
        let id = sub.subscribe(6, "ws://api.test/ws/rooms/6", noop_sink).unwrap();

        // payload for room 5 arriving on the room 6 socket
        assert_eq!(sub.accept_frame(id, FRAME), None);
        assert_eq!(sub.accept_frame(id, "not json"), None);
        assert_eq!(sub.accept_frame(id, r#"{"type":"presence","payload":{}}"#), None);
    }

    #[test]
    fn test_connect_failure_leaves_subscriber_closed() {
        let connector = MockConnector::new();
        let mut sub = RoomSubscriber::new(connector.clone());
        sub.subscribe(1, "ws://api.test/ws/rooms/1", noop_sink).unwrap();

        connector.refuse_connections(true);
        let err = sub
            .subscribe(2, "ws://api.test/ws/rooms/2", noop_sink)
            .unwrap_err();
        assert!(err.is_socket());
        assert_eq!(sub.state(), ConnectionState::Closed);
        assert_eq!(connector.live_count(), 0);
    }
}
