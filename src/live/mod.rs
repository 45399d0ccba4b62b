pub mod frame;
pub mod subscriber;

pub use frame::{decode_frame, LiveEvent};
pub use subscriber::{
    ConnectionId, ConnectionState, EventSink, RoomSubscriber, SocketConnector, SocketEvent,
    SocketHandle,
};
