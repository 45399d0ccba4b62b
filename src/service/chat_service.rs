use std::cell::RefCell;
use std::rc::{Rc, Weak};

use futures_util::future::join;
use tracing::{debug, warn};

use crate::api::{ApiClient, HttpTransport};
use crate::errors::ClientError;
use crate::live::{ConnectionId, EventSink, RoomSubscriber, SocketConnector, SocketEvent};
use crate::models::{Notice, Room, RoomId, User};
use crate::service::chat_state::{ChatState, RoomTicket};

/// Receives everything the chat view needs to redraw.
pub trait ChatObserver {
    fn state_changed(&self, state: &ChatState);
    fn notice(&self, notice: Notice);
}

impl<O: ChatObserver + ?Sized> ChatObserver for Rc<O> {
    fn state_changed(&self, state: &ChatState) {
        (**self).state_changed(state)
    }

    fn notice(&self, notice: Notice) {
        (**self).notice(notice)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank text or no active room; nothing was sent.
    Skipped,
    /// The backend accepted the message; the input may be cleared.
    Sent,
    /// The request failed; the input must be kept for a manual retry.
    Failed,
}

/// Drives the chat view for one signed-in user: room list, selected room,
/// its live socket, and user search.
///
/// Runs on a single thread. Borrows of the inner cells never span an
/// `.await`, so socket events may arrive while a request is in flight.
pub struct ChatService<T: HttpTransport, C: SocketConnector> {
    me: User,
    api: ApiClient<T>,
    live: RefCell<RoomSubscriber<C>>,
    state: RefCell<ChatState>,
    observer: Box<dyn ChatObserver>,
    this: Weak<Self>,
}

impl<T, C> ChatService<T, C>
where
    T: HttpTransport + 'static,
    C: SocketConnector + 'static,
{
    pub fn new(
        me: User,
        api: ApiClient<T>,
        connector: C,
        observer: impl ChatObserver + 'static,
    ) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            me,
            api,
            live: RefCell::new(RoomSubscriber::new(connector)),
            state: RefCell::new(ChatState::default()),
            observer: Box::new(observer),
            this: this.clone(),
        })
    }

    pub fn snapshot(&self) -> ChatState {
        self.state.borrow().clone()
    }

    pub async fn load_rooms(&self) {
        match self.api.list_rooms(self.me.id).await {
            Ok(rooms) => {
                debug!("Loaded {} rooms", rooms.len());
                self.state.borrow_mut().set_rooms(rooms);
                self.publish();
            }
            Err(e) => self.report("Failed to load chats", &e),
        }
    }

    /// Switches to `room`: the old socket is closed, a new one opened, and
    /// the room's history fetched. Socket and history race; the log merges
    /// both and drops duplicates.
    pub async fn select_room(&self, room: Room) {
        let ticket = self.activate(room);
        self.load_history(ticket).await;
    }

    /// See [`ChatState::is_live`].
    pub fn is_live(&self, room_id: RoomId) -> bool {
        self.state.borrow().is_live(room_id)
    }

    /// Deselects the active room and closes its socket.
    pub fn close_room(&self) {
        self.live.borrow_mut().close();
        self.state.borrow_mut().end_room();
        self.publish();
    }

    /// Closes the live socket without telling the observer. For teardown,
    /// when nothing is left to redraw.
    pub fn disconnect(&self) {
        self.live.borrow_mut().close();
    }

    pub async fn send_message(&self, text: &str) -> SendOutcome {
        let active = self.state.borrow().active_room().map(|room| room.id);
        let Some(room_id) = active.filter(|_| !text.trim().is_empty()) else {
            return SendOutcome::Skipped;
        };

        match self.api.send_message(room_id, self.me.id, text).await {
            Ok(()) => SendOutcome::Sent,
            Err(e) => {
                self.report("Message not sent", &e);
                SendOutcome::Failed
            }
        }
    }

    pub async fn search_users(&self, query: &str) {
        let users = match self.api.search_users(query).await {
            Ok(users) => users,
            Err(e) => {
                self.report("Search failed", &e);
                Vec::new()
            }
        };
        self.state.borrow_mut().set_search_results(users);
        self.publish();
    }

    /// Opens (or reopens) the direct room with `other` and selects it at once
    /// from local data. The room list is refreshed in the background.
    pub async fn start_direct(&self, other: User) {
        let room_id = match self.api.create_direct_room(self.me.id, other.id).await {
            Ok(room_id) => room_id,
            Err(e) => {
                self.report("Could not start chat", &e);
                return;
            }
        };

        let ticket = self.activate(Room::direct(room_id, &self.me, &other));
        join(self.load_history(ticket), self.load_rooms()).await;
    }

    pub fn handle_socket_event(&self, connection: ConnectionId, event: SocketEvent) {
        let changed = match event {
            SocketEvent::Opened => self.live.borrow_mut().mark_open(connection),
            SocketEvent::Frame(text) => {
                let message = self.live.borrow().accept_frame(connection, &text);
                match message {
                    Some(message) => self.state.borrow_mut().append_live(message),
                    None => false,
                }
            }
            SocketEvent::Closed => {
                let current = self.live.borrow_mut().mark_closed(connection);
                if current {
                    self.observer.notice(Notice::info(
                        "Live updates disconnected. Reopen the chat to reconnect.",
                    ));
                }
                current
            }
        };

        if changed {
            self.publish();
        }
    }

    fn activate(&self, room: Room) -> RoomTicket {
        let room_id = room.id;
        let ticket = self.state.borrow_mut().begin_room(room);

        let url = self.api.endpoints().room_socket(room_id);
        let this = self.this.clone();
        let subscribed = self.live.borrow_mut().subscribe(room_id, &url, move |connection| {
            let sink: EventSink = Rc::new(move |event: SocketEvent| {
                if let Some(service) = this.upgrade() {
                    service.handle_socket_event(connection, event);
                }
            });
            sink
        });
        if let Err(e) = subscribed {
            self.report("Live updates unavailable for this chat", &e);
        }

        self.publish();
        ticket
    }

    async fn load_history(&self, ticket: RoomTicket) {
        match self.api.list_messages(ticket.room_id).await {
            Ok(history) => {
                let applied = self.state.borrow_mut().apply_history(ticket, history);
                if applied {
                    self.publish();
                } else {
                    debug!("Discarding stale history for room {}", ticket.room_id);
                }
            }
            Err(e) => {
                let current = self.state.borrow().is_current(ticket);
                if current {
                    self.report("Failed to load messages", &e);
                }
            }
        }
    }

    fn publish(&self) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            state.set_connection(self.live.borrow().state());
            state.clone()
        };
        self.observer.state_changed(&snapshot);
    }

    fn report(&self, context: &str, error: &ClientError) {
        warn!("{context}: {error}");
        self.observer.notice(Notice::error(context));
    }
}
