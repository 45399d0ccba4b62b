use std::rc::Rc;

use chatmind::ClientConfig;
use chatmind::api::ApiClient;
use chatmind::live::ConnectionState;
use chatmind::models::{Message, Notice, NoticeSlot, Room, Session, User};
use chatmind::service::{AuthService, ChatObserver, ChatService, ChatState, SendOutcome};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, GlooTransport};
use crate::config;
use crate::storage::{self, BrowserStorage};
use crate::ws::BrowserConnector;

const NOTICE_MILLIS: u32 = 4_000;

/// Application-wide state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    pub session: ReadSignal<Option<Session>>,
    pub notice: ReadSignal<NoticeSlot>,
    set_session: WriteSignal<Option<Session>>,
    set_notice: WriteSignal<NoticeSlot>,
    config: StoredValue<ClientConfig>,
}

impl AppState {
    /// Restores any stored session and provides the state in the current
    /// Leptos context.
    pub fn provide() -> Self {
        let config = config::load();
        let restored = AuthService::new(api::client(&config), storage::session_store())
            .current_session();
        let (session, set_session) = signal(restored);
        let (notice, set_notice) = signal(NoticeSlot::default());

        let state = Self {
            session,
            notice,
            set_session,
            set_notice,
            config: StoredValue::new(config),
        };
        provide_context(state);
        state
    }

    fn api(&self) -> ApiClient<GlooTransport> {
        self.config.with_value(api::client)
    }

    fn auth(&self) -> AuthService<GlooTransport, BrowserStorage> {
        AuthService::new(self.api(), storage::session_store())
    }

    /// Shows `notice` until it is replaced or times out.
    pub fn show_notice(&self, notice: Notice) {
        let set_notice = self.set_notice;
        let Some(seq) = set_notice.try_update(|slot| slot.show(notice)) else {
            return;
        };

        Timeout::new(NOTICE_MILLIS, move || {
            set_notice.maybe_update(|slot| slot.expire(seq));
        })
        .forget();
    }

    pub fn login(&self, email: String, password: String, on_done: impl FnOnce(bool) + 'static) {
        let state = *self;
        spawn_local(async move {
            match state.auth().login(&email, &password).await {
                Ok(session) => {
                    state.set_session.set(Some(session));
                    on_done(true);
                }
                Err(e) => {
                    log::warn!("Login failed: {e}");
                    state.show_notice(Notice::error("Login failed"));
                    on_done(false);
                }
            }
        });
    }

    pub fn signup(
        &self,
        name: String,
        email: String,
        password: String,
        on_done: impl FnOnce(bool) + 'static,
    ) {
        let state = *self;
        spawn_local(async move {
            match state.auth().signup(&name, &email, &password).await {
                Ok(()) => {
                    state.show_notice(Notice::success("Account created. Please login."));
                    on_done(true);
                }
                Err(e) => {
                    log::warn!("Sign up failed: {e}");
                    state.show_notice(Notice::error("Sign up failed"));
                    on_done(false);
                }
            }
        });
    }

    pub fn logout(&self) {
        if let Err(e) = self.auth().logout() {
            log::error!("Failed to clear session: {e}");
        }
        self.set_session.set(None);
    }
}

pub type BrowserChat = ChatService<GlooTransport, BrowserConnector>;

/// The chat view's state, mirrored from a [`ChatService`] into signals.
/// Lives as long as the chat page.
#[derive(Clone, Copy)]
pub struct ChatHandle {
    pub me: StoredValue<User>,
    pub rooms: ReadSignal<Vec<Room>>,
    pub active_room: ReadSignal<Option<Room>>,
    pub messages: ReadSignal<Vec<Message>>,
    pub search_results: ReadSignal<Vec<User>>,
    pub connection: ReadSignal<ConnectionState>,
    service: StoredValue<Rc<BrowserChat>, LocalStorage>,
}

impl ChatHandle {
    /// Builds the service for `session` and provides the handle in the
    /// current context. The socket is closed when the owner is cleaned up.
    pub fn mount(app: AppState, session: Session) -> Self {
        let (rooms, set_rooms) = signal(Vec::<Room>::new());
        let (active_room, set_active_room) = signal(None::<Room>);
        let (messages, set_messages) = signal(Vec::<Message>::new());
        let (search_results, set_search_results) = signal(Vec::<User>::new());
        let (connection, set_connection) = signal(ConnectionState::Closed);

        let observer = SignalObserver {
            app,
            set_rooms,
            set_active_room,
            set_messages,
            set_search_results,
            set_connection,
        };
        let api = app.api().with_bearer(session.token.clone());
        let service = StoredValue::new_local(ChatService::new(
            session.user.clone(),
            api,
            BrowserConnector,
            observer,
        ));
        on_cleanup(move || {
            service.try_with_value(|service| service.disconnect());
        });

        let handle = Self {
            me: StoredValue::new(session.user),
            rooms,
            active_room,
            messages,
            search_results,
            connection,
            service,
        };
        provide_context(handle);
        handle
    }

    fn service(&self) -> Rc<BrowserChat> {
        self.service.get_value()
    }

    pub fn load_rooms(&self) {
        let service = self.service();
        spawn_local(async move { service.load_rooms().await });
    }

    /// Clicking the room that is already live does nothing; otherwise the
    /// socket is reopened and history fetched again.
    pub fn select_room(&self, room: Room) {
        let service = self.service();
        if service.is_live(room.id) {
            return;
        }
        spawn_local(async move { service.select_room(room).await });
    }

    pub fn close_room(&self) {
        self.service().close_room();
    }

    pub fn search(&self, query: String) {
        let service = self.service();
        spawn_local(async move { service.search_users(&query).await });
    }

    pub fn start_direct(&self, other: User) {
        let service = self.service();
        spawn_local(async move { service.start_direct(other).await });
    }

    pub fn send(&self, text: String, on_done: impl FnOnce(SendOutcome) + 'static) {
        let service = self.service();
        spawn_local(async move { on_done(service.send_message(&text).await) });
    }
}

struct SignalObserver {
    app: AppState,
    set_rooms: WriteSignal<Vec<Room>>,
    set_active_room: WriteSignal<Option<Room>>,
    set_messages: WriteSignal<Vec<Message>>,
    set_search_results: WriteSignal<Vec<User>>,
    set_connection: WriteSignal<ConnectionState>,
}

impl ChatObserver for SignalObserver {
    fn state_changed(&self, state: &ChatState) {
        replace_if_changed(self.set_rooms, state.rooms().to_vec());
        replace_if_changed(self.set_active_room, state.active_room().cloned());
        replace_if_changed(self.set_messages, state.messages().to_vec());
        replace_if_changed(self.set_search_results, state.search_results().to_vec());
        replace_if_changed(self.set_connection, state.connection());
    }

    fn notice(&self, notice: Notice) {
        self.app.show_notice(notice);
    }
}

/// Only notifies subscribers when the value actually differs.
fn replace_if_changed<T>(signal: WriteSignal<T>, value: T)
where
    T: PartialEq + Send + Sync + 'static,
{
    signal.maybe_update(|current| {
        if *current == value {
            return false;
        }
        *current = value;
        true
    });
}
