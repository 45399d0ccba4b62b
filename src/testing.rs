//! Scripted stand-ins for the browser used by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use tokio::sync::oneshot;

use crate::api::{HttpRequest, HttpResponse, HttpTransport, Method};
use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::live::{EventSink, SocketConnector, SocketEvent, SocketHandle};
use crate::models::Notice;
use crate::service::{ChatObserver, ChatState};

pub const TEST_BASE: &str = "http://api.test";

pub fn test_config() -> ClientConfig {
    ClientConfig::new(TEST_BASE).unwrap()
}

pub fn api_url(path: &str) -> String {
    format!("{TEST_BASE}{path}")
}

type Route = (Method, String);

/// Replies are consumed in order per (method, url). Unscripted requests get
/// a 404.
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<HashMap<Route, VecDeque<Result<HttpResponse, String>>>>,
    gates: RefCell<HashMap<Route, oneshot::Receiver<()>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn reply(&self, method: Method, url: &str, status: u16, body: &str) {
        self.push(method, url, Ok(HttpResponse { status, body: body.to_string() }));
    }

    pub fn fail(&self, method: Method, url: &str, message: &str) {
        self.push(method, url, Err(message.to_string()));
    }

    /// The next request to `url` waits until the returned sender fires.
    pub fn gate(&self, method: Method, url: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert((method, url.to_string()), rx);
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn count(&self, method: Method, url: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }

    fn push(&self, method: Method, url: &str, reply: Result<HttpResponse, String>) {
        self.replies
            .borrow_mut()
            .entry((method, url.to_string()))
            .or_default()
            .push_back(reply);
    }
}

impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let route = (request.method, request.url.clone());
        self.requests.borrow_mut().push(request);

        let gate = self.gates.borrow_mut().remove(&route);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let reply = self
            .replies
            .borrow_mut()
            .get_mut(&route)
            .and_then(VecDeque::pop_front);
        match reply {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(ClientError::Network(message)),
            None => Ok(HttpResponse { status: 404, body: String::new() }),
        }
    }
}

/// Counts open sockets and remembers the highest number open at once.
#[derive(Default)]
pub struct MockConnector {
    urls: RefCell<Vec<String>>,
    sinks: RefCell<Vec<EventSink>>,
    live: Rc<Cell<usize>>,
    peak: Cell<usize>,
    refuse: Cell<bool>,
}

impl MockConnector {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn refuse_connections(&self, refuse: bool) {
        self.refuse.set(refuse);
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.urls.borrow().clone()
    }

    pub fn live_count(&self) -> usize {
        self.live.get()
    }

    pub fn peak_live(&self) -> usize {
        self.peak.get()
    }

    /// Delivers `event` to the sink of the `index`-th socket ever opened.
    pub fn emit(&self, index: usize, event: SocketEvent) {
        let sink = self.sinks.borrow()[index].clone();
        sink(event);
    }

    pub fn emit_latest(&self, event: SocketEvent) {
        let sink = self.sinks.borrow().last().cloned();
        if let Some(sink) = sink {
            sink(event);
        }
    }
}

impl SocketConnector for MockConnector {
    type Handle = MockSocket;

    fn connect(&self, url: &str, sink: EventSink) -> Result<MockSocket, ClientError> {
        if self.refuse.get() {
            return Err(ClientError::Connect {
                url: url.to_string(),
                message: "refused".into(),
            });
        }

        self.urls.borrow_mut().push(url.to_string());
        self.sinks.borrow_mut().push(sink);
        self.live.set(self.live.get() + 1);
        self.peak.set(self.peak.get().max(self.live.get()));

        Ok(MockSocket { live: self.live.clone(), closed: Cell::new(false) })
    }
}

pub struct MockSocket {
    live: Rc<Cell<usize>>,
    closed: Cell<bool>,
}

impl SocketHandle for MockSocket {
    fn close(&self) {
        if !self.closed.replace(true) {
            self.live.set(self.live.get() - 1);
        }
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    states: RefCell<Vec<ChatState>>,
    notices: RefCell<Vec<Notice>>,
}

impl RecordingObserver {
    pub fn last_state(&self) -> Option<ChatState> {
        self.states.borrow().last().cloned()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

impl ChatObserver for RecordingObserver {
    fn state_changed(&self, state: &ChatState) {
        self.states.borrow_mut().push(state.clone());
    }

    fn notice(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}
