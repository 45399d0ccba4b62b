use chatmind::ClientError;
use chatmind::live::{EventSink, SocketConnector, SocketEvent, SocketHandle};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserConnector;

/// A browser WebSocket together with the callbacks it was given. The
/// callbacks live exactly as long as the socket handle.
pub struct BrowserSocket {
    ws: WebSocket,
    _onopen: Closure<dyn Fn()>,
    _onmessage: Closure<dyn Fn(MessageEvent)>,
    _onclose: Closure<dyn Fn(CloseEvent)>,
    _onerror: Closure<dyn Fn()>,
}

impl SocketConnector for BrowserConnector {
    type Handle = BrowserSocket;

    fn connect(&self, url: &str, sink: EventSink) -> Result<BrowserSocket, ClientError> {
        let ws = WebSocket::new(url).map_err(|e| ClientError::Connect {
            url: url.to_string(),
            message: format!("{e:?}"),
        })?;

        let opened = sink.clone();
        let onopen = Closure::<dyn Fn()>::new(move || opened(SocketEvent::Opened));
        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));

        let frames = sink.clone();
        let onmessage = Closure::<dyn Fn(MessageEvent)>::new(move |ev: MessageEvent| {
            // binary frames are not part of the protocol
            if let Some(text) = ev.data().as_string() {
                frames(SocketEvent::Frame(text));
            }
        });
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

        let onclose = Closure::<dyn Fn(CloseEvent)>::new(move |ev: CloseEvent| {
            log::info!("WebSocket closed (code {})", ev.code());
            sink(SocketEvent::Closed);
        });
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        let onerror = Closure::<dyn Fn()>::new(move || {
            log::error!("WebSocket connection error");
        });
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        Ok(BrowserSocket {
            ws,
            _onopen: onopen,
            _onmessage: onmessage,
            _onclose: onclose,
            _onerror: onerror,
        })
    }
}

impl SocketHandle for BrowserSocket {
    /// Detaches the callbacks first so that nothing fires into freed closures.
    fn close(&self) {
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onclose(None);
        self.ws.set_onerror(None);
        if let Err(e) = self.ws.close() {
            log::warn!("Failed to close WebSocket: {e:?}");
        }
    }
}
