use chatmind::live::ConnectionState;
use chatmind::models::Message;
use chatmind::service::SendOutcome;
use leptos::ev;
use leptos::prelude::*;

use crate::components::sidebar::Sidebar;
use crate::state::{AppState, ChatHandle};

/// Protected page. The shell only renders it while a session exists.
#[component]
pub fn ChatPage() -> impl IntoView {
    let app = expect_context::<AppState>();
    let Some(session) = app.session.get_untracked() else {
        return ().into_any();
    };

    let chat = ChatHandle::mount(app, session);
    chat.load_rooms();

    view! {
        <div class="chat-layout">
            <Sidebar />
            <ChatArea />
        </div>
    }
    .into_any()
}

/// Header, message history, and input for the selected room.
#[component]
fn ChatArea() -> impl IntoView {
    let chat = expect_context::<ChatHandle>();

    view! {
        <main class="chat-area">
            {move || match chat.active_room.get() {
                None => {
                    view! {
                        <div class="empty-state">"Select a chat or search for someone to start"</div>
                    }
                        .into_any()
                }
                Some(room) => {
                    view! {
                        <div class="chat-header">
                            <span class="room-name">{room.display_name().to_string()}</span>
                            <span class="badge">{room.kind.as_str()}</span>
                            <ConnectionBadge />
                            <button
                                class="close-room"
                                title="Close chat"
                                on:click=move |_| chat.close_room()
                            >
                                "×"
                            </button>
                        </div>
                        <div class="messages-container">
                            <For each=move || chat.messages.get() key=|m| m.id let:msg>
                                <MessageBubble message=msg />
                            </For>
                        </div>
                        <ChatInput />
                    }
                        .into_any()
                }
            }}
        </main>
    }
}

#[component]
fn ConnectionBadge() -> impl IntoView {
    let chat = expect_context::<ChatHandle>();

    let label = move || match chat.connection.get() {
        ConnectionState::Open => "live",
        ConnectionState::Connecting => "connecting…",
        ConnectionState::Closed => "offline",
    };

    view! { <span class="connection" class:live=move || label() == "live">{label}</span> }
}

#[component]
fn MessageBubble(message: Message) -> impl IntoView {
    let chat = expect_context::<ChatHandle>();
    let mine = chat.me.with_value(|me| message.is_from(me));
    let css_class = if mine { "message mine" } else { "message theirs" };
    let time = message.time_label();

    view! {
        <div class=css_class>
            <div>{message.content}</div>
            {time.map(|t| view! { <div class="timestamp">{t}</div> })}
        </div>
    }
}

/// The input is cleared only once the backend accepted the message.
#[component]
fn ChatInput() -> impl IntoView {
    let chat = expect_context::<ChatHandle>();
    let (input, set_input) = signal(String::new());
    let (sending, set_sending) = signal(false);

    let send = move || {
        if sending.get_untracked() || input.with_untracked(|t| t.trim().is_empty()) {
            return;
        }
        set_sending.set(true);
        chat.send(input.get_untracked(), move |outcome| {
            set_sending.set(false);
            if outcome == SendOutcome::Sent {
                set_input.set(String::new());
            }
        });
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    view! {
        <div class="input-area">
            <div class="input-row">
                <textarea
                    rows="1"
                    placeholder="Type a message… (Enter to send, Shift+Enter for newline)"
                    prop:value=input
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button
                    class="send-btn"
                    on:click=move |_| send()
                    disabled=move || sending.get() || input.with(|t| t.trim().is_empty())
                >
                    {move || if sending.get() { "Sending…" } else { "Send" }}
                </button>
            </div>
        </div>
    }
}
