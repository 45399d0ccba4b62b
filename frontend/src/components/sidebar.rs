use chatmind::models::{Room, User};
use leptos::ev;
use leptos::prelude::*;

use crate::components::initials;
use crate::state::ChatHandle;

/// Signed-in user, user search, and the room list.
#[component]
pub fn Sidebar() -> impl IntoView {
    let chat = expect_context::<ChatHandle>();
    let (query, set_query) = signal(String::new());
    let name = chat.me.with_value(|me| me.name.clone());

    let search = move || chat.search(query.get_untracked());

    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <span class="avatar">{initials(&name)}</span>
                <h2>{name}</h2>
            </div>
            <div class="search">
                <input
                    placeholder="Search users"
                    prop:value=query
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                    on:keydown=move |ev: ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            search();
                        }
                    }
                />
                <button on:click=move |_| search()>"Search"</button>
            </div>
            <div class="search-results">
                <For each=move || chat.search_results.get() key=|user| user.id let:user>
                    <SearchResult user=user />
                </For>
            </div>
            <h3>"Your Chats"</h3>
            <div class="conversation-list">
                {move || {
                    if chat.rooms.with(Vec::is_empty) {
                        view! { <div class="muted">"No chats yet"</div> }.into_any()
                    } else {
                        view! {
                            <For each=move || chat.rooms.get() key=|room| room.id let:room>
                                <RoomItem room=room />
                            </For>
                        }
                            .into_any()
                    }
                }}
            </div>
        </aside>
    }
}

#[component]
fn SearchResult(user: User) -> impl IntoView {
    let chat = expect_context::<ChatHandle>();
    let name = user.name.clone();
    let email = user.email.clone().unwrap_or_default();

    view! {
        <div class="search-result">
            <span class="avatar">{initials(&name)}</span>
            <div class="search-result-text">
                <div>{name}</div>
                <div class="muted">{email}</div>
            </div>
            <button on:click=move |_| chat.start_direct(user.clone())>"Chat"</button>
        </div>
    }
}

#[component]
fn RoomItem(room: Room) -> impl IntoView {
    let chat = expect_context::<ChatHandle>();
    let id = room.id;
    let label = room.display_name().to_string();
    let kind = room.kind.as_str();

    view! {
        <div
            class="conversation-item"
            class:active=move || chat.active_room.with(|r| r.as_ref().map(|r| r.id) == Some(id))
            on:click=move |_| chat.select_room(room.clone())
        >
            <span>{label}</span>
            <span class="badge">{kind}</span>
        </div>
    }
}
