mod api;
mod components;
mod config;
mod state;
mod storage;
mod ws;

use leptos::mount::mount_to_body;
use leptos::prelude::*;
use leptos_router::components::Router;

use components::shell::Shell;
use state::AppState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    AppState::provide();

    view! {
        <Router>
            <Shell />
        </Router>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
