use chatmind::routes::{HOME_PATH, LOGIN_PATH, Resolution, RouteTable, SIGNUP_PATH, View};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::auth::{ForgotPage, LoginPage, SignupPage};
use crate::components::chat::ChatPage;
use crate::components::home::HomePage;
use crate::components::initials;
use crate::components::notice::NoticeBanner;
use crate::state::AppState;

/// Header, notice banner, and whichever page the current path resolves to.
#[component]
pub fn Shell() -> impl IntoView {
    let state = expect_context::<AppState>();
    let location = use_location();
    let navigate = use_navigate();
    let routes = RouteTable::standard();

    let resolution = Memo::new(move |_| {
        let has_session = state.session.with(Option::is_some);
        location.pathname.with(|path| routes.resolve(path, has_session))
    });

    Effect::new(move |_| {
        if let Resolution::Redirect(target) = resolution.get() {
            navigate(target, NavigateOptions { replace: true, ..Default::default() });
        }
    });

    view! {
        <div class="app-container">
            <Header />
            <NoticeBanner />
            <div class="content">
                {move || match resolution.get() {
                    Resolution::Render(View::Home) => view! { <HomePage /> }.into_any(),
                    Resolution::Render(View::Login) => view! { <LoginPage /> }.into_any(),
                    Resolution::Render(View::Signup) => view! { <SignupPage /> }.into_any(),
                    Resolution::Render(View::Forgot) => view! { <ForgotPage /> }.into_any(),
                    Resolution::Render(View::Chat) => view! { <ChatPage /> }.into_any(),
                    Resolution::Redirect(_) => ().into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn Header() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    view! {
        <header class="app-header">
            <A href=HOME_PATH attr:class="brand">"ChatMind"</A>
            {move || match state.session.get() {
                Some(session) => {
                    let navigate = navigate.clone();
                    let on_logout = move |_| {
                        state.logout();
                        navigate(HOME_PATH, Default::default());
                    };
                    view! {
                        <div class="header-user">
                            <span class="avatar">{initials(&session.user.name)}</span>
                            <span>{session.user.name}</span>
                            <button on:click=on_logout>"Logout"</button>
                        </div>
                    }
                        .into_any()
                }
                None => {
                    view! {
                        <div class="header-actions">
                            <A href=LOGIN_PATH>"Login"</A>
                            <A href=SIGNUP_PATH attr:class="primary">"Sign Up"</A>
                        </div>
                    }
                        .into_any()
                }
            }}
        </header>
    }
}
