use chatmind::models::Notice;
use chatmind::routes::{CHAT_PATH, FORGOT_PATH, LOGIN_PATH, SIGNUP_PATH};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::state::AppState;

#[component]
pub fn LoginPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        let navigate = navigate.clone();
        state.login(email.get_untracked(), password.get_untracked(), move |ok| {
            set_busy.set(false);
            if ok {
                navigate(CHAT_PATH, Default::default());
            }
        });
    };

    view! {
        <form class="auth-card" on:submit=on_submit>
            <h2>"Login"</h2>
            <input
                type="email"
                placeholder="Email"
                prop:value=email
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Password"
                prop:value=password
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit" class="primary" disabled=move || busy.get()>
                {move || if busy.get() { "Logging in…" } else { "Login" }}
            </button>
            <div class="auth-links">
                <A href=FORGOT_PATH>"Forgot password?"</A>
                <A href=SIGNUP_PATH>"Create an account"</A>
            </div>
        </form>
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        let navigate = navigate.clone();
        state.signup(
            name.get_untracked(),
            email.get_untracked(),
            password.get_untracked(),
            move |ok| {
                set_busy.set(false);
                if ok {
                    navigate(LOGIN_PATH, Default::default());
                }
            },
        );
    };

    view! {
        <form class="auth-card" on:submit=on_submit>
            <h2>"Sign Up"</h2>
            <input
                placeholder="Name"
                prop:value=name
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <input
                type="email"
                placeholder="Email"
                prop:value=email
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Password"
                prop:value=password
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit" class="primary" disabled=move || busy.get()>
                "Create account"
            </button>
            <div class="auth-links">
                <A href=LOGIN_PATH>"Already have an account? Login"</A>
            </div>
        </form>
    }
}

/// Placeholder flow; no request is made.
#[component]
pub fn ForgotPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (email, set_email) = signal(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if email.with_untracked(|e| e.trim().is_empty()) {
            state.show_notice(Notice::error("Please enter your email"));
            return;
        }
        state.show_notice(Notice::success("If that email is registered, a reset link is on its way."));
    };

    view! {
        <form class="auth-card" on:submit=on_submit>
            <h2>"Reset password"</h2>
            <input
                type="email"
                placeholder="Email"
                prop:value=email
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <button type="submit" class="primary">"Send reset link"</button>
            <div class="auth-links">
                <A href=LOGIN_PATH>"Back to login"</A>
            </div>
        </form>
    }
}
