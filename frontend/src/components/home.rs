use chatmind::routes::{LOGIN_PATH, SIGNUP_PATH};
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <section class="hero">
            <h1>"ChatMind"</h1>
            <p>"Real-time chat with direct messages and groups"</p>
            <div class="hero-actions">
                <A href=LOGIN_PATH>"Login"</A>
                <A href=SIGNUP_PATH attr:class="primary">"Sign Up"</A>
            </div>
        </section>
    }
}
