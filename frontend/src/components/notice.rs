use chatmind::models::NoticeLevel;
use leptos::prelude::*;

use crate::state::AppState;

fn notice_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "notice info",
        NoticeLevel::Success => "notice success",
        NoticeLevel::Error => "notice error",
    }
}

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let state = expect_context::<AppState>();

    move || {
        state.notice.with(|slot| slot.current().cloned()).map(|notice| {
            let class = notice_class(notice.level);
            view! { <div class=class role="status">{notice.text}</div> }
        })
    }
}
