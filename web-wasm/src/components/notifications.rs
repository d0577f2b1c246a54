//! 通知バナー
//!
//! 表示から `NOTIFICATION_TTL` 経過するか閉じるボタンで消える。

use crash_symbolizer_common::{Notification, NOTIFICATION_TTL};
use gloo::timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::state::FormState;

#[component]
pub fn Notifications(state: FormState) -> impl IntoView {
    view! {
        <div id="messageContainer" class="message-container">
            <For
                each=move || state.with(|c| c.notifications().to_vec())
                key=|notice| notice.id
                children=move |notice| view! { <FlashMessage state=state notice=notice /> }
            />
        </div>
    }
}

#[component]
fn FlashMessage(state: FormState, notice: Notification) -> impl IntoView {
    let id = notice.id;
    schedule_dismiss(state, id);

    view! {
        <div class=format!("flash-message {}", notice.kind.as_str())>
            <i class=notice.kind.icon_class()></i>
            <span>{notice.message}</span>
            <button
                type="button"
                class="flash-close"
                on:click=move |_| state.update(|c| c.dismiss(id))
            >
                "×"
            </button>
        </div>
    }
}

/// `NOTIFICATION_TTL` 後に通知を閉じる
fn schedule_dismiss(state: FormState, id: u64) {
    spawn_local(async move {
        TimeoutFuture::new(NOTIFICATION_TTL.as_millis() as u32).await;
        state.update(|c| c.dismiss(id));
    });
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use crash_symbolizer_common::{FormController, Lang, NoticeKind};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn wasm_notice_dismissed_after_ttl() {
        let state = RwSignal::new(FormController::new(Lang::En));
        let id = state
            .try_update(|c| c.notify(NoticeKind::Info, "copied"))
            .unwrap();
        schedule_dismiss(state, id);

        // 期限前は残っている
        TimeoutFuture::new(NOTIFICATION_TTL.as_millis() as u32 - 500).await;
        assert_eq!(state.with_untracked(|c| c.notifications().len()), 1);

        TimeoutFuture::new(1000).await;
        assert!(state.with_untracked(|c| c.notifications().is_empty()));
    }
}
