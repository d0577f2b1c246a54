//! 送信中のログポーリング
//!
//! 送信開始で `POLL_INTERVAL` ごとの `/logs` 取得を始め、送信完了で止める。
//! 実行中のインターバルは1つだけ保持し、差し替え・停止は drop で行う。
//! 停止は開始時のトークンが現在のものと一致するときだけ効く。

use std::cell::{Cell, RefCell};

use crash_symbolizer_common::{poll_logs_once, POLL_INTERVAL};
use gloo::timers::callback::Interval;
use gloo::timers::future::TimeoutFuture;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::FetchTransport;
use crate::browser::scroll_to_bottom;
use crate::state::{FormState, SignalHandle};

thread_local! {
    static ACTIVE: RefCell<Option<(PollerToken, Interval)>> = const { RefCell::new(None) };
    static NEXT_TOKEN: Cell<u64> = const { Cell::new(0) };
}

/// `start` ごとに払い出す世代番号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerToken(u64);

pub fn start(state: FormState, logs_pane: NodeRef<html::Pre>) -> PollerToken {
    let interval = Interval::new(POLL_INTERVAL.as_millis() as u32, move || {
        spawn_local(async move {
            let updated = poll_logs_once(&SignalHandle(state), &FetchTransport::new()).await;
            if updated {
                // 描画が終わってからスクロールする
                TimeoutFuture::new(0).await;
                if let Some(pane) = logs_pane.get_untracked() {
                    scroll_to_bottom(&pane);
                }
            }
        });
    });
    let token = NEXT_TOKEN.with(|next| {
        let id = next.get() + 1;
        next.set(id);
        PollerToken(id)
    });
    ACTIVE.with(|slot| *slot.borrow_mut() = Some((token, interval)));
    token
}

/// `token` のポーラーがまだ動いていれば止める
///
/// 後から始まった送信のポーラーには触らない。
pub fn stop(token: PollerToken) {
    ACTIVE.with(|slot| {
        let mut slot = slot.borrow_mut();
        if matches!(slot.as_ref(), Some((active, _)) if *active == token) {
            slot.take();
        }
    });
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use crash_symbolizer_common::{FormController, Lang};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn running_token() -> Option<PollerToken> {
        ACTIVE.with(|slot| slot.borrow().as_ref().map(|(token, _)| *token))
    }

    #[wasm_bindgen_test]
    fn wasm_stop_drops_interval() {
        let state = RwSignal::new(FormController::new(Lang::En));
        let token = start(state, NodeRef::new());
        assert_eq!(running_token(), Some(token));

        stop(token);
        assert_eq!(running_token(), None);
    }

    #[wasm_bindgen_test]
    fn wasm_stale_stop_keeps_newer_poller() {
        let state = RwSignal::new(FormController::new(Lang::En));
        let first = start(state, NodeRef::new());
        let second = start(state, NodeRef::new());
        assert_ne!(first, second);

        // 先の送信が遅れて終わっても後の送信のポーリングは続く
        stop(first);
        assert_eq!(running_token(), Some(second));

        stop(second);
        assert_eq!(running_token(), None);
    }
}
