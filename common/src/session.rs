//! 送信ライフサイクルとログポーリング
//!
//! コントローラの借用は `.await` をまたがない。ホストごとの状態の置き場所
//! （Leptos のシグナル、RefCell）は `ControllerHandle` で吸収する。

use std::cell::RefCell;

use log::{debug, warn};

use crate::controller::{FormController, SubmitOutcome, RESULT_TAB_DELAY};
use crate::transport::{Timer, Transport};
use crate::types::OutputTab;

/// コントローラへの可変アクセス
pub trait ControllerHandle {
    fn update<R>(&self, f: impl FnOnce(&mut FormController) -> R) -> R;

    fn read<R>(&self, f: impl FnOnce(&FormController) -> R) -> R {
        self.update(|controller| f(controller))
    }
}

impl ControllerHandle for RefCell<FormController> {
    fn update<R>(&self, f: impl FnOnce(&mut FormController) -> R) -> R {
        f(&mut self.borrow_mut())
    }

    fn read<R>(&self, f: impl FnOnce(&FormController) -> R) -> R {
        f(&self.borrow())
    }
}

/// 送信1回分を最後まで実行する
///
/// 1. `begin_submit`（処理中なら何もせず `Skipped`）
/// 2. `/symbolize` 呼び出し
/// 3. `finish_submit` で結果を反映し処理中を解除
/// 4. `RESULT_TAB_DELAY` 待って結果タブへ切り替え
pub async fn submit<H, T, S>(handle: &H, transport: &T, timer: &S) -> SubmitOutcome
where
    H: ControllerHandle + ?Sized,
    T: Transport + ?Sized,
    S: Timer + ?Sized,
{
    let Some(request) = handle.update(|c| c.begin_submit()) else {
        return SubmitOutcome::Skipped;
    };

    let response = transport.symbolize(&request).await;
    let outcome = handle.update(|c| c.finish_submit(response));

    timer.sleep(RESULT_TAB_DELAY).await;
    handle.update(|c| c.switch_output_tab(OutputTab::Result));
    outcome
}

/// ポーリング1回分
///
/// 処理中でなければ何もしない。取得に失敗してもログに残すだけで状態は変えない。
/// ログエリアを更新したら true（ホストは末尾までスクロールする）。
pub async fn poll_logs_once<H, T>(handle: &H, transport: &T) -> bool
where
    H: ControllerHandle + ?Sized,
    T: Transport + ?Sized,
{
    if !handle.read(|c| c.is_processing()) {
        return false;
    }

    match transport.fetch_logs().await {
        Ok(logs) => {
            let updated = handle.update(|c| c.apply_polled_logs(&logs));
            if updated {
                debug!("logs pane refreshed from poll");
            }
            updated
        }
        Err(err) => {
            warn!("failed to fetch logs: {}", err);
            false
        }
    }
}
