//! コントローラをシグナルに載せる

use crash_symbolizer_common::{ControllerHandle, FormController};
use leptos::prelude::*;

/// 画面全体で共有するフォーム状態
pub type FormState = RwSignal<FormController>;

/// 非同期処理（送信・ポーリング）からシグナル越しにコントローラを触る
#[derive(Clone, Copy)]
pub struct SignalHandle(pub FormState);

impl ControllerHandle for SignalHandle {
    fn update<R>(&self, f: impl FnOnce(&mut FormController) -> R) -> R {
        // ルートのシグナルはアプリ終了まで破棄されない
        self.0
            .try_update(f)
            .expect("form state signal disposed")
    }

    fn read<R>(&self, f: impl FnOnce(&FormController) -> R) -> R {
        self.0.with_untracked(f)
    }
}
