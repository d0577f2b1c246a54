//! プログレスバーコンポーネント

use crash_symbolizer_common::Msg;
use leptos::prelude::*;

use crate::state::FormState;

/// 送信中だけ表示する不確定プログレスバー
#[component]
pub fn ProgressBar(state: FormState) -> impl IntoView {
    view! {
        <Show when=move || state.with(|c| c.is_progress_visible())>
            <div id="progressIndicator" class="progress-container">
                <div class="progress-bar">
                    <div class="progress-fill indeterminate" />
                </div>
                <p class="progress-text">{move || state.with(|c| c.text(Msg::Processing))}</p>
            </div>
        </Show>
    }
}
