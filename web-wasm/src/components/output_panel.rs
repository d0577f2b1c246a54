//! 出力パネル（結果・ログのタブと操作ボタン）

use crash_symbolizer_common::{copy_with_fallback, CopyStrategy, Msg, OutputTab};
use leptos::html;
use leptos::prelude::*;
use log::error;
use wasm_bindgen_futures::spawn_local;

use crate::browser::{download_text, ExecCommandCopy, NavigatorClipboard};
use crate::components::progress_bar::ProgressBar;
use crate::state::FormState;

#[component]
pub fn OutputPanel(state: FormState, logs_pane: NodeRef<html::Pre>) -> impl IntoView {
    let t = move |msg: Msg| state.with(|c| c.text(msg));
    let is_tab = move |tab: OutputTab| state.with(|c| c.output_tab() == tab);

    let on_copy = move |_| {
        let text = state.with_untracked(|c| c.active_pane_text().to_string());
        spawn_local(async move {
            let chain: [&dyn CopyStrategy; 2] = [&NavigatorClipboard, &ExecCommandCopy];
            let copied = copy_with_fallback(&chain, &text).await.is_ok();
            state.update(|c| {
                c.report_copy(copied);
            });
        });
    };

    let on_download = move |_| {
        let (file_name, text) = state.with_untracked(|c| c.download_artifact());
        match download_text(file_name, &text) {
            Ok(()) => state.update(|c| {
                c.report_download(file_name);
            }),
            Err(err) => error!("download of {} failed: {}", file_name, err),
        }
    };

    view! {
        <section class="card output-panel">
            <div class="output-header">
                <h2>{move || t(Msg::OutputTitle)}</h2>
                <div class="output-actions">
                    <button type="button" id="copyBtn" class="btn btn-secondary btn-small" on:click=on_copy>
                        {move || t(Msg::Copy)}
                    </button>
                    <button type="button" id="downloadBtn" class="btn btn-secondary btn-small" on:click=on_download>
                        {move || t(Msg::Download)}
                    </button>
                </div>
            </div>

            <ProgressBar state=state />

            <div class="output-tabs">
                <TabButton state=state tab=OutputTab::Result />
                <TabButton state=state tab=OutputTab::Logs />
            </div>

            <div id="result-output" class="output-content" class:active=move || is_tab(OutputTab::Result)>
                <pre id="symbolizeResult" class="output-code">
                    {move || state.with(|c| c.result_text().to_string())}
                </pre>
            </div>
            <div id="logs-output" class="output-content" class:active=move || is_tab(OutputTab::Logs)>
                <pre id="symbolizeLogs" class="output-code" node_ref=logs_pane>
                    {move || state.with(|c| c.logs_text().to_string())}
                </pre>
            </div>
        </section>
    }
}

#[component]
fn TabButton(state: FormState, tab: OutputTab) -> impl IntoView {
    view! {
        <button
            type="button"
            class="btn-tab"
            class:active=move || state.with(|c| c.output_tab() == tab)
            data-tab=tab.as_str()
            on:click=move |_| state.update(|c| c.switch_output_tab(tab))
        >
            {move || state.with(|c| c.text(Msg::tab_label(tab)))}
        </button>
    }
}
