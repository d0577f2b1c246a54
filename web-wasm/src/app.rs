//! メインアプリケーションコンポーネント

use crash_symbolizer_common::FormController;
use leptos::html;
use leptos::prelude::*;

use crate::browser::apply_document_language;
use crate::components::{
    header::Header,
    notifications::Notifications,
    output_panel::OutputPanel,
    symbolize_form::SymbolizeForm,
};
use crate::storage::BrowserLanguageStore;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // 保存済みの言語で初期化（なければ中国語）
    let state = RwSignal::new(FormController::from_store(&BrowserLanguageStore));
    let file_input: NodeRef<html::Input> = NodeRef::new();
    let logs_pane: NodeRef<html::Pre> = NodeRef::new();

    Effect::new(move |_| {
        let lang = state.with(|c| c.lang());
        apply_document_language(lang);
    });

    // 言語メニューの外側をクリックしたら閉じる
    let on_outside_click = move |_| {
        if state.with_untracked(|c| c.is_lang_menu_open()) {
            state.update(|c| c.close_language_menu());
        }
    };

    view! {
        <div class="container" on:click=on_outside_click>
            <Header state=state />

            <Notifications state=state />

            <main class="main-grid">
                <SymbolizeForm state=state file_input=file_input logs_pane=logs_pane />
                <OutputPanel state=state logs_pane=logs_pane />
            </main>
        </div>
    }
}
