//! ヘッダーコンポーネント（タイトルと言語切替）

use crash_symbolizer_common::{Lang, Msg};
use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::state::FormState;
use crate::storage::BrowserLanguageStore;

#[component]
pub fn Header(state: FormState) -> impl IntoView {
    let t = move |msg: Msg| state.with(|c| c.text(msg));

    view! {
        <header class="header">
            <div class="header-title">
                <h1>{move || t(Msg::PageTitle)}</h1>
                <p class="text-muted">{move || t(Msg::HeaderSubtitle)}</p>
            </div>
            // メニュー内のクリックは外側の「閉じる」まで伝えない
            <div class="lang-switcher" on:click=|ev: MouseEvent| ev.stop_propagation()>
                <button
                    type="button"
                    id="langSwitch"
                    class="btn btn-secondary btn-small"
                    on:click=move |_| state.update(|c| c.toggle_language_menu())
                >
                    <span id="currentLang">{move || state.with(|c| c.lang().display_name())}</span>
                </button>
                <div
                    id="langDropdown"
                    class="lang-dropdown"
                    class:show=move || state.with(|c| c.is_lang_menu_open())
                >
                    <LangOption state=state lang=Lang::Zh />
                    <LangOption state=state lang=Lang::En />
                </div>
            </div>
        </header>
    }
}

#[component]
fn LangOption(state: FormState, lang: Lang) -> impl IntoView {
    let on_click = move |ev: MouseEvent| {
        ev.prevent_default();
        state.update(|c| c.switch_language(lang, &BrowserLanguageStore));
    };

    view! {
        <a
            href="#"
            class="lang-option"
            class:active=move || state.with(|c| c.lang() == lang)
            data-lang=lang.code()
            on:click=on_click
        >
            <span class="lang-flag">{lang.flag()}</span>
            <span>{lang.display_name()}</span>
        </a>
    }
}
