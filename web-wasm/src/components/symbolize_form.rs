//! 入力フォームコンポーネント

use crash_symbolizer_common::{submit, Arch, InputMethod, Msg};
use leptos::ev::SubmitEvent;
use leptos::html;
use leptos::prelude::*;
use log::info;
use wasm_bindgen_futures::spawn_local;

use crate::api::{FetchTransport, GlooTimer};
use crate::components::upload_area::UploadArea;
use crate::poller;
use crate::state::{FormState, SignalHandle};

#[component]
pub fn SymbolizeForm(
    state: FormState,
    file_input: NodeRef<html::Input>,
    logs_pane: NodeRef<html::Pre>,
) -> impl IntoView {
    let t = move |msg: Msg| state.with(|c| c.text(msg));
    let is_method = move |method: InputMethod| state.with(|c| c.input_method() == method);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if state.with_untracked(|c| c.is_processing() || !c.validate().is_valid()) {
            return;
        }

        let crash_file = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let transport = FetchTransport::new().with_crash_file(crash_file);

        let poll_token = poller::start(state, logs_pane);
        spawn_local(async move {
            let outcome = submit(&SignalHandle(state), &transport, &GlooTimer).await;
            info!("symbolize finished: {:?}", outcome);
            poller::stop(poll_token);
        });
    };

    view! {
        <form id="symbolizeForm" class="card symbolize-form" on:submit=on_submit>
            <div class="form-group">
                <label for="version">{move || t(Msg::VersionLabel)}</label>
                <input
                    type="text"
                    id="version"
                    name="version"
                    placeholder=move || t(Msg::VersionPlaceholder)
                    prop:value=move || state.with(|c| c.fields().version.clone())
                    on:input=move |ev| state.update(|c| c.set_version(event_target_value(&ev)))
                />
                <Show when=move || state.with(|c| c.version_hint().is_some())>
                    <p class="field-hint">
                        {move || state.with(|c| c.version_hint().unwrap_or_default())}
                    </p>
                </Show>
            </div>

            <div class="form-group">
                <label for="arch">{move || t(Msg::ArchLabel)}</label>
                <select
                    id="arch"
                    name="arch"
                    on:change=move |ev| state.update(|c| c.set_arch_value(&event_target_value(&ev)))
                >
                    <option value="" selected=move || state.with(|c| c.fields().arch.is_none())>
                        {move || t(Msg::ArchPlaceholder)}
                    </option>
                    <option
                        value=Arch::Arm64.as_str()
                        selected=move || state.with(|c| c.fields().arch == Some(Arch::Arm64))
                    >
                        "arm64 (Apple Silicon)"
                    </option>
                    <option
                        value=Arch::X86.as_str()
                        selected=move || state.with(|c| c.fields().arch == Some(Arch::X86))
                    >
                        "x86_64 (Intel)"
                    </option>
                </select>
            </div>

            <div class="form-group form-check">
                <label>
                    <input
                        type="checkbox"
                        id="isNDI"
                        name="isNDI"
                        prop:checked=move || state.with(|c| c.fields().ndi)
                        on:change=move |ev| state.update(|c| c.set_ndi(event_target_checked(&ev)))
                    />
                    " "
                    {move || t(Msg::NdiLabel)}
                </label>
            </div>

            <div class="form-group">
                <label>{move || t(Msg::InputMethodLabel)}</label>
                <div class="radio-group">
                    <label>
                        <input
                            type="radio"
                            name="inputMethod"
                            value=InputMethod::Text.as_str()
                            prop:checked=move || is_method(InputMethod::Text)
                            on:change=move |_| state.update(|c| c.switch_input_method(InputMethod::Text))
                        />
                        " "
                        {move || t(Msg::InputText)}
                    </label>
                    <label>
                        <input
                            type="radio"
                            name="inputMethod"
                            value=InputMethod::File.as_str()
                            prop:checked=move || is_method(InputMethod::File)
                            on:change=move |_| state.update(|c| c.switch_input_method(InputMethod::File))
                        />
                        " "
                        {move || t(Msg::InputFile)}
                    </label>
                </div>
            </div>

            <div
                id="textInputSection"
                class="form-group"
                style=move || if is_method(InputMethod::Text) { "" } else { "display: none" }
            >
                <label for="stack_content">{move || t(Msg::StackLabel)}</label>
                <textarea
                    id="stack_content"
                    name="stack_content"
                    rows="12"
                    placeholder=move || t(Msg::StackPlaceholder)
                    prop:value=move || state.with(|c| c.fields().stack_content.clone())
                    on:input=move |ev| state.update(|c| c.set_stack_content(event_target_value(&ev)))
                ></textarea>
            </div>

            <div
                id="fileInputSection"
                class="form-group"
                style=move || if is_method(InputMethod::File) { "" } else { "display: none" }
            >
                <UploadArea state=state file_input=file_input />
            </div>

            <div class="form-actions">
                <button
                    type="submit"
                    id="symbolizeBtn"
                    class="btn btn-primary"
                    disabled=move || !state.with(|c| c.submit_control().enabled)
                    title=move || state.with(|c| c.submit_control().tooltip(c.lang()))
                >
                    <i class=move || {
                        if state.with(|c| c.submit_control().busy) {
                            "fas fa-spinner fa-spin"
                        } else {
                            "octicon octicon-play"
                        }
                    }></i>
                    " "
                    <span>{move || state.with(|c| c.submit_control().label(c.lang()))}</span>
                </button>
                <button
                    type="button"
                    id="clearBtn"
                    class="btn btn-secondary"
                    on:click=move |_| state.update(|c| c.clear_results())
                >
                    {move || t(Msg::Clear)}
                </button>
            </div>
        </form>
    }
}
