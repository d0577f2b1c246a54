//! アップロードエリアコンポーネント

use crash_symbolizer_common::{Msg, SelectedFile};
use leptos::ev::{DragEvent, MouseEvent};
use leptos::html;
use leptos::prelude::*;
use web_sys::FileList;

use crate::state::FormState;

fn display(visible: bool, shown: &'static str) -> &'static str {
    if visible {
        shown
    } else {
        "display: none"
    }
}

/// クラッシュファイルのドロップ・選択エリア
///
/// 選んだファイルの実体は `file_input` が持ち、コントローラには名前とサイズだけ渡す。
/// ドロップしたファイルも `file_input` に差し込んでおき、送信時はそこから取り出す。
#[component]
pub fn UploadArea(state: FormState, file_input: NodeRef<html::Input>) -> impl IntoView {
    let t = move |msg: Msg| state.with(|c| c.text(msg));

    // 解除・入力方式の切り替えでファイルが外れたら input も空にする
    Effect::new(move |_| {
        let has_file = state.with(|c| c.fields().file.is_some());
        if !has_file {
            if let Some(input) = file_input.get_untracked() {
                input.set_value("");
            }
        }
    });

    let accept_files = move |files: &FileList| {
        if let Some(file) = files.get(0) {
            let selected = SelectedFile::new(file.name(), file.size() as u64);
            state.update(|c| {
                c.select_file(selected);
            });
        }
    };

    let on_change = move |_| {
        if let Some(files) = file_input.get_untracked().and_then(|input| input.files()) {
            accept_files(&files);
        }
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        state.update(|c| c.set_drag_over(false));

        let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) else {
            return;
        };
        if files.length() == 0 {
            return;
        }
        if let Some(input) = file_input.get_untracked() {
            input.set_files(Some(&files));
        }
        accept_files(&files);
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !state.with_untracked(|c| c.is_drag_over()) {
            state.update(|c| c.set_drag_over(true));
        }
    };

    let on_dragleave = move |ev: DragEvent| {
        ev.prevent_default();
        state.update(|c| c.set_drag_over(false));
    };

    let on_browse = move |ev: MouseEvent| {
        ev.prevent_default();
        if let Some(input) = file_input.get_untracked() {
            input.click();
        }
    };

    let on_remove = move |ev: MouseEvent| {
        ev.stop_propagation();
        state.update(|c| c.remove_file());
    };

    view! {
        <div
            id="fileUploadArea"
            class="file-upload-area"
            class:dragover=move || state.with(|c| c.is_drag_over())
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
        >
            <input
                type="file"
                id="crash_file"
                name="crash_file"
                accept=".ips,.crash,.txt,.log"
                style="display: none"
                node_ref=file_input
                on:change=on_change
            />
            <div
                class="file-upload-content"
                style=move || display(state.with(|c| c.is_upload_prompt_visible()), "")
                on:click=on_browse
            >
                <div class="upload-icon">"📄"</div>
                <p>{move || t(Msg::UploadPrompt)}</p>
                <p class="text-muted">{move || t(Msg::UploadHint)}</p>
            </div>
            <div
                id="fileInfo"
                class="file-info"
                style=move || display(state.with(|c| c.fields().file.is_some()), "display: flex")
            >
                <span id="fileName">{move || state.with(|c| c.file_label().unwrap_or_default())}</span>
                <button
                    type="button"
                    class="btn-remove"
                    title=move || t(Msg::RemoveFile)
                    on:click=on_remove
                >
                    "✕"
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_style() {
        assert_eq!(display(true, "display: flex"), "display: flex");
        assert_eq!(display(true, ""), "");
        assert_eq!(display(false, "display: flex"), "display: none");
    }
}
