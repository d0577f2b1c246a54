//! ブラウザ API まわりの小物
//!
//! クリップボード、テキストのダウンロード、`<html>` の言語属性。

use async_trait::async_trait;
use crash_symbolizer_common::{CopyStrategy, Lang, Msg};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, Document, HtmlAnchorElement, HtmlDocument, HtmlElement,
    HtmlTextAreaElement, Url,
};

fn document() -> Result<Document, String> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "document unavailable".to_string())
}

fn body(document: &Document) -> Result<HtmlElement, String> {
    document.body().ok_or_else(|| "document body unavailable".to_string())
}

fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// `navigator.clipboard.writeText`
pub struct NavigatorClipboard;

#[async_trait(?Send)]
impl CopyStrategy for NavigatorClipboard {
    fn name(&self) -> &'static str {
        "clipboard-api"
    }

    async fn copy(&self, text: &str) -> Result<(), String> {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let promise = window.navigator().clipboard().write_text(text);
        JsFuture::from(promise).await.map(|_| ()).map_err(js_error)
    }
}

/// 一時的な textarea を選択して `document.execCommand("copy")`
pub struct ExecCommandCopy;

#[async_trait(?Send)]
impl CopyStrategy for ExecCommandCopy {
    fn name(&self) -> &'static str {
        "exec-command"
    }

    async fn copy(&self, text: &str) -> Result<(), String> {
        let document = document()?;
        let body = body(&document)?;
        let textarea: HtmlTextAreaElement = document
            .create_element("textarea")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| "textarea cast failed".to_string())?;
        textarea.set_value(text);
        body.append_child(&textarea).map_err(js_error)?;
        textarea.select();

        let copied = document
            .dyn_ref::<HtmlDocument>()
            .ok_or_else(|| "execCommand unavailable".to_string())
            .and_then(|html| html.exec_command("copy").map_err(js_error));
        let _ = body.remove_child(&textarea);

        match copied? {
            true => Ok(()),
            false => Err("execCommand(\"copy\") returned false".to_string()),
        }
    }
}

/// テキストを `text/plain` の Blob にしてダウンロードさせる
pub fn download_text(file_name: &str, text: &str) -> Result<(), String> {
    let document = document()?;
    let body = body(&document)?;

    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let bag = BlobPropertyBag::new();
    bag.set_type("text/plain;charset=utf-8");
    let blob = Blob::new_with_str_sequence_and_options(parts.as_ref(), &bag).map_err(js_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| "anchor cast failed".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);

    let result = body.append_child(&anchor).map_err(js_error).map(|_| {
        anchor.click();
        let _ = body.remove_child(&anchor);
    });
    let _ = Url::revoke_object_url(&url);
    result
}

/// `<html lang>`・`data-lang`・タイトルを表示言語に合わせる
pub fn apply_document_language(lang: Lang) {
    let Ok(document) = document() else {
        return;
    };
    if let Some(root) = document.document_element() {
        let _ = root.set_attribute("lang", lang.html_lang());
        let _ = root.set_attribute("data-lang", lang.code());
    }
    document.set_title(Msg::PageTitle.text(lang));
}

pub fn scroll_to_bottom(element: &web_sys::Element) {
    element.set_scroll_top(element.scroll_height());
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_document_language_follows_lang() {
        apply_document_language(Lang::En);
        let document = document().expect("document");
        let root = document.document_element().expect("html");
        assert_eq!(root.get_attribute("lang").as_deref(), Some("en"));
        assert_eq!(root.get_attribute("data-lang").as_deref(), Some("en"));
        assert_eq!(document.title(), "MacCrash Auto Symbolizer");

        apply_document_language(Lang::Zh);
        assert_eq!(root.get_attribute("lang").as_deref(), Some("zh-CN"));
        assert_eq!(document.title(), "MacCrash 自动符号化工具");
    }

    #[wasm_bindgen_test]
    fn wasm_download_leaves_no_anchor_behind() {
        download_text("symbolize_result.txt", "SYM").expect("download");
        let document = document().expect("document");
        let anchors = document.get_elements_by_tag_name("a");
        assert_eq!(anchors.length(), 0);
    }
}
