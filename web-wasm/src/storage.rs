//! 表示言語の保存先（localStorage）

use crash_symbolizer_common::{Lang, LanguageStore, LANGUAGE_STORAGE_KEY};
use log::warn;

/// `localStorage["app-language"]` に言語コードをそのまま保存する
#[derive(Clone, Copy, Default)]
pub struct BrowserLanguageStore;

impl LanguageStore for BrowserLanguageStore {
    fn load(&self) -> Option<Lang> {
        let raw = local_storage()?
            .get_item(LANGUAGE_STORAGE_KEY)
            .ok()
            .flatten()?;
        Some(Lang::from_stored(Some(&raw)))
    }

    fn save(&self, lang: Lang) {
        let Some(storage) = local_storage() else {
            warn!("localStorage unavailable, language not persisted");
            return;
        };
        if let Err(err) = storage.set_item(LANGUAGE_STORAGE_KEY, lang.code()) {
            warn!("failed to persist language: {:?}", err);
        }
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_language_round_trips_through_local_storage() {
        let store = BrowserLanguageStore;
        store.save(Lang::En);
        assert_eq!(store.load(), Some(Lang::En));

        let raw = local_storage()
            .and_then(|s| s.get_item(LANGUAGE_STORAGE_KEY).ok().flatten());
        assert_eq!(raw.as_deref(), Some("en"));
    }

    #[wasm_bindgen_test]
    fn wasm_unknown_stored_value_falls_back_to_chinese() {
        let storage = local_storage().expect("localStorage");
        storage.set_item(LANGUAGE_STORAGE_KEY, "fr").expect("set_item");
        assert_eq!(BrowserLanguageStore.load(), Some(Lang::Zh));
    }
}
