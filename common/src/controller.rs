//! フォームコントローラ
//!
//! 画面の状態（入力方式・出力タブ・処理中フラグ・言語・出力エリア・通知）を
//! 1つの構造体で保持し、ユーザー操作とレスポンス処理をメソッドとして提供する。
//! 状態を変更する操作の後は必ずバリデーションを再実行する。
//!
//! 描画は持たない。Web版は Leptos のシグナル、ターミナル版は RefCell に入れて使う。

use std::time::Duration;

use log::debug;

use crate::i18n::{self, Msg};
use crate::protocol::{
    join_logs, CrashPayload, LogsResponse, SymbolizeRequest, SymbolizeResponse,
};
use crate::transport::TransportError;
use crate::types::{
    Arch, FormFields, InputMethod, Lang, NoticeKind, Notification, OutputTab, SelectedFile,
};
use crate::validation::{is_valid_version, validate_fields, Validation};

/// ログポーリング間隔
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);
/// 送信完了から結果タブへ切り替えるまでの待ち時間
pub const RESULT_TAB_DELAY: Duration = Duration::from_millis(500);
/// 通知バナーの表示時間
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);
/// 言語設定の保存キー
pub const LANGUAGE_STORAGE_KEY: &str = "app-language";

/// 言語設定の永続化先
pub trait LanguageStore {
    fn load(&self) -> Option<Lang>;
    fn save(&self, lang: Lang);
}

/// 送信1回分の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 処理中・入力不備のため送信しなかった
    Skipped,
    /// success=true
    Completed,
    /// success=false
    Failed,
    /// 通信またはパースの失敗
    TransportFailed,
}

/// 送信ボタンの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmitControl {
    pub enabled: bool,
    pub busy: bool,
    /// ツールチップに出す最初のエラー（None なら空）
    pub error: Option<Msg>,
}

impl SubmitControl {
    pub fn label(&self, lang: Lang) -> &'static str {
        if self.busy {
            Msg::SubmitBusy.text(lang)
        } else {
            Msg::SubmitIdle.text(lang)
        }
    }

    pub fn tooltip(&self, lang: Lang) -> &'static str {
        self.error.map(|msg| msg.text(lang)).unwrap_or("")
    }
}

#[derive(Debug, Clone)]
pub struct FormController {
    lang: Lang,
    input_method: InputMethod,
    output_tab: OutputTab,
    processing: bool,
    fields: FormFields,
    result_text: String,
    logs_text: String,
    submit: SubmitControl,
    progress_visible: bool,
    lang_menu_open: bool,
    drag_over: bool,
    notifications: Vec<Notification>,
    next_notification_id: u64,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(Lang::default())
    }
}

impl FormController {
    /// 初期状態（テキスト入力・結果タブ・出力エリアは空表示）
    pub fn new(lang: Lang) -> Self {
        let mut controller = Self {
            lang,
            input_method: InputMethod::Text,
            output_tab: OutputTab::Result,
            processing: false,
            fields: FormFields::default(),
            result_text: Msg::EmptyResult.text(lang).to_string(),
            logs_text: Msg::EmptyLogs.text(lang).to_string(),
            submit: SubmitControl::default(),
            progress_visible: false,
            lang_menu_open: false,
            drag_over: false,
            notifications: Vec::new(),
            next_notification_id: 1,
        };
        controller.refresh_validation();
        controller
    }

    /// 保存済みの言語設定で初期化（未保存なら中国語）
    pub fn from_store(store: &impl LanguageStore) -> Self {
        Self::new(store.load().unwrap_or_default())
    }

    // ------------------------------------------------------------
    // 参照
    // ------------------------------------------------------------

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn input_method(&self) -> InputMethod {
        self.input_method
    }

    pub fn output_tab(&self) -> OutputTab {
        self.output_tab
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn result_text(&self) -> &str {
        &self.result_text
    }

    pub fn logs_text(&self) -> &str {
        &self.logs_text
    }

    pub fn submit_control(&self) -> SubmitControl {
        self.submit
    }

    pub fn is_progress_visible(&self) -> bool {
        self.progress_visible
    }

    pub fn is_lang_menu_open(&self) -> bool {
        self.lang_menu_open
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn text(&self, msg: Msg) -> &'static str {
        msg.text(self.lang)
    }

    pub fn page_title(&self) -> &'static str {
        Msg::PageTitle.text(self.lang)
    }

    /// ファイル情報ラベル（未選択なら None）
    pub fn file_label(&self) -> Option<String> {
        self.fields.file.as_ref().map(SelectedFile::label)
    }

    /// アップロード案内を表示するか
    pub fn is_upload_prompt_visible(&self) -> bool {
        self.fields.file.is_none()
    }

    /// バージョン欄の入力ヒント（入力済みかつ形式不正のときだけ）
    pub fn version_hint(&self) -> Option<&'static str> {
        let version = self.fields.version.trim();
        if !version.is_empty() && !is_valid_version(version) {
            Some(Msg::VersionHint.text(self.lang))
        } else {
            None
        }
    }

    // ------------------------------------------------------------
    // 入力
    // ------------------------------------------------------------

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.fields.version = version.into();
        self.refresh_validation();
    }

    pub fn set_arch(&mut self, arch: Option<Arch>) {
        self.fields.arch = arch;
        self.refresh_validation();
    }

    /// `<select>` の値から設定（空・不明な値は未選択）
    pub fn set_arch_value(&mut self, value: &str) {
        self.set_arch(value.parse().ok());
    }

    pub fn set_stack_content(&mut self, content: impl Into<String>) {
        self.fields.stack_content = content.into();
        self.refresh_validation();
    }

    pub fn set_ndi(&mut self, ndi: bool) {
        self.fields.ndi = ndi;
        self.refresh_validation();
    }

    /// 入力方式を切り替え、もう一方の入力をクリアする
    pub fn switch_input_method(&mut self, method: InputMethod) {
        self.input_method = method;
        match method {
            InputMethod::Text => self.fields.file = None,
            InputMethod::File => self.fields.stack_content.clear(),
        }
        self.refresh_validation();
    }

    /// ファイルを受け付ける（テキスト入力中は無視して false）
    pub fn select_file(&mut self, file: SelectedFile) -> bool {
        if self.input_method != InputMethod::File {
            debug!("file ignored while text input is active: {}", file.name);
            return false;
        }
        debug!("file selected: {}", file.label());
        self.fields.file = Some(file);
        self.drag_over = false;
        self.refresh_validation();
        true
    }

    pub fn remove_file(&mut self) {
        self.fields.file = None;
        self.refresh_validation();
    }

    pub fn set_drag_over(&mut self, over: bool) {
        self.drag_over = over;
    }

    // ------------------------------------------------------------
    // バリデーション
    // ------------------------------------------------------------

    pub fn validate(&self) -> Validation {
        validate_fields(&self.fields, self.input_method)
    }

    /// 送信ボタンの有効/無効とツールチップを更新
    pub fn refresh_validation(&mut self) -> Validation {
        let validation = self.validate();
        self.submit.enabled = validation.is_valid() && !self.processing;
        self.submit.error = validation.error;
        validation
    }

    // ------------------------------------------------------------
    // 出力タブ
    // ------------------------------------------------------------

    pub fn switch_output_tab(&mut self, tab: OutputTab) {
        self.output_tab = tab;
    }

    /// 表示中タブの本文
    pub fn active_pane_text(&self) -> &str {
        match self.output_tab {
            OutputTab::Result => &self.result_text,
            OutputTab::Logs => &self.logs_text,
        }
    }

    /// ダウンロード用の (ファイル名, 本文)
    pub fn download_artifact(&self) -> (&'static str, String) {
        (
            self.output_tab.download_file_name(),
            self.active_pane_text().to_string(),
        )
    }

    // ------------------------------------------------------------
    // 送信
    // ------------------------------------------------------------

    /// 送信開始
    ///
    /// 処理中または入力不備なら何も変えずに None を返す。
    /// それ以外は処理中状態へ移り、送信内容を返す。
    pub fn begin_submit(&mut self) -> Option<SymbolizeRequest> {
        if self.processing {
            debug!("submit ignored: request already in flight");
            return None;
        }
        let request = self.build_request()?;

        self.processing = true;
        self.submit.busy = true;
        self.submit.enabled = false;
        self.progress_visible = true;
        self.output_tab = OutputTab::Logs;
        let processing = Msg::Processing.text(self.lang);
        self.result_text = processing.to_string();
        self.logs_text = processing.to_string();

        debug!(
            "submit started: version={} arch={} method={}",
            request.version,
            request.arch,
            self.input_method.as_str()
        );
        Some(request)
    }

    fn build_request(&mut self) -> Option<SymbolizeRequest> {
        if !self.refresh_validation().is_valid() {
            debug!("submit ignored: form is invalid");
            return None;
        }
        let arch = self.fields.arch?;
        let payload = match self.input_method {
            InputMethod::Text => CrashPayload::Stack(self.fields.stack_content.clone()),
            InputMethod::File => CrashPayload::File(self.fields.file.clone()?),
        };
        Some(SymbolizeRequest {
            version: self.fields.version.trim().to_string(),
            arch,
            ndi: self.fields.ndi,
            payload,
        })
    }

    /// 送信完了（成功・失敗・通信エラーのいずれでも呼ぶ）
    ///
    /// 結果タブへの切り替えは `RESULT_TAB_DELAY` 後にホスト側で行う。
    pub fn finish_submit(
        &mut self,
        outcome: Result<SymbolizeResponse, TransportError>,
    ) -> SubmitOutcome {
        let lang = self.lang;
        let result = match outcome {
            Ok(response) => {
                let result = if response.success {
                    // 空文字の出力は出力なしと同じ扱い
                    self.result_text = response
                        .output
                        .filter(|output| !output.is_empty())
                        .unwrap_or_else(|| Msg::NoOutput.text(lang).to_string());
                    self.notify(NoticeKind::Success, Msg::Completed.text(lang));
                    SubmitOutcome::Completed
                } else {
                    let error = response.error.as_deref().filter(|e| !e.is_empty());
                    self.result_text = i18n::failure_text(lang, error);
                    let notice = i18n::failure_notice(lang, error);
                    self.notify(NoticeKind::Error, notice);
                    SubmitOutcome::Failed
                };
                self.logs_text = join_logs(response.logs.as_deref())
                    .unwrap_or_else(|| Msg::NoLogs.text(lang).to_string());
                result
            }
            Err(err) => {
                log::error!("symbolize request failed: {}", err);
                let message = i18n::network_error_text(lang, &err.to_string());
                self.result_text = message.clone();
                self.logs_text = message.clone();
                self.notify(NoticeKind::Error, message);
                SubmitOutcome::TransportFailed
            }
        };

        self.processing = false;
        self.submit.busy = false;
        self.progress_visible = false;
        self.refresh_validation();
        debug!("submit finished: {:?}", result);
        result
    }

    /// ポーリングで取得したログを反映（反映したら true）
    pub fn apply_polled_logs(&mut self, response: &LogsResponse) -> bool {
        match response.joined() {
            Some(text) => {
                self.logs_text = text;
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------
    // 言語
    // ------------------------------------------------------------

    /// 言語を切り替えて保存する
    ///
    /// 出力エリアは空またはプレースホルダ表示のときだけ新しい言語の空表示に置き換える。
    pub fn switch_language(&mut self, lang: Lang, store: &impl LanguageStore) {
        self.lang = lang;
        store.save(lang);

        if i18n::is_empty_or_placeholder(&self.result_text, OutputTab::Result) {
            self.result_text = Msg::EmptyResult.text(lang).to_string();
        }
        if i18n::is_empty_or_placeholder(&self.logs_text, OutputTab::Logs) {
            self.logs_text = Msg::EmptyLogs.text(lang).to_string();
        }

        self.lang_menu_open = false;
        self.refresh_validation();
    }

    pub fn toggle_language_menu(&mut self) {
        self.lang_menu_open = !self.lang_menu_open;
    }

    pub fn close_language_menu(&mut self) {
        self.lang_menu_open = false;
    }

    // ------------------------------------------------------------
    // コピー・ダウンロード・クリア
    // ------------------------------------------------------------

    pub fn report_copy(&mut self, copied: bool) -> u64 {
        if copied {
            let message = self.text(Msg::Copied);
            self.notify(NoticeKind::Success, message)
        } else {
            let message = self.text(Msg::CopyFailed);
            self.notify(NoticeKind::Error, message)
        }
    }

    pub fn report_download(&mut self, file_name: &str) -> u64 {
        let message = i18n::downloaded_notice(self.lang, file_name);
        self.notify(NoticeKind::Success, message)
    }

    /// 出力エリアを空表示に戻す（処理中でも実行する）
    pub fn clear_results(&mut self) {
        self.result_text = self.text(Msg::EmptyResult).to_string();
        self.logs_text = self.text(Msg::EmptyLogs).to_string();
        let message = self.text(Msg::Cleared);
        self.notify(NoticeKind::Info, message);
    }

    // ------------------------------------------------------------
    // 通知
    // ------------------------------------------------------------

    /// 通知を追加して ID を返す（`NOTIFICATION_TTL` 後にホストが `dismiss` する）
    pub fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        self.notifications.push(Notification {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notifications.retain(|n| n.id != id);
    }
}
