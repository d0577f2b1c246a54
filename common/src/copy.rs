//! クリップボードへのコピー
//!
//! コピー手段を優先順に並べ、最初に成功したところで止める。
//! ブラウザでは Clipboard API → textarea + execCommand の順。

use async_trait::async_trait;
use log::warn;

/// コピー手段1つ分
#[async_trait(?Send)]
pub trait CopyStrategy {
    fn name(&self) -> &'static str;

    async fn copy(&self, text: &str) -> Result<(), String>;
}

/// 先頭から順に試し、成功した手段の名前を返す
///
/// すべて失敗したときは各手段のエラーを `name: error` 形式で返す。
pub async fn copy_with_fallback(
    strategies: &[&dyn CopyStrategy],
    text: &str,
) -> Result<&'static str, Vec<String>> {
    let mut errors = Vec::new();
    for strategy in strategies {
        match strategy.copy(text).await {
            Ok(()) => return Ok(strategy.name()),
            Err(err) => {
                warn!("copy via {} failed: {}", strategy.name(), err);
                errors.push(format!("{}: {}", strategy.name(), err));
            }
        }
    }
    Err(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    struct Fake {
        name: &'static str,
        ok: bool,
        copied: RefCell<Vec<String>>,
    }

    impl Fake {
        fn new(name: &'static str, ok: bool) -> Self {
            Self {
                name,
                ok,
                copied: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl CopyStrategy for Fake {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn copy(&self, text: &str) -> Result<(), String> {
            self.copied.borrow_mut().push(text.to_string());
            if self.ok {
                Ok(())
            } else {
                Err("denied".to_string())
            }
        }
    }

    #[test]
    fn test_first_success_wins() {
        let primary = Fake::new("clipboard", true);
        let fallback = Fake::new("exec-command", true);
        let chain: [&dyn CopyStrategy; 2] = [&primary, &fallback];
        let result = block_on(copy_with_fallback(&chain, "SYM"));
        assert_eq!(result, Ok("clipboard"));
        assert!(fallback.copied.borrow().is_empty());
    }

    #[test]
    fn test_falls_back_on_failure() {
        let primary = Fake::new("clipboard", false);
        let fallback = Fake::new("exec-command", true);
        let chain: [&dyn CopyStrategy; 2] = [&primary, &fallback];
        let result = block_on(copy_with_fallback(&chain, "SYM"));
        assert_eq!(result, Ok("exec-command"));
        assert_eq!(*fallback.copied.borrow(), vec!["SYM".to_string()]);
    }

    #[test]
    fn test_all_failures_reported() {
        let primary = Fake::new("clipboard", false);
        let fallback = Fake::new("exec-command", false);
        let chain: [&dyn CopyStrategy; 2] = [&primary, &fallback];
        let result = block_on(copy_with_fallback(&chain, "SYM"));
        assert_eq!(
            result,
            Err(vec![
                "clipboard: denied".to_string(),
                "exec-command: denied".to_string()
            ])
        );
    }

    #[test]
    fn test_empty_chain_fails() {
        let result = block_on(copy_with_fallback(&[], "SYM"));
        assert_eq!(result, Err(Vec::new()));
    }
}
