use daily_report_common::{Notifier, NotifyLevel};

/// コンソールに通知を表示する
///
/// エラー・警告は stderr、それ以外は stdout。
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 成功・情報の表示を抑える（`--json` 出力時など）
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, level: NotifyLevel) {
        tracing::debug!(?level, "{}", message);
        match level {
            NotifyLevel::Error | NotifyLevel::Warning => {
                eprintln!("{} {}", level.icon(), message);
            }
            NotifyLevel::Success | NotifyLevel::Info => {
                if !self.quiet {
                    println!("{} {}", level.icon(), message);
                }
            }
        }
    }
}
