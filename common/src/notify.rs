//! 利用者への通知
//!
//! 通知の表示方法（トースト、コンソール等）は呼び出し側が決める。
//! コアは文言とレベルを渡すだけで、戻り値は使わない。

use std::cell::RefCell;

/// 通知レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl NotifyLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            NotifyLevel::Success => "✔",
            NotifyLevel::Error => "✖",
            NotifyLevel::Warning => "⚠",
            NotifyLevel::Info => "ℹ",
        }
    }
}

/// 通知の受け口
pub trait Notifier {
    fn notify(&self, message: &str, level: NotifyLevel);
}

/// 通知を記録するだけの実装（テスト・ヘッドレス用）
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<(NotifyLevel, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(NotifyLevel, String)> {
        self.messages.borrow().clone()
    }

    /// 指定レベルの通知件数
    pub fn count(&self, level: NotifyLevel) -> usize {
        self.messages
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }

    pub fn clear(&self) {
        self.messages.borrow_mut().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, level: NotifyLevel) {
        self.messages.borrow_mut().push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        notifier.notify("保存しました", NotifyLevel::Success);
        notifier.notify("重複しています", NotifyLevel::Warning);
        notifier.notify("もう一度", NotifyLevel::Warning);

        assert_eq!(notifier.count(NotifyLevel::Warning), 2);
        assert_eq!(notifier.messages()[0], (NotifyLevel::Success, "保存しました".to_string()));

        notifier.clear();
        assert!(notifier.messages().is_empty());
    }
}
