use crate::error::{ReportError, Result};
use daily_report_common::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ドラフト保存先ディレクトリを上書きする環境変数
pub const STORAGE_DIR_ENV: &str = "DAILY_REPORT_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage_dir: Option<PathBuf>,
    pub storage_key: String,
    pub max_photo_bytes: u64,
    pub report_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ReportError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("daily-report").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            storage_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.into(),
            max_photo_bytes: 5 * 1024 * 1024,
            report_dir: None,
        }
    }

    /// ドラフト保存先（環境変数 > 設定 > データディレクトリ）
    pub fn storage_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(STORAGE_DIR_ENV) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        if let Some(dir) = &self.storage_dir {
            return Ok(dir.clone());
        }

        let data = dirs::data_dir()
            .ok_or_else(|| ReportError::Config("データディレクトリが見つかりません".into()))?;
        Ok(data.join("daily-report"))
    }

    /// 帳票の出力先（未設定ならカレント）
    pub fn report_dir(&self) -> PathBuf {
        self.report_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn set_storage_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.storage_dir = Some(dir);
        self.save()
    }

    pub fn set_report_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.report_dir = Some(dir);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage_key, "dailyReportDraft");
        assert_eq!(config.max_photo_bytes, 5 * 1024 * 1024);
        assert_eq!(config.report_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_partial_config_json() {
        let config: Config = serde_json::from_str(r#"{"max_photo_bytes": 1024}"#)
            .expect("設定の読み込み失敗");
        assert_eq!(config.max_photo_bytes, 1024);
        assert_eq!(config.storage_key, "dailyReportDraft");
    }
}
