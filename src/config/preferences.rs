use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// UI言語。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }
}

impl FromStr for Language {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "en" => Ok(Language::En),
            "hi" => Ok(Language::Hi),
            other => Err(SheetError::config(format!(
                "Unsupported language '{other}' (supported: en, hi)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub language: Language,
}

/// ユーザー設定の唯一の所有者。
///
/// 読み書きはすべてこのストアを経由し、書き込みは即座にファイルへ反映する。
/// グローバルに参照せず、必要な箇所へ明示的に渡す。
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    current: RwLock<Preferences>,
}

impl PreferenceStore {
    /// `path` から設定を読み込む。ファイルが存在しなければデフォルト値で開始する。
    pub fn open(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let current = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_yml::from_str(&content)?
        } else {
            Preferences::default()
        };
        Ok(Self {
            path,
            current: RwLock::new(current),
        })
    }

    pub fn language(&self) -> Language {
        match self.current.read() {
            Ok(prefs) => prefs.language,
            Err(poisoned) => poisoned.into_inner().language,
        }
    }

    /// 言語を変更してファイルへ保存する。保存に失敗した場合はメモリ上の値も変更しない。
    pub fn set_language(&self, language: Language) -> crate::error::Result<()> {
        let mut prefs = self
            .current
            .write()
            .map_err(|_| SheetError::config("Preference store lock poisoned"))?;
        let updated = Preferences { language };
        let yaml = serde_yml::to_string(&updated)?;
        std::fs::write(&self.path, yaml)?;
        *prefs = updated;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
