use crate::error::{Result, ViewerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use visual_diff_common::{ComparisonMode, Language, OverlayOpacity};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 保存されたモード名（古い・不正な値は並列表示として扱う）
    pub default_mode: String,
    pub overlay_opacity: u8,
    pub language: Language,
    pub scale_highlights: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_mode: ComparisonMode::SideBySide.as_str().into(),
            overlay_opacity: OverlayOpacity::default().percent(),
            language: Language::En,
            scale_highlights: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content)?;
        config.overlay_opacity = config.overlay_opacity.min(100);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ViewerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("visual-diff").join("config.json"))
    }

    pub fn mode(&self) -> ComparisonMode {
        ComparisonMode::parse_lossy(&self.default_mode)
    }

    pub fn opacity(&self) -> OverlayOpacity {
        OverlayOpacity::new(self.overlay_opacity)
    }

    pub fn set_mode(&mut self, mode: &str) -> Result<()> {
        let mode: ComparisonMode = mode.parse().map_err(ViewerError::InvalidArgument)?;
        self.default_mode = mode.as_str().into();
        Ok(())
    }

    pub fn set_opacity(&mut self, percent: u8) -> Result<()> {
        if percent > 100 {
            return Err(ViewerError::InvalidArgument(format!(
                "不透明度は0-100で指定してください: {}",
                percent
            )));
        }
        self.overlay_opacity = percent;
        Ok(())
    }
}
