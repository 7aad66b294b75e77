//! 一括比較データ（diffs.json）
//!
//! 画面ごとにデザイン/実装のスクリーンショットURLと検出済みの差分を持つ。
//!
//! ```json
//! {
//!   "metadata": { "width": 390 },
//!   "screens": [
//!     { "id": "login", "screenName": "Login", "figmaScreenshot": "...", "appScreenshot": "...", "issues": [] }
//!   ]
//! }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::highlight::IssueSelection;
use crate::types::{Bounds, ImageRef, Issue};

/// メタデータ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchMetadata {
    /// スクリーンショットの基準幅
    pub width: f64,
}

/// 画面単位の比較データ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenData {
    pub id: String,
    pub screen_name: String,
    pub figma_screenshot: String,
    pub app_screenshot: String,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl ScreenData {
    /// (デザイン, 実装) の画像参照
    pub fn image_refs(&self) -> (ImageRef, ImageRef) {
        (
            ImageRef::new(&self.figma_screenshot, format!("{} (Figma)", self.screen_name)),
            ImageRef::new(&self.app_screenshot, format!("{} (App)", self.screen_name)),
        )
    }

    pub fn selectable_issue_count(&self) -> usize {
        self.issues.iter().filter(|issue| issue.is_selectable()).count()
    }
}

/// diffs.json 全体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffsJson {
    pub metadata: BatchMetadata,
    pub screens: Vec<ScreenData>,
}

impl DiffsJson {
    pub fn screen(&self, id: &str) -> Option<&ScreenData> {
        self.screens.iter().find(|screen| screen.id == id)
    }

    pub fn screen_index(&self, id: &str) -> Option<usize> {
        self.screens.iter().position(|screen| screen.id == id)
    }

    pub fn issue_count(&self) -> usize {
        self.screens.iter().map(|screen| screen.issues.len()).sum()
    }

    /// 構造チェック後の意味的な検証
    pub fn validate(&self) -> Result<()> {
        if !(self.metadata.width.is_finite() && self.metadata.width > 0.0) {
            return Err(Error::Validation("metadata.width must be a positive number".into()));
        }
        if self.screens.is_empty() {
            return Err(Error::Validation("screens must contain at least one screen".into()));
        }

        let mut seen = HashSet::new();
        for screen in &self.screens {
            if !seen.insert(screen.id.as_str()) {
                return Err(Error::Validation(format!("duplicate screen id: {}", screen.id)));
            }
            for (index, issue) in screen.issues.iter().enumerate() {
                if let Some(bounds) = issue.bounds {
                    check_bounds(&screen.id, index, bounds)?;
                }
            }
        }
        Ok(())
    }
}

fn check_bounds(screen_id: &str, index: usize, bounds: Bounds) -> Result<()> {
    let values = [bounds.x, bounds.y, bounds.width, bounds.height];
    if values.iter().any(|v| !v.is_finite()) || bounds.width < 0.0 || bounds.height < 0.0 {
        return Err(Error::Validation(format!(
            "invalid bounds for issue {} on screen {}",
            index, screen_id
        )));
    }
    Ok(())
}

/// diffs.json をパースして検証する
pub fn parse_batch(json: &str) -> Result<DiffsJson> {
    let batch: DiffsJson = serde_json::from_str(json)?;
    batch.validate()?;
    log::debug!(
        "loaded batch: {} screens, {} issues",
        batch.screens.len(),
        batch.issue_count()
    );
    Ok(batch)
}

/// 一括比較の閲覧状態
///
/// 画面を切り替えると差分選択は必ずリセットされる。古い番号が新しい画面の
/// 差分一覧を指すことはない。
#[derive(Debug, Clone)]
pub struct BatchSession {
    batch: DiffsJson,
    current: usize,
    selection: IssueSelection,
}

impl BatchSession {
    pub fn new(batch: DiffsJson) -> Result<Self> {
        batch.validate()?;
        Ok(Self {
            batch,
            current: 0,
            selection: IssueSelection::default(),
        })
    }

    pub fn batch(&self) -> &DiffsJson {
        &self.batch
    }

    /// 差分領域の座標が基準とする表示幅
    pub fn reference_width(&self) -> f64 {
        self.batch.metadata.width
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_screen(&self) -> &ScreenData {
        &self.batch.screens[self.current]
    }

    pub fn issues(&self) -> &[Issue] {
        &self.current_screen().issues
    }

    pub fn selection(&self) -> IssueSelection {
        self.selection
    }

    /// 番号で画面を切り替える
    pub fn select_screen_index(&mut self, index: usize) -> Result<&ScreenData> {
        if index >= self.batch.screens.len() {
            return Err(Error::ScreenNotFound(format!("#{}", index)));
        }
        if index != self.current {
            self.selection.clear();
            self.current = index;
            log::debug!("switched to screen {}", self.batch.screens[index].id);
        }
        Ok(self.current_screen())
    }

    /// IDで画面を切り替える
    pub fn select_screen(&mut self, id: &str) -> Result<&ScreenData> {
        let index = self
            .batch
            .screen_index(id)
            .ok_or_else(|| Error::ScreenNotFound(id.to_string()))?;
        self.select_screen_index(index)
    }

    /// 差分カードのクリック
    pub fn toggle_issue(&mut self, index: usize) -> Option<usize> {
        let issues = &self.batch.screens[self.current].issues;
        self.selection.toggle(issues, index)
    }

    pub fn highlight(&self) -> Option<Bounds> {
        self.selection.highlight(self.issues())
    }
}
