//! 比較ビューアの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Dimensions / Resolution: 画像の自然サイズとその解決状態
//! - ImageRef: 比較対象の画像（プレビュー参照 + 表示名）
//! - Issue: 検出された差分（種別・重要度・期待値/実際値・修正案・領域）

use serde::{Deserialize, Serialize};

/// 画像の自然サイズ（ピクセル）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// 幅/高さ。高さ0の場合は None
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.height == 0 {
            return None;
        }
        Some(f64::from(self.width) / f64::from(self.height))
    }

    /// 横長（アスペクト比 > 1）かどうか。幅か高さが0なら横長ではない
    pub fn is_landscape(&self) -> bool {
        self.width > 0 && self.aspect_ratio().is_some_and(|ratio| ratio > 1.0)
    }
}

/// 画像サイズの解決状態
///
/// デコード完了まではサイズが不明なので、0や未読み込みとは区別して扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state", content = "dimensions")]
pub enum Resolution {
    #[default]
    Pending,
    Resolved(Dimensions),
    Failed,
}

impl Resolution {
    pub fn dimensions(&self) -> Option<Dimensions> {
        match self {
            Resolution::Resolved(dims) => Some(*dims),
            Resolution::Pending | Resolution::Failed => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Resolution::Failed)
    }
}

/// 比較対象の画像
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    /// 描画可能なソース（Object URL / 画像URL / ファイルパス）
    pub source: String,
    pub display_name: String,
    #[serde(default)]
    pub resolution: Resolution,
}

impl ImageRef {
    pub fn new(source: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            display_name: display_name.into(),
            resolution: Resolution::Pending,
        }
    }

    /// サイズ解決済みの画像を作る
    pub fn with_dimensions(mut self, dims: Dimensions) -> Self {
        self.resolution = Resolution::Resolved(dims);
        self
    }

    pub fn dimensions(&self) -> Option<Dimensions> {
        self.resolution.dimensions()
    }

    pub fn mark_resolved(&mut self, dims: Dimensions) {
        self.resolution = Resolution::Resolved(dims);
    }

    pub fn mark_failed(&mut self) {
        self.resolution = Resolution::Failed;
    }
}

/// 画像の自然座標系における矩形領域
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// 差分の重要度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Major,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Major => "major",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 表示言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ko,
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "ko" | "korean" => Ok(Language::Ko),
            _ => Err(format!("Unknown language: {}. Use en or ko", s)),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Ko => write!(f, "ko"),
        }
    }
}

/// 言語別の修正案（英語は必須）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestedFix {
    pub en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ko: Option<String>,
}

impl SuggestedFix {
    /// 指定言語の文言。無い（または空）場合は英語にフォールバック
    pub fn text(&self, language: Language) -> &str {
        match language {
            Language::Ko => match self.ko.as_deref() {
                Some(ko) if !ko.is_empty() => ko,
                _ => &self.en,
            },
            Language::En => &self.en,
        }
    }
}

/// デザインと実装の差分1件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// 差分の種類（テキスト、色、サイズなど）
    #[serde(rename = "type")]
    pub category: String,
    pub severity: Severity,
    /// デザイン上の値
    #[serde(rename = "figmaValue")]
    pub expected_value: String,
    /// 実装上の値
    #[serde(rename = "appValue")]
    pub actual_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<SuggestedFix>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
}

impl Issue {
    /// 領域を持つ差分のみ選択・ハイライトできる
    pub fn is_selectable(&self) -> bool {
        self.bounds.is_some()
    }

    /// 修正案テキスト（無ければ空文字）
    pub fn suggested_fix(&self, language: Language) -> &str {
        self.suggested_fix
            .as_ref()
            .map(|fix| fix.text(language))
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue_with_fix(fix: Option<SuggestedFix>) -> Issue {
        Issue {
            category: "color".to_string(),
            severity: Severity::Major,
            expected_value: "#FFFFFF".to_string(),
            actual_value: "#FAFAFA".to_string(),
            suggested_fix: fix,
            bounds: None,
        }
    }

    #[test]
    fn test_dimensions_landscape() {
        assert!(Dimensions::new(1920, 1080).is_landscape());
        assert!(!Dimensions::new(1080, 1920).is_landscape());
        assert!(!Dimensions::new(500, 500).is_landscape());
    }

    #[test]
    fn test_dimensions_zero_is_not_landscape() {
        assert!(!Dimensions::new(100, 0).is_landscape());
        assert!(!Dimensions::new(0, 100).is_landscape());
        assert_eq!(Dimensions::new(100, 0).aspect_ratio(), None);
    }

    #[test]
    fn test_resolution_default_is_pending() {
        let image = ImageRef::new("blob:1", "design.png");
        assert_eq!(image.resolution, Resolution::Pending);
        assert_eq!(image.dimensions(), None);
    }

    #[test]
    fn test_suggested_fix_fallback() {
        let issue = issue_with_fix(Some(SuggestedFix {
            en: "Use #FFFFFF".to_string(),
            ko: None,
        }));
        assert_eq!(issue.suggested_fix(Language::Ko), "Use #FFFFFF");
        assert_eq!(issue.suggested_fix(Language::En), "Use #FFFFFF");

        let issue = issue_with_fix(Some(SuggestedFix {
            en: "Use #FFFFFF".to_string(),
            ko: Some("#FFFFFF 사용".to_string()),
        }));
        assert_eq!(issue.suggested_fix(Language::Ko), "#FFFFFF 사용");
    }

    #[test]
    fn test_suggested_fix_empty_korean_falls_back() {
        let issue = issue_with_fix(Some(SuggestedFix {
            en: "Fix it".to_string(),
            ko: Some(String::new()),
        }));
        assert_eq!(issue.suggested_fix(Language::Ko), "Fix it");
    }

    #[test]
    fn test_suggested_fix_missing() {
        let issue = issue_with_fix(None);
        assert_eq!(issue.suggested_fix(Language::En), "");
    }

    #[test]
    fn test_issue_deserialize_wire_names() {
        let json = r#"{
            "type": "spacing",
            "severity": "critical",
            "figmaValue": "16px",
            "appValue": "12px",
            "bounds": {"x": 10, "y": 20, "width": 5, "height": 5}
        }"#;

        let issue: Issue = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(issue.category, "spacing");
        assert_eq!(issue.severity, Severity::Critical);
        assert_eq!(issue.expected_value, "16px");
        assert_eq!(issue.actual_value, "12px");
        assert_eq!(issue.bounds, Some(Bounds::new(10.0, 20.0, 5.0, 5.0)));
        assert!(issue.is_selectable());
    }

    #[test]
    fn test_issue_rejects_unknown_severity() {
        let json = r#"{"type": "x", "severity": "blocker", "figmaValue": "a", "appValue": "b"}"#;
        assert!(serde_json::from_str::<Issue>(json).is_err());
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("ko".parse::<Language>(), Ok(Language::Ko));
        assert_eq!("EN".parse::<Language>(), Ok(Language::En));
        assert!("fr".parse::<Language>().is_err());
    }
}
