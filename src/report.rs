//! 合成結果と差分一覧のテキスト表示

use std::fmt::Write;

use visual_diff_common::{
    Issue, Language, Layer, LayerContent, Panel, Placement, ScreenData, ViewFrame,
};
use visual_diff_common::compositor::IMAGE_LOAD_FAILED;

fn describe_layer(layer: &Layer) -> String {
    let mut line = match &layer.content {
        LayerContent::Image { source, name } => format!("{} <{}>", name, source),
        LayerContent::LoadFailed { name } => format!("{} [{}]", name, IMAGE_LOAD_FAILED),
    };
    if layer.opacity < 1.0 {
        let _ = write!(line, " opacity={:.2}", layer.opacity);
    }
    if let Some(clip) = &layer.clip {
        let _ = write!(line, " clip-path={}", clip.to_css());
    }
    line
}

fn describe_highlight(highlight: Option<&Placement>) -> Option<String> {
    highlight.map(|placement| format!("highlight: {}", placement.to_css()))
}

/// 合成結果をテキストで表す
pub fn render_frame(frame: &ViewFrame) -> String {
    let mut lines = Vec::new();

    match frame {
        ViewFrame::Placeholder(placeholder) => {
            lines.push(format!("[{}]", placeholder.message()));
        }
        ViewFrame::SideBySide(frame) => {
            lines.push(format!("side-by-side ({})", frame.orientation.as_str()));
            for (i, panel) in frame.panels.iter().enumerate() {
                match panel {
                    Panel::Empty { placeholder } => {
                        lines.push(format!("  panel {}: [{}]", i + 1, placeholder.message()));
                    }
                    Panel::Image { layer, caption, highlight } => {
                        lines.push(format!("  panel {}: {}", i + 1, describe_layer(layer)));
                        lines.push(format!("    caption: {}", caption));
                        if let Some(h) = describe_highlight(highlight.as_ref()) {
                            lines.push(format!("    {}", h));
                        }
                    }
                }
            }
        }
        ViewFrame::Overlay(frame) => {
            lines.push("overlay".to_string());
            for (i, layer) in frame.layers.iter().enumerate() {
                lines.push(format!("  layer {}: {}", i + 1, describe_layer(layer)));
            }
            lines.push(format!("  caption: {}", frame.caption));
            if let Some(h) = describe_highlight(frame.highlight.as_ref()) {
                lines.push(format!("  {}", h));
            }
        }
        ViewFrame::Swipe(frame) => {
            lines.push(format!("swipe (divider at {:.1}%)", frame.handle_left));
            lines.push(format!("  base: {}", describe_layer(&frame.base)));
            lines.push(format!("  revealed: {}", describe_layer(&frame.revealed)));
            lines.push(format!("  caption: {}", frame.caption));
            if let Some(h) = describe_highlight(frame.highlight.as_ref()) {
                lines.push(format!("  {}", h));
            }
        }
    }

    lines.join("\n")
}

/// 1件の差分を表示用に整形
pub fn render_issue(index: usize, issue: &Issue, language: Language) -> String {
    let marker = if issue.is_selectable() { "◎" } else { " " };
    let mut text = format!(
        "{} #{} [{}] {}: Figma={} / App={}",
        marker, index, issue.severity, issue.category, issue.expected_value, issue.actual_value
    );
    let fix = issue.suggested_fix(language);
    if !fix.is_empty() {
        let _ = write!(text, "\n      → {}", fix);
    }
    text
}

/// 画面ごとの差分一覧
pub fn render_screen_issues(screen: &ScreenData, language: Language) -> String {
    let mut lines = vec![format!(
        "{} ({}) - {}件",
        screen.screen_name,
        screen.id,
        screen.issues.len()
    )];
    if screen.issues.is_empty() {
        lines.push("  No issues".to_string());
    }
    for (index, issue) in screen.issues.iter().enumerate() {
        lines.push(format!("  {}", render_issue(index, issue, language)));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use visual_diff_common::{
        select_view, Bounds, ComparisonMode, CompositorInput, Dimensions, ImageRef, Severity,
        SuggestedFix, SwipePosition,
    };

    fn images() -> (ImageRef, ImageRef) {
        (
            ImageRef::new("design.png", "design.png").with_dimensions(Dimensions::new(200, 100)),
            ImageRef::new("app.png", "app.png").with_dimensions(Dimensions::new(200, 100)),
        )
    }

    #[test]
    fn test_render_swipe_frame() {
        let (first, second) = images();
        let input = CompositorInput::new(Some(&first), Some(&second))
            .swipe_position(SwipePosition::new(25.0));
        let text = render_frame(&select_view(ComparisonMode::Swipe).compose(&input));

        assert!(text.starts_with("swipe (divider at 25.0%)"));
        assert!(text.contains("clip-path=inset(0 75% 0 0)"));
        assert!(text.contains("caption: design.png | app.png"));
    }

    #[test]
    fn test_render_swipe_placeholder() {
        let (first, _) = images();
        let input = CompositorInput::new(Some(&first), None);
        let text = render_frame(&select_view(ComparisonMode::Swipe).compose(&input));
        assert_eq!(text, "[Please load both images to use swipe mode]");
    }

    #[test]
    fn test_render_side_by_side_with_highlight() {
        let (first, second) = images();
        let input = CompositorInput::new(Some(&first), Some(&second))
            .highlight(Some(Bounds::new(20.0, 10.0, 20.0, 10.0)));
        let text = render_frame(&select_view(ComparisonMode::SideBySide).compose(&input));

        assert!(text.starts_with("side-by-side (vertical)"));
        assert_eq!(text.matches("highlight: left: 10%").count(), 2);
    }

    #[test]
    fn test_render_overlay_failed_layer() {
        let (mut first, second) = images();
        first.mark_failed();
        let input = CompositorInput::new(Some(&first), Some(&second));
        let text = render_frame(&select_view(ComparisonMode::Overlay).compose(&input));
        assert!(text.contains("design.png [Unable to load image]"));
        assert!(text.contains("app.png <app.png> opacity=0.50"));
    }

    #[test]
    fn test_render_issue_with_fix() {
        let issue = Issue {
            category: "color".to_string(),
            severity: Severity::Critical,
            expected_value: "#000".to_string(),
            actual_value: "#111".to_string(),
            suggested_fix: Some(SuggestedFix {
                en: "Use black".to_string(),
                ko: Some("검정 사용".to_string()),
            }),
            bounds: Some(Bounds::new(0.0, 0.0, 1.0, 1.0)),
        };
        let text = render_issue(2, &issue, Language::Ko);
        assert!(text.starts_with("◎ #2 [critical] color: Figma=#000 / App=#111"));
        assert!(text.contains("검정 사용"));
    }
}
