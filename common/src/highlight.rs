//! 差分の選択とハイライト領域の対応付け

use crate::types::{Bounds, Issue};

/// 選択のトグル。選択中の項目を再度選ぶと解除
pub fn toggle_selection(current: Option<usize>, target: usize) -> Option<usize> {
    if current == Some(target) {
        None
    } else {
        Some(target)
    }
}

/// 選択中の差分の領域を返す
///
/// 未選択、範囲外、領域を持たない差分の場合は None。
pub fn resolve_highlight(issues: &[Issue], selected: Option<usize>) -> Option<Bounds> {
    selected
        .and_then(|index| issues.get(index))
        .and_then(|issue| issue.bounds)
}

/// 現在の画面における差分選択
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueSelection {
    index: Option<usize>,
}

impl IssueSelection {
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.index == Some(index)
    }

    /// 差分をクリックしたときの処理
    ///
    /// 領域のない差分や範囲外の番号は無視する。
    pub fn toggle(&mut self, issues: &[Issue], target: usize) -> Option<usize> {
        if issues.get(target).is_some_and(Issue::is_selectable) {
            self.index = toggle_selection(self.index, target);
        }
        self.index
    }

    pub fn clear(&mut self) {
        self.index = None;
    }

    pub fn highlight(&self, issues: &[Issue]) -> Option<Bounds> {
        resolve_highlight(issues, self.index)
    }
}
