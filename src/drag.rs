//! CLI用のドラッグホスト
//!
//! カーソルもポインタ監視も無いので、確保と解放をログに残すだけ。

use visual_diff_common::{
    ComparisonMode, ContainerGeometry, DragHost, SwipeController, SwipePosition,
};

#[derive(Debug, Default)]
pub struct LogDragHost {
    sessions: u32,
}

impl LogDragHost {
    pub fn sessions(&self) -> u32 {
        self.sessions
    }
}

#[derive(Debug)]
pub struct LogDragSession {
    id: u32,
}

impl Drop for LogDragSession {
    fn drop(&mut self) {
        log::debug!("drag session {} released", self.id);
    }
}

impl DragHost for LogDragHost {
    type Session = LogDragSession;

    fn acquire(&mut self) -> LogDragSession {
        self.sessions += 1;
        log::debug!("drag session {} acquired", self.sessions);
        LogDragSession { id: self.sessions }
    }
}

/// 1回のドラッグでポインタを順に動かし、各時点の境界線位置を返す
///
/// コンテナ幅が不正な場合は各移動が無視され、位置は初期値のまま。
pub fn simulate_drag(
    container_left: f64,
    container_width: f64,
    pointer_xs: &[f64],
) -> Vec<SwipePosition> {
    let mut controller = SwipeController::new(LogDragHost::default());
    controller.rebind(ComparisonMode::Swipe, Some(0));
    controller.begin_drag();

    let geometry = ContainerGeometry::new(container_left, container_width);
    let positions = pointer_xs
        .iter()
        .map(|&x| {
            controller.on_pointer_move(x, geometry);
            controller.position()
        })
        .collect();

    controller.end_drag();
    positions
}
