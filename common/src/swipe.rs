//! スワイプ表示の境界線ドラッグ制御
//!
//! 境界線の位置（コンテナ幅に対する0-100%）を保持し、ポインタ座標から位置を計算する。
//!
//! ドラッグ中のカーソル変更とドキュメント全体のポインタ監視はプロセス全体で1つの
//! 共有リソースなので、[`DragHost::acquire`] が返すセッション値として保持する。
//! セッションは `end_drag`、スワイプモード解除、コンテナ差し替え、コントローラ破棄の
//! いずれの経路でも drop され、ホスト側の解放処理が必ず1回だけ走る。

use serde::Serialize;

use crate::mode::ComparisonMode;

/// 境界線位置の初期値（中央）
pub const INITIAL_SWIPE_POSITION: f64 = 50.0;

/// 境界線位置（コンテナ幅に対する%）
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct SwipePosition(f64);

impl SwipePosition {
    /// 0-100に丸める。非有限値は初期値になる
    pub fn new(percent: f64) -> Self {
        if percent.is_finite() {
            Self(percent.clamp(0.0, 100.0))
        } else {
            Self::default()
        }
    }

    pub fn percent(&self) -> f64 {
        self.0
    }

    /// 境界線の右側で隠す幅（%）。2枚目レイヤーのクリップ量
    pub fn hidden_right(&self) -> f64 {
        100.0 - self.0
    }
}

impl Default for SwipePosition {
    fn default() -> Self {
        Self(INITIAL_SWIPE_POSITION)
    }
}

/// スワイプコンテナの水平方向ジオメトリ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerGeometry {
    pub left: f64,
    pub width: f64,
}

impl ContainerGeometry {
    /// 幅が正の有限値でなければ None（未マウント扱い）
    pub fn new(left: f64, width: f64) -> Option<Self> {
        if left.is_finite() && width.is_finite() && width > 0.0 {
            Some(Self { left, width })
        } else {
            None
        }
    }

    /// ポインタX座標をコンテナ幅に対する%へ変換（丸めなし）
    pub fn raw_percentage(&self, pointer_x: f64) -> f64 {
        (pointer_x - self.left) / self.width * 100.0
    }
}

/// ドラッグ中だけ確保する共有リソースの提供元
///
/// Webではbodyのカーソルとdocumentのmousemove/mouseupリスナー、
/// CLIではログ出力のみ。
pub trait DragHost {
    /// drop 時に解放処理を行うセッション
    type Session;

    fn acquire(&mut self) -> Self::Session;
}

/// 境界線ドラッグのコントローラ
pub struct SwipeController<H: DragHost> {
    host: H,
    position: SwipePosition,
    mode: ComparisonMode,
    container: Option<u64>,
    session: Option<H::Session>,
}

impl<H: DragHost> SwipeController<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            position: SwipePosition::default(),
            mode: ComparisonMode::default(),
            container: None,
            session: None,
        }
    }

    pub fn position(&self) -> SwipePosition {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// ポインタ監視が有効か（スワイプモードのときのみ）
    pub fn is_active(&self) -> bool {
        self.mode == ComparisonMode::Swipe
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// 表示モードとコンテナを再評価する
    ///
    /// スワイプ以外へ切り替わった場合、またはコンテナが差し替わった場合は
    /// 進行中のドラッグを終了する。位置はリセットしない。
    pub fn rebind(&mut self, mode: ComparisonMode, container: Option<u64>) {
        if mode == self.mode && container == self.container {
            return;
        }
        self.mode = mode;
        self.container = container;
        if !self.is_active() || container.is_none() {
            self.end_drag();
        } else if self.is_dragging() {
            log::debug!("swipe container replaced during drag");
            self.end_drag();
        }
    }

    /// コンテナはそのままでモードだけ切り替える
    pub fn set_mode(&mut self, mode: ComparisonMode) {
        self.rebind(mode, self.container);
    }

    /// モードはそのままでコンテナだけ差し替える（None はアンマウント）
    pub fn set_container(&mut self, container: Option<u64>) {
        self.rebind(self.mode, container);
    }

    /// ドラッグ開始。スワイプモード外、またはドラッグ中なら何もしない
    pub fn begin_drag(&mut self) -> bool {
        if !self.is_active() || self.session.is_some() {
            return false;
        }
        self.session = Some(self.host.acquire());
        log::debug!("swipe drag started at {:.1}%", self.position.percent());
        true
    }

    /// ドラッグ中のポインタ移動。位置が更新されたら新しい位置を返す
    pub fn on_pointer_move(
        &mut self,
        pointer_x: f64,
        geometry: Option<ContainerGeometry>,
    ) -> Option<SwipePosition> {
        if self.session.is_none() {
            return None;
        }
        let geometry = geometry?;
        let raw = geometry.raw_percentage(pointer_x);
        if !raw.is_finite() {
            return None;
        }
        self.position = SwipePosition::new(raw);
        Some(self.position)
    }

    /// ドラッグ終了。ドラッグしていなければ何もしない
    pub fn end_drag(&mut self) {
        if self.session.take().is_some() {
            log::debug!("swipe drag ended at {:.1}%", self.position.percent());
        }
    }
}

impl<H: DragHost> std::fmt::Debug for SwipeController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeController")
            .field("position", &self.position)
            .field("mode", &self.mode)
            .field("container", &self.container)
            .field("dragging", &self.is_dragging())
            .finish()
    }
}
