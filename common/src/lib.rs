//! Visual Diff Common Library
//!
//! CLIとWeb(WASM)で共有される型と比較ロジック

pub mod types;
pub mod layout;
pub mod swipe;
pub mod highlight;
pub mod compositor;
pub mod mode;
pub mod batch;
pub mod error;

pub use types::{Bounds, Dimensions, ImageRef, Issue, Language, Resolution, Severity, SuggestedFix};
pub use layout::{is_stacked_layout, orientation_for, place_bounds, Orientation, Placement};
pub use swipe::{ContainerGeometry, DragHost, SwipeController, SwipePosition};
pub use highlight::{resolve_highlight, toggle_selection, IssueSelection};
pub use compositor::{
    Compositor, CompositorInput, Layer, LayerContent, OverlayOpacity, Panel, Placeholder,
    ViewFrame,
};
pub use mode::{select_view, select_view_by_name, ComparisonMode, ViewCompositor};
pub use batch::{parse_batch, BatchSession, DiffsJson, ScreenData};
pub use error::{Error, Result};
