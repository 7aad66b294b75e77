//! 比較ビューア
//!
//! 現在のモードから描画を選び、スワイプの境界線コントローラを保持する。
//! 境界線の位置はモードを切り替えても保持される。

use leptos::html;
use leptos::prelude::*;
use visual_diff_common::{
    select_view, Bounds, ComparisonMode, CompositorInput, OverlayOpacity, SwipeController,
    SwipePosition, ViewFrame,
};

use super::views::{OverlayView, PlaceholderView, SideBySideView, SwipeView};
use crate::drag::{self, DocumentDragHost, SharedSwipe};
use crate::images::ImagePair;

/// スワイプ表示とコントローラの受け渡し
#[derive(Clone, Copy)]
pub struct SwipeBinding {
    controller: StoredValue<SharedSwipe, LocalStorage>,
    next_container: StoredValue<u64>,
    pub container: NodeRef<html::Div>,
}

impl SwipeBinding {
    pub fn with_controller(&self, f: impl FnOnce(&mut SwipeController<DocumentDragHost>)) {
        let done = self.controller.try_with_value(|controller| {
            match controller.try_borrow_mut() {
                Ok(mut controller) => f(&mut controller),
                Err(_) => gloo::console::warn!("swipe controller is busy"),
            }
        });
        if done.is_none() {
            gloo::console::debug!("swipe controller already disposed");
        }
    }

    /// マウントされるコンテナごとの識別子
    pub fn next_container_id(&self) -> u64 {
        self.next_container
            .try_update_value(|next| {
                *next += 1;
                *next
            })
            .unwrap_or_default()
    }
}

#[component]
pub fn ImageViewer(
    #[prop(into)] mode: Signal<ComparisonMode>,
    pair: RwSignal<ImagePair>,
    #[prop(into)] highlight: Signal<Option<Bounds>>,
    #[prop(into)] opacity: Signal<OverlayOpacity>,
    /// 一括比較の基準幅。手動アップロードでは None
    #[prop(into)]
    reference_width: Signal<Option<f64>>,
) -> impl IntoView {
    let container = NodeRef::<html::Div>::new();
    let (position, set_position) = signal(SwipePosition::default());
    let binding = SwipeBinding {
        controller: StoredValue::new_local(drag::swipe_controller(container, set_position)),
        next_container: StoredValue::new(0),
        container,
    };

    // スワイプ以外へ切り替えたらドラッグ中のリスナーとカーソルを解放する
    Effect::new(move |_| {
        let mode = mode.get();
        binding.with_controller(|controller| controller.set_mode(mode));
    });

    // DOM構造用。ハイライト・位置・不透明度を含めないので、それらの変化や
    // 向きが変わらないサイズ解決では再生成しない
    let structure = Memo::new(move |_| {
        let compositor = select_view(mode.get());
        pair.with(|pair| {
            compositor.compose(&CompositorInput::new(pair.first.as_ref(), pair.second.as_ref()))
        })
    });

    let live = Memo::new(move |_| {
        let compositor = select_view(mode.get());
        let highlight = highlight.get();
        let reference_width = reference_width.get();
        let opacity = opacity.get();
        let position = position.get();
        pair.with(|pair| {
            compositor.compose(
                &CompositorInput::new(pair.first.as_ref(), pair.second.as_ref())
                    .highlight(highlight)
                    .reference_width(reference_width)
                    .overlay_opacity(opacity)
                    .swipe_position(position),
            )
        })
    });

    view! {
        <div class="image-viewer">
            {move || match structure.get() {
                ViewFrame::Placeholder(placeholder) => {
                    view! { <PlaceholderView placeholder=placeholder /> }.into_any()
                }
                ViewFrame::SideBySide(frame) => {
                    view! { <SideBySideView frame=frame live=live frame_width=reference_width /> }
                        .into_any()
                }
                ViewFrame::Overlay(frame) => {
                    view! { <OverlayView frame=frame live=live frame_width=reference_width /> }
                        .into_any()
                }
                ViewFrame::Swipe(frame) => {
                    view! {
                        <SwipeView frame=frame live=live binding=binding frame_width=reference_width />
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
