//! モード別の描画
//!
//! 合成結果 (`ViewFrame`) をDOMに変換する。DOM構造はハイライト・位置・不透明度を
//! 除いた合成結果から作り、それらは最新の合成結果を購読する。

use leptos::prelude::*;
use web_sys::MouseEvent;
use visual_diff_common::compositor::{OverlayFrame, SideBySideFrame, SwipeFrame};
use visual_diff_common::{Layer, Orientation, Panel, Placeholder, Placement, ViewFrame};

use super::image_viewer::SwipeBinding;
use super::image_with_fallback::ImageWithFallback;

fn layer_style(layer: &Layer) -> String {
    let mut style = String::new();
    if layer.opacity < 1.0 {
        style.push_str(&format!("opacity: {};", layer.opacity));
    }
    if let Some(clip) = &layer.clip {
        style.push_str(&format!("clip-path: {};", clip.to_css()));
    }
    style
}

#[derive(Clone, Copy)]
enum Slot {
    Overlay(usize),
    SwipeBase,
    SwipeRevealed,
}

fn live_style(live: Memo<ViewFrame>, slot: Slot) -> Signal<String> {
    Signal::derive(move || {
        live.with(|frame| {
            let layer = match (frame, slot) {
                (ViewFrame::Overlay(frame), Slot::Overlay(i)) => frame.layers.get(i),
                (ViewFrame::Swipe(frame), Slot::SwipeBase) => Some(&frame.base),
                (ViewFrame::Swipe(frame), Slot::SwipeRevealed) => Some(&frame.revealed),
                _ => None,
            };
            layer.map(layer_style).unwrap_or_default()
        })
    })
}

/// 最新の合成結果からハイライト位置を読む。並列表示ではパネル番号で選ぶ
fn live_highlight(live: Memo<ViewFrame>, panel: usize) -> Signal<Option<Placement>> {
    Signal::derive(move || {
        live.with(|frame| match frame {
            ViewFrame::SideBySide(frame) => match frame.panels.get(panel) {
                Some(Panel::Image { highlight, .. }) => *highlight,
                _ => None,
            },
            ViewFrame::Overlay(frame) => frame.highlight,
            ViewFrame::Swipe(frame) => frame.highlight,
            ViewFrame::Placeholder(_) => None,
        })
    })
}

/// 一括比較では基準幅で表示する
fn frame_style(width: Signal<Option<f64>>) -> Signal<String> {
    Signal::derive(move || {
        width
            .get()
            .map(|width| format!("width: {}px; max-width: 100%;", width))
            .unwrap_or_default()
    })
}

#[component]
fn Highlight(placement: Signal<Option<Placement>>) -> impl IntoView {
    move || {
        placement.get().map(|placement| {
            view! { <div class="highlight-box" style=placement.to_css()></div> }
        })
    }
}

#[component]
pub fn PlaceholderView(placeholder: Placeholder) -> impl IntoView {
    view! {
        <div class="viewer-placeholder">
            <p class="text-muted">{placeholder.message()}</p>
        </div>
    }
}

#[component]
pub fn SideBySideView(
    frame: SideBySideFrame,
    live: Memo<ViewFrame>,
    frame_width: Signal<Option<f64>>,
) -> impl IntoView {
    let class = match frame.orientation {
        Orientation::Horizontal => "side-by-side",
        Orientation::Vertical => "side-by-side stacked",
    };

    let panels = frame
        .panels
        .into_iter()
        .enumerate()
        .map(|(index, panel)| match panel {
            Panel::Empty { placeholder } => view! {
                <div class="panel">
                    <PlaceholderView placeholder=placeholder />
                </div>
            }
            .into_any(),
            Panel::Image { layer, caption, .. } => {
                let style = layer_style(&layer);
                view! {
                    <div class="panel">
                        <div class="panel-caption">{caption}</div>
                        <div class="image-frame" style=frame_style(frame_width)>
                            <ImageWithFallback content=layer.content style=Signal::stored(style) />
                            <Highlight placement=live_highlight(live, index) />
                        </div>
                    </div>
                }
                .into_any()
            }
        })
        .collect::<Vec<_>>();

    view! { <div class=class>{panels}</div> }
}

#[component]
pub fn OverlayView(
    frame: OverlayFrame,
    live: Memo<ViewFrame>,
    frame_width: Signal<Option<f64>>,
) -> impl IntoView {
    let layers = frame
        .layers
        .into_iter()
        .enumerate()
        .map(|(i, layer)| {
            let class = if i == 0 { "overlay-base" } else { "overlay-top" };
            view! {
                <ImageWithFallback
                    content=layer.content
                    style=live_style(live, Slot::Overlay(i))
                    class=class
                />
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="overlay-view">
            <div class="image-frame" style=frame_style(frame_width)>
                {layers}
                <Highlight placement=live_highlight(live, 0) />
            </div>
            <div class="panel-caption">{frame.caption}</div>
        </div>
    }
}

#[component]
pub fn SwipeView(
    frame: SwipeFrame,
    live: Memo<ViewFrame>,
    binding: SwipeBinding,
    frame_width: Signal<Option<f64>>,
) -> impl IntoView {
    let id = binding.next_container_id();

    // マウント後にコンテナを登録し、アンマウントで解除する
    Effect::new(move |_| {
        if binding.container.get().is_some() {
            binding.with_controller(|controller| controller.set_container(Some(id)));
        }
    });
    on_cleanup(move || {
        binding.with_controller(|controller| controller.set_container(None));
    });

    let handle_style = move || {
        live.with(|frame| match frame {
            ViewFrame::Swipe(frame) => format!("left: {}%;", frame.handle_left),
            _ => String::new(),
        })
    };

    view! {
        <div class="swipe-view">
            <div
                class="swipe-container image-frame"
                style=frame_style(frame_width)
                node_ref=binding.container
            >
                <ImageWithFallback
                    content=frame.base.content
                    style=live_style(live, Slot::SwipeBase)
                    class="swipe-base"
                />
                <ImageWithFallback
                    content=frame.revealed.content
                    style=live_style(live, Slot::SwipeRevealed)
                    class="swipe-revealed"
                />
                <Highlight placement=live_highlight(live, 0) />
                <div
                    class="swipe-handle"
                    style=handle_style
                    on:mousedown=move |ev: MouseEvent| {
                        ev.prevent_default();
                        binding.with_controller(|controller| {
                            controller.begin_drag();
                        });
                    }
                >
                    <div class="swipe-handle-grip">"⟷"</div>
                </div>
            </div>
            <div class="panel-caption">{frame.caption}</div>
        </div>
    }
}
