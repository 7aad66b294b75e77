//! スワイプ境界線のドラッグ（ブラウザ側）
//!
//! ドラッグ中だけ document に mousemove/mouseup を登録し、body のカーソルを
//! grabbing にする。セッションが drop されると両方とも元に戻る。

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;
use visual_diff_common::{ContainerGeometry, DragHost, SwipeController, SwipePosition};

pub type SharedSwipe = Rc<RefCell<SwipeController<DocumentDragHost>>>;

pub struct DocumentDragHost {
    controller: Weak<RefCell<SwipeController<DocumentDragHost>>>,
    container: NodeRef<html::Div>,
    set_position: WriteSignal<SwipePosition>,
}

/// 共有コントローラを作る
pub fn swipe_controller(
    container: NodeRef<html::Div>,
    set_position: WriteSignal<SwipePosition>,
) -> SharedSwipe {
    Rc::new_cyclic(|controller| {
        RefCell::new(SwipeController::new(DocumentDragHost {
            controller: controller.clone(),
            container,
            set_position,
        }))
    })
}

fn container_geometry(container: NodeRef<html::Div>) -> Option<ContainerGeometry> {
    let element = container.get_untracked()?;
    let rect = element.get_bounding_client_rect();
    ContainerGeometry::new(rect.left(), rect.width())
}

fn set_body_style(property: &str, value: Option<&str>) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let style = body.style();
    let result = match value {
        Some(value) => style.set_property(property, value),
        None => style.remove_property(property).map(|_| ()),
    };
    if result.is_err() {
        gloo::console::warn!(format!("failed to update body {}", property));
    }
}

pub struct DocumentDragSession {
    _listeners: Vec<EventListener>,
}

impl Drop for DocumentDragSession {
    fn drop(&mut self) {
        set_body_style("cursor", None);
        set_body_style("user-select", None);
    }
}

impl DragHost for DocumentDragHost {
    type Session = DocumentDragSession;

    fn acquire(&mut self) -> DocumentDragSession {
        set_body_style("cursor", Some("grabbing"));
        set_body_style("user-select", Some("none"));

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return DocumentDragSession { _listeners: Vec::new() };
        };

        let on_move = {
            let controller = self.controller.clone();
            let container = self.container;
            let set_position = self.set_position;
            EventListener::new(&document, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let Some(controller) = controller.upgrade() else {
                    return;
                };
                let Ok(mut controller) = controller.try_borrow_mut() else {
                    return;
                };
                let x = f64::from(event.client_x());
                if let Some(position) = controller.on_pointer_move(x, container_geometry(container)) {
                    set_position.set(position);
                }
            })
        };

        let on_up = {
            let controller = self.controller.clone();
            EventListener::new(&document, "mouseup", move |_| {
                let controller = controller.clone();
                // このリスナー自身を解放するので、コールバックを抜けてから終了する
                leptos::task::spawn_local(async move {
                    let Some(controller) = controller.upgrade() else {
                        return;
                    };
                    if let Ok(mut controller) = controller.try_borrow_mut() {
                        controller.end_drag();
                    };
                });
            })
        };

        DocumentDragSession {
            _listeners: vec![on_move, on_up],
        }
    }
}
