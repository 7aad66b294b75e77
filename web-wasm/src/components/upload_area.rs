//! アップロードエリアコンポーネント
//!
//! ドラッグ&ドロップ、クリックでのファイル選択、クリップボードからの貼り付けで
//! 比較画像を受け取る。

use gloo::events::EventListener;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DataTransfer, DragEvent, File, FileList};

fn image_files(files: FileList) -> Vec<File> {
    (0..files.length())
        .filter_map(|i| files.get(i))
        .filter(|file| file.type_().starts_with("image/"))
        .collect()
}

fn pasted_files(data: DataTransfer) -> Vec<File> {
    let items = data.items();
    (0..items.length())
        .filter_map(|i| items.get(i))
        .filter(|item| item.kind() == "file")
        .filter_map(|item| item.get_as_file().ok().flatten())
        .filter(|file| file.type_().starts_with("image/"))
        .collect()
}

#[component]
pub fn UploadArea<F>(on_files: F) -> impl IntoView
where
    F: Fn(Vec<File>) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<html::Input>::new();

    // 貼り付けはページ全体で受け付ける
    let paste_listener = web_sys::window().and_then(|w| w.document()).map(|document| {
        let on_files = on_files.clone();
        EventListener::new(&document, "paste", move |event| {
            let Some(event) = event.dyn_ref::<ClipboardEvent>() else {
                return;
            };
            let files = event.clipboard_data().map(pasted_files).unwrap_or_default();
            if !files.is_empty() {
                gloo::console::debug!(format!("pasted {} image(s)", files.len()));
                on_files(files);
            }
        })
    });
    // コンポーネントと同じ寿命
    StoredValue::new_local(paste_listener);

    let on_drop = {
        let on_files = on_files.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            let files = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .map(image_files)
                .unwrap_or_default();
            if !files.is_empty() {
                on_files(files);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = {
        let on_files = on_files.clone();
        move |_| {
            let Some(input) = input_ref.get() else {
                return;
            };
            let files = input.files().map(image_files).unwrap_or_default();
            // 同じファイルを続けて選べるようにする
            input.set_value("");
            if !files.is_empty() {
                on_files(files);
            }
        }
    };

    view! {
        <div
            class=move || {
                if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <input
                node_ref=input_ref
                type="file"
                accept="image/*"
                multiple=true
                style="display: none"
                on:click=|ev| ev.stop_propagation()
                on:change=on_change
            />
            <div class="upload-icon">"🖼"</div>
            <p>"Drop images, click to choose, or paste"</p>
            <p class="text-muted">"First image: design / second image: implementation"</p>
        </div>
    }
}
