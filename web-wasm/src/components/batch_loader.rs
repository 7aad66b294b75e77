//! 一括比較JSONの読み込みと画面選択

use gloo::file::callbacks::{read_as_text, FileReader};
use leptos::html;
use leptos::prelude::*;
use visual_diff_common::{parse_batch, DiffsJson};

#[component]
pub fn BatchLoader<FL, FS>(
    /// (画面ID, 画面名) の一覧。未読み込みなら空
    #[prop(into)]
    screens: Signal<Vec<(String, String)>>,
    #[prop(into)] current: Signal<usize>,
    on_loaded: FL,
    on_select: FS,
) -> impl IntoView
where
    FL: Fn(DiffsJson) + 'static + Clone + Send + Sync,
    FS: Fn(usize) + 'static + Clone + Send + Sync,
{
    let input_ref = NodeRef::<html::Input>::new();
    let (error, set_error) = signal(None::<String>);
    // 読み込み中のリーダー。drop すると読み込みが中断される
    let reader = StoredValue::new_local(None::<FileReader>);

    let on_change = move |_| {
        let Some(file) = input_ref
            .get()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };

        let on_loaded = on_loaded.clone();
        let blob = gloo::file::Blob::from(web_sys::Blob::from(file));
        let task = read_as_text(&blob, move |result| {
            match result.map_err(|e| e.to_string()).and_then(|text| {
                parse_batch(&text).map_err(|e| e.to_string())
            }) {
                Ok(batch) => {
                    set_error.set(None);
                    on_loaded(batch);
                }
                Err(message) => {
                    gloo::console::warn!(format!("invalid batch file: {}", message));
                    set_error.set(Some(message));
                }
            }
        });
        reader.set_value(Some(task));
    };

    view! {
        <div class="batch-loader">
            <label class="btn btn-secondary btn-small">
                "Load diffs.json"
                <input
                    node_ref=input_ref
                    type="file"
                    accept="application/json,.json"
                    style="display: none"
                    on:change=on_change
                />
            </label>

            <Show when=move || screens.with(|screens| !screens.is_empty())>
                <select
                    class="screen-select"
                    on:change={
                        let on_select = on_select.clone();
                        move |ev| {
                            if let Ok(index) = event_target_value(&ev).parse::<usize>() {
                                on_select(index);
                            }
                        }
                    }
                >
                    {move || {
                        screens
                            .get()
                            .into_iter()
                            .enumerate()
                            .map(|(index, (id, name))| {
                                view! {
                                    <option
                                        value=index.to_string()
                                        selected=move || current.get() == index
                                    >
                                        {format!("{} ({})", name, id)}
                                    </option>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </select>
            </Show>

            {move || error.get().map(|message| view! { <p class="error-text">{message}</p> })}
        </div>
    }
}
