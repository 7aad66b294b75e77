//! 読み込み失敗時に代替表示へ切り替わる画像

use leptos::prelude::*;
use visual_diff_common::compositor::IMAGE_LOAD_FAILED;
use visual_diff_common::LayerContent;

#[component]
pub fn ImageWithFallback(
    content: LayerContent,
    #[prop(into)] style: Signal<String>,
    #[prop(optional)] class: &'static str,
) -> impl IntoView {
    let (source, name, failed_before_render) = match content {
        LayerContent::Image { source, name } => (source, name, false),
        LayerContent::LoadFailed { name } => (String::new(), name, true),
    };
    // ソースが変わると別インスタンスになるので、失敗状態も初期化される
    let (failed, set_failed) = signal(failed_before_render);
    let fallback_name = name.clone();

    view! {
        <Show
            when=move || !failed.get()
            fallback=move || view! {
                <div class=format!("image-fallback {}", class) style=move || style.get()>
                    <p>{IMAGE_LOAD_FAILED}</p>
                    <p class="text-muted">{fallback_name.clone()}</p>
                </div>
            }
        >
            <img
                class=class
                src=source.clone()
                alt=name.clone()
                style=move || style.get()
                draggable="false"
                on:error={
                    let name = name.clone();
                    move |_| {
                        gloo::console::warn!(format!("image failed to load: {}", name));
                        set_failed.set(true);
                    }
                }
            />
        </Show>
    }
}
