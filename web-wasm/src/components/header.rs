//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header(
    /// 一括比較中の画面名
    #[prop(into)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Visual Diff - デザイン/実装 比較ビューア"</h1>
            {move || subtitle.get().map(|name| view! { <p class="header-subtitle">{name}</p> })}
        </header>
    }
}
