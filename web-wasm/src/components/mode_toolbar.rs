//! 比較モード切替ツールバー

use leptos::prelude::*;
use visual_diff_common::{ComparisonMode, Language, OverlayOpacity};

#[component]
pub fn ModeToolbar<FC>(
    mode: RwSignal<ComparisonMode>,
    opacity: RwSignal<OverlayOpacity>,
    language: RwSignal<Language>,
    #[prop(into)] has_images: Signal<bool>,
    on_clear: FC,
) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone + Send + Sync,
{
    let buttons = ComparisonMode::ALL
        .into_iter()
        .map(|value| {
            view! {
                <button
                    class="btn btn-small mode-button"
                    class:active=move || mode.get() == value
                    on:click=move |_| mode.set(value)
                >
                    {value.label()}
                </button>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="mode-toolbar">
            <div class="mode-toggle">{buttons}</div>

            <Show when=move || mode.get() == ComparisonMode::Overlay>
                <label class="opacity-control">
                    "Opacity"
                    <input
                        type="range"
                        min="0"
                        max="100"
                        prop:value=move || opacity.get().percent().to_string()
                        on:input=move |ev| {
                            let value: u8 = event_target_value(&ev).parse().unwrap_or(50);
                            opacity.set(OverlayOpacity::new(value));
                        }
                    />
                    <span>{move || format!("{}%", opacity.get().percent())}</span>
                </label>
            </Show>

            <select
                class="language-select"
                on:change=move |ev| {
                    if let Ok(value) = event_target_value(&ev).parse::<Language>() {
                        language.set(value);
                    }
                }
            >
                <option value="en" selected=move || language.get() == Language::En>"English"</option>
                <option value="ko" selected=move || language.get() == Language::Ko>"한국어"</option>
            </select>

            <Show when=move || has_images.get()>
                <button
                    class="btn btn-tertiary btn-small"
                    on:click={
                        let on_clear = on_clear.clone();
                        move |_| on_clear(())
                    }
                >
                    "Clear images"
                </button>
            </Show>
        </div>
    }
}
