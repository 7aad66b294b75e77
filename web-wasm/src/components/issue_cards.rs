//! 差分カード一覧

use leptos::prelude::*;
use visual_diff_common::{Issue, Language};

#[component]
pub fn IssueCards<F>(
    #[prop(into)] issues: Signal<Vec<Issue>>,
    #[prop(into)] selected: Signal<Option<usize>>,
    #[prop(into)] language: Signal<Language>,
    on_toggle: F,
) -> impl IntoView
where
    F: Fn(usize) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="issue-cards">
            <Show
                when=move || issues.with(|issues| !issues.is_empty())
                fallback=|| view! { <p class="text-muted">"No issues"</p> }
            >
                {
                    let on_toggle = on_toggle.clone();
                    move || {
                        let language = language.get();
                        issues
                            .get()
                            .into_iter()
                            .enumerate()
                            .map(|(index, issue)| {
                                view! {
                                    <IssueCard
                                        index=index
                                        issue=issue
                                        language=language
                                        selected=selected
                                        on_toggle=on_toggle.clone()
                                    />
                                }
                            })
                            .collect::<Vec<_>>()
                    }
                }
            </Show>
        </div>
    }
}

#[component]
fn IssueCard<F>(
    index: usize,
    issue: Issue,
    language: Language,
    selected: Signal<Option<usize>>,
    on_toggle: F,
) -> impl IntoView
where
    F: Fn(usize) + 'static + Clone + Send + Sync,
{
    let selectable = issue.is_selectable();
    let fix = issue.suggested_fix(language).to_string();
    let is_selected = move || selected.get() == Some(index);

    view! {
        <div
            class=format!("issue-card severity-{}", issue.severity)
            class:selectable=selectable
            class:selected=is_selected
            on:click=move |_| {
                if selectable {
                    on_toggle(index);
                }
            }
        >
            <div class="issue-header">
                <span class="issue-type">{issue.category.clone()}</span>
                <span class="severity-badge">{issue.severity.as_str()}</span>
            </div>
            <div class="issue-values">
                <div>
                    <span class="value-label">"Figma"</span>
                    <code>{issue.expected_value.clone()}</code>
                </div>
                <div>
                    <span class="value-label">"App"</span>
                    <code>{issue.actual_value.clone()}</code>
                </div>
            </div>
            {(!fix.is_empty()).then(|| view! { <p class="suggested-fix">{fix}</p> })}
        </div>
    }
}
