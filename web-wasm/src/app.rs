//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use visual_diff_common::{
    BatchSession, ComparisonMode, DiffsJson, ImageRef, Language, OverlayOpacity, ScreenData,
};

use crate::components::{
    batch_loader::BatchLoader,
    header::Header,
    image_viewer::ImageViewer,
    issue_cards::IssueCards,
    mode_toolbar::ModeToolbar,
    upload_area::UploadArea,
};
use crate::images::{self, ImagePair, Previews};

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // 比較状態（セッション中のみ保持）
    let mode = RwSignal::new(ComparisonMode::default());
    let opacity = RwSignal::new(OverlayOpacity::default());
    let language = RwSignal::new(Language::default());
    let pair = RwSignal::new(ImagePair::default());
    let batch = RwSignal::new(None::<BatchSession>);
    let previews = StoredValue::new_local(Previews::default());

    // 画像を差し替え、外れたプレビューを解放してサイズ取得を始める
    let show_images = move |incoming: Vec<ImageRef>| {
        let sources: Vec<String> = incoming.iter().map(|image| image.source.clone()).collect();
        let released = pair.try_update(|pair| pair.assign(incoming)).unwrap_or_default();
        previews.update_value(|previews| previews.release(&released));
        for source in sources {
            images::probe_dimensions(pair, source);
        }
    };

    let show_screen = move |screen: &ScreenData| {
        let (first, second) = screen.image_refs();
        show_images(vec![first, second]);
    };

    let on_files = move |files: Vec<web_sys::File>| {
        let incoming = previews
            .try_update_value(|previews| {
                files
                    .into_iter()
                    .take(2)
                    .map(|file| previews.insert(file))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        // 手動の画像は一括比較の画面と無関係
        batch.set(None);
        show_images(incoming);
    };

    let on_clear = move |_: ()| {
        let released = pair.try_update(ImagePair::clear).unwrap_or_default();
        previews.update_value(|previews| previews.release(&released));
        batch.set(None);
    };

    let on_batch_loaded = move |diffs: DiffsJson| match BatchSession::new(diffs) {
        Ok(session) => {
            gloo::console::debug!(format!(
                "batch loaded: {} screens",
                session.batch().screens.len()
            ));
            let screen = session.current_screen().clone();
            batch.set(Some(session));
            show_screen(&screen);
        }
        Err(e) => gloo::console::warn!(format!("batch rejected: {}", e)),
    };

    // 画面切替では選択のリセットが先に反映される
    let on_select_screen = move |index: usize| {
        let screen = batch
            .try_update(|batch| {
                batch
                    .as_mut()
                    .and_then(|session| session.select_screen_index(index).ok().cloned())
            })
            .flatten();
        if let Some(screen) = screen {
            show_screen(&screen);
        }
    };

    let on_toggle_issue = move |index: usize| {
        batch.update(|batch| {
            if let Some(session) = batch {
                session.toggle_issue(index);
            }
        });
    };

    let screens = Signal::derive(move || {
        batch.with(|batch| {
            batch
                .as_ref()
                .map(|session| {
                    session
                        .batch()
                        .screens
                        .iter()
                        .map(|screen| (screen.id.clone(), screen.screen_name.clone()))
                        .collect()
                })
                .unwrap_or_default()
        })
    });
    let current_screen = Signal::derive(move || {
        batch.with(|batch| batch.as_ref().map(BatchSession::current_index).unwrap_or_default())
    });
    let issues = Signal::derive(move || {
        batch.with(|batch| {
            batch
                .as_ref()
                .map(|session| session.issues().to_vec())
                .unwrap_or_default()
        })
    });
    let selected = Signal::derive(move || {
        batch.with(|batch| batch.as_ref().and_then(|session| session.selection().index()))
    });
    let highlight = Signal::derive(move || {
        batch.with(|batch| batch.as_ref().and_then(BatchSession::highlight))
    });
    let reference_width = Signal::derive(move || {
        batch.with(|batch| batch.as_ref().map(BatchSession::reference_width))
    });
    let has_images = Signal::derive(move || pair.with(|pair| !pair.is_empty()));
    let screen_title = Signal::derive(move || {
        batch.with(|batch| {
            batch
                .as_ref()
                .map(|session| session.current_screen().screen_name.clone())
        })
    });

    view! {
        <div class="container">
            <Header subtitle=screen_title />

            <ModeToolbar
                mode=mode
                opacity=opacity
                language=language
                has_images=has_images
                on_clear=on_clear
            />

            <UploadArea on_files=on_files />

            <BatchLoader
                screens=screens
                current=current_screen
                on_loaded=on_batch_loaded
                on_select=on_select_screen
            />

            <ImageViewer
                mode=mode
                pair=pair
                highlight=highlight
                opacity=opacity
                reference_width=reference_width
            />

            <Show when=move || batch.with(Option::is_some)>
                <IssueCards
                    issues=issues
                    selected=selected
                    language=language
                    on_toggle=on_toggle_issue
                />
            </Show>
        </div>
    }
}
