//! 比較画像の読み込み
//!
//! アップロード/貼り付けされたファイルのプレビューURL管理と、
//! 自然サイズの非同期取得。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::file::ObjectUrl;
use leptos::prelude::*;
use visual_diff_common::{Dimensions, ImageRef};

/// 表示中の2枚
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImagePair {
    pub first: Option<ImageRef>,
    pub second: Option<ImageRef>,
}

impl ImagePair {
    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }

    /// 新しい画像を割り当て、不要になった画像のソースを返す
    ///
    /// 2枚以上なら先頭2枚で置き換え、1枚なら2枚目待ちのときだけ2枚目に入り、
    /// それ以外は1枚目を置き換えて2枚目を空にする。
    pub fn assign(&mut self, incoming: Vec<ImageRef>) -> Vec<String> {
        let mut incoming = incoming.into_iter();
        let Some(next) = incoming.next() else {
            return Vec::new();
        };

        if let Some(following) = incoming.next() {
            let released = self.clear();
            self.first = Some(next);
            self.second = Some(following);
            return released;
        }

        if self.first.is_some() && self.second.is_none() {
            self.second = Some(next);
            return Vec::new();
        }

        let released = self.clear();
        self.first = Some(next);
        released
    }

    /// 両方を外し、そのソースを返す
    pub fn clear(&mut self) -> Vec<String> {
        [self.first.take(), self.second.take()]
            .into_iter()
            .flatten()
            .map(|image| image.source)
            .collect()
    }

    fn find_mut(&mut self, source: &str) -> impl Iterator<Item = &mut ImageRef> + '_ {
        let source = source.to_string();
        [self.first.as_mut(), self.second.as_mut()]
            .into_iter()
            .flatten()
            .filter(move |image| image.source == source)
    }

    /// サイズ取得完了を反映。該当画像が既に差し替わっていれば何もしない
    pub fn resolve(&mut self, source: &str, dims: Dimensions) -> bool {
        let mut changed = false;
        for image in self.find_mut(source) {
            image.mark_resolved(dims);
            changed = true;
        }
        changed
    }

    pub fn fail(&mut self, source: &str) -> bool {
        let mut changed = false;
        for image in self.find_mut(source) {
            image.mark_failed();
            changed = true;
        }
        changed
    }
}

/// ファイルから作ったプレビューURL。取り除くと revoke される
#[derive(Default)]
pub struct Previews {
    urls: HashMap<String, ObjectUrl>,
}

impl Previews {
    pub fn insert(&mut self, file: web_sys::File) -> ImageRef {
        let name = file.name();
        let url = ObjectUrl::from(gloo::file::File::from(file));
        let source = url.to_string();
        self.urls.insert(source.clone(), url);
        ImageRef::new(source, name)
    }

    pub fn release(&mut self, sources: &[String]) {
        for source in sources {
            if self.urls.remove(source).is_some() {
                gloo::console::debug!(format!("revoked preview {}", source));
            }
        }
    }
}

/// 完了待ちの間だけ保持するリスナー
///
/// リスナーのクロージャ自身がこれを参照するので、完了時に取り出して循環を切る。
pub struct PendingListeners<T>(Rc<RefCell<Vec<T>>>);

impl<T> Clone for PendingListeners<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Default for PendingListeners<T> {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(Vec::new())))
    }
}

impl<T> PendingListeners<T> {
    pub fn hold(&self, listeners: impl IntoIterator<Item = T>) {
        if let Ok(mut held) = self.0.try_borrow_mut() {
            held.extend(listeners);
        }
    }

    /// 保持中のものをすべて取り出す。2回目以降は空
    pub fn take(&self) -> Vec<T> {
        self.0
            .try_borrow_mut()
            .map(|mut held| std::mem::take(&mut *held))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.try_borrow().map(|held| held.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PendingListeners<EventListener> {
    /// 実行中のコールバック自身も含むので、抜けてから破棄する
    fn release(&self) {
        let listeners = self.take();
        leptos::task::spawn_local(async move {
            drop(listeners);
        });
    }
}

/// 画像をデコードして自然サイズを pair に反映する
pub fn probe_dimensions(pair: RwSignal<ImagePair>, source: String) {
    let Ok(img) = web_sys::HtmlImageElement::new() else {
        gloo::console::warn!("failed to create image element");
        return;
    };
    let pending = PendingListeners::default();

    let on_load = {
        let loaded = img.clone();
        let source = source.clone();
        let pending = pending.clone();
        EventListener::once(&img, "load", move |_| {
            let dims = Dimensions::new(loaded.natural_width(), loaded.natural_height());
            pair.update(|pair| {
                pair.resolve(&source, dims);
            });
            pending.release();
        })
    };
    let on_error = {
        let source = source.clone();
        let pending = pending.clone();
        EventListener::once(&img, "error", move |_| {
            gloo::console::warn!(format!("failed to decode {}", source));
            pair.update(|pair| {
                pair.fail(&source);
            });
            pending.release();
        })
    };
    // 読み込みが終わるまで生かしておく
    pending.hold([on_load, on_error]);

    img.set_src(&source);
}
