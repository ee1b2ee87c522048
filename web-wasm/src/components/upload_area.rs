//! アップロードエリアコンポーネント
//!
//! ファイル選択またはドラッグ&ドロップで画像を1枚受け取る。
//! サイズ・形式のチェックとデコードは呼び出し側で行う。

use gloo::file::futures::read_as_data_url;
use label_scan_common::{EncodedImage, ScanError};
use leptos::prelude::*;
use web_sys::{DragEvent, File, HtmlInputElement};

#[component]
pub fn UploadArea<F>(
    #[prop(into)] disabled: Signal<bool>,
    on_file: F,
) -> impl IntoView
where
    F: Fn(File) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);

    let on_drop = {
        let on_file = on_file.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if disabled.get_untracked() {
                return;
            }

            if let Some(file) = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0))
            {
                on_file(file);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !disabled.get_untracked() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_change = {
        let on_file = on_file.clone();
        move |ev: leptos::ev::Event| {
            let input = event_target::<HtmlInputElement>(&ev);
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                on_file(file);
            }
            // 同じファイルを再選択しても change が発火するように
            input.set_value("");
        }
    };

    view! {
        <div
            class=move || {
                let mut classes = vec!["upload-area"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                if disabled.get() {
                    classes.push("disabled");
                }
                classes.join(" ")
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
        >
            <div class="upload-icon">"🖼️"</div>
            <p>"اسحب صورة الملصق إلى هنا أو"</p>
            <label class="btn btn-secondary">
                "اختر صورة"
                <input
                    type="file"
                    accept="image/*"
                    class="hidden-input"
                    disabled=move || disabled.get()
                    on:change=on_change
                />
            </label>
            <p class="text-muted">"الحد الأقصى لحجم الملف: 5 ميغابايت"</p>
        </div>
    }
}

/// ファイルを data URL として読み込む
pub async fn read_image_file(file: File) -> Result<EncodedImage, ScanError> {
    let file = gloo::file::File::from(file);
    let data_url = read_as_data_url(&file).await.map_err(|e| {
        log::warn!("file read failed: {:?}", e);
        ScanError::FileRead
    })?;

    EncodedImage::from_data_url(data_url).ok_or(ScanError::FileRead)
}
