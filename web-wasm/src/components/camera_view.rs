//! カメラプレビューコンポーネント
//!
//! video 要素は常に描画しておき（NodeRef を確保するため）、
//! カメラ使用中のみ表示する。

use leptos::html::Video;
use leptos::prelude::*;

#[component]
pub fn CameraView<FO, FC, FX>(
    video_ref: NodeRef<Video>,
    #[prop(into)] active: Signal<bool>,
    #[prop(into)] pending: Signal<bool>,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] capture_disabled: Signal<bool>,
    on_open: FO,
    on_capture: FC,
    on_cancel: FX,
) -> impl IntoView
where
    FO: Fn(()) + 'static + Clone + Send + Sync,
    FC: Fn(()) + 'static + Clone + Send + Sync,
    FX: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="camera-view">
            <video
                node_ref=video_ref
                class=move || if active.get() { "camera-preview" } else { "camera-preview hidden" }
            />

            <Show
                when=move || active.get()
                fallback={
                    let on_open = on_open.clone();
                    move || {
                        let on_open = on_open.clone();
                        view! {
                            <button
                                class="btn btn-primary"
                                disabled=move || disabled.get() || pending.get()
                                on:click=move |_| on_open(())
                            >
                                {move || if pending.get() { "جارٍ فتح الكاميرا..." } else { "📷 استخدام الكاميرا" }}
                            </button>
                        }
                    }
                }
            >
                <div class="camera-actions">
                    <button
                        class="btn btn-primary"
                        disabled=move || capture_disabled.get()
                        on:click={
                            let on_capture = on_capture.clone();
                            move |_| on_capture(())
                        }
                    >
                        "التقاط"
                    </button>
                    <button
                        class="btn btn-tertiary"
                        on:click={
                            let on_cancel = on_cancel.clone();
                            move |_| on_cancel(())
                        }
                    >
                        "إلغاء"
                    </button>
                </div>
            </Show>
        </div>
    }
}
