//! 取得した画像のプレビューと解析ボタン

use leptos::prelude::*;

#[component]
pub fn Preview<FA>(
    #[prop(into)] image_url: Signal<Option<String>>,
    #[prop(into)] is_analyzing: Signal<bool>,
    #[prop(into)] can_analyze: Signal<bool>,
    #[prop(into)] camera_active: Signal<bool>,
    on_analyze: FA,
) -> impl IntoView
where
    FA: Fn(()) + 'static + Clone + Send + Sync,
{
    // カメラ使用中はプレビューを出さない
    view! {
        {move || image_url.get().filter(|_| !camera_active.get()).map(|url| {
            let on_analyze = on_analyze.clone();
            view! {
                <div class="preview">
                    <img src=url alt="صورة الملصق" />
                    <button
                        class="btn btn-primary btn-analyze"
                        disabled=move || !can_analyze.get()
                        on:click=move |_| on_analyze(())
                    >
                        {move || if is_analyzing.get() { "جارٍ التحليل..." } else { "تحليل الملصق" }}
                    </button>
                </div>
            }
        })}
    }
}
