//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"ماسح الملصقات الغذائية"</h1>
            <p class="text-muted">"صوّر ملصق المنتج أو ارفع صورته للحصول على تقييم صحي"</p>
        </header>
    }
}
