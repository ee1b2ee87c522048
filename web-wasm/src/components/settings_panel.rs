//! 設定パネルコンポーネント

use leptos::prelude::*;

#[component]
pub fn SettingsPanel<FS>(
    api_key: ReadSignal<String>,
    set_api_key: WriteSignal<String>,
    model: ReadSignal<String>,
    set_model: WriteSignal<String>,
    status: ReadSignal<String>,
    on_save: FS,
) -> impl IntoView
where
    FS: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <details class="settings-panel">
            <summary>"الإعدادات"</summary>
            <div class="settings-grid">
                <div class="form-group">
                    <label for="api-key">"Gemini API Key"</label>
                    <input
                        type="password"
                        id="api-key"
                        placeholder="أدخل مفتاح API..."
                        prop:value=move || api_key.get()
                        on:input=move |ev| {
                            set_api_key.set(event_target_value(&ev));
                        }
                    />
                    <a
                        href="https://aistudio.google.com/app/apikey"
                        target="_blank"
                        rel="noopener noreferrer"
                        class="api-key-link"
                    >
                        "الحصول على مفتاح ←"
                    </a>
                </div>

                <div class="form-group">
                    <label for="model">"النموذج"</label>
                    <input
                        type="text"
                        id="model"
                        prop:value=move || model.get()
                        on:input=move |ev| {
                            set_model.set(event_target_value(&ev));
                        }
                    />
                </div>

                <div class="api-actions">
                    <button
                        class="btn btn-primary btn-small"
                        on:click={
                            let on_save = on_save.clone();
                            move |_| on_save(())
                        }
                    >
                        "حفظ"
                    </button>
                    <span class="settings-status">{move || status.get()}</span>
                </div>
            </div>
        </details>
    }
}
