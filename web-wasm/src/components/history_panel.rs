//! 履歴パネルコンポーネント

use label_scan_common::AnalysisResult;
use leptos::prelude::*;

#[component]
pub fn HistoryPanel<FS, FR, FC>(
    #[prop(into)] entries: Signal<Vec<AnalysisResult>>,
    on_select: FS,
    on_remove: FR,
    on_clear: FC,
) -> impl IntoView
where
    FS: Fn(usize) + 'static + Clone + Send + Sync,
    FR: Fn(usize) + 'static + Clone + Send + Sync,
    FC: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <section class="history-panel">
            <div class="history-header">
                <h2>"سجل الفحوصات"</h2>
                <button
                    class="btn btn-tertiary btn-small"
                    disabled=move || entries.with(|e| e.is_empty())
                    on:click=move |_| on_clear(())
                >
                    "مسح السجل"
                </button>
            </div>

            <Show
                when=move || entries.with(|e| !e.is_empty())
                fallback=|| view! { <p class="text-muted">"لا توجد فحوصات سابقة"</p> }
            >
                <ul class="history-list">
                    <For
                        each=move || entries.get().into_iter().enumerate()
                        key=|(index, entry)| (*index, entry.timestamp.timestamp_millis())
                        children={
                            let on_select = on_select.clone();
                            let on_remove = on_remove.clone();
                            move |(index, entry)| {
                                let on_select = on_select.clone();
                                let on_remove = on_remove.clone();
                                let grade = entry.health_grade().clone();
                                view! {
                                    <li class="history-item">
                                        <button
                                            class="history-open"
                                            on:click=move |_| on_select(index)
                                        >
                                            <span class=format!("grade-chip {}", grade.css_class())>
                                                {grade.letter().to_string()}
                                            </span>
                                            <span class="history-name">{entry.product_name().to_string()}</span>
                                            <span class="history-time text-muted">{entry.display_time()}</span>
                                        </button>
                                        <button
                                            class="btn btn-small btn-tertiary"
                                            title="حذف"
                                            on:click=move |_| on_remove(index)
                                        >
                                            "✕"
                                        </button>
                                    </li>
                                }
                            }
                        }
                    />
                </ul>
            </Show>
        </section>
    }
}
