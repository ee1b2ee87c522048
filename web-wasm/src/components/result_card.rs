//! 解析結果カードコンポーネント

use label_scan_common::{AnalysisResult, NutrientValue};
use leptos::prelude::*;

/// 栄養成分の表示文字列（空なら "—"）
fn nutrient_text(value: &NutrientValue) -> String {
    if value.is_empty() {
        "—".to_string()
    } else {
        value.to_string()
    }
}

#[component]
pub fn ResultCard(result: AnalysisResult) -> impl IntoView {
    let time = result.display_time();
    let grade = result.health_grade().clone();
    let analysis = result.analysis;
    let has_allergens = analysis.has_allergens();

    let nutrition_rows = analysis
        .nutrition
        .rows()
        .into_iter()
        .map(|(label, value)| {
            view! {
                <tr>
                    <th>{label}</th>
                    <td>{nutrient_text(value)}</td>
                </tr>
            }
        })
        .collect_view();

    let ingredients = analysis
        .ingredients
        .iter()
        .map(|item| view! { <li>{item.clone()}</li> })
        .collect_view();

    let allergens = if has_allergens {
        analysis
            .allergens
            .iter()
            .map(|item| view! { <span class="allergen-tag">{item.clone()}</span> })
            .collect_view()
            .into_any()
    } else {
        view! { <span class="text-muted">"لا توجد مسببات حساسية"</span> }.into_any()
    };

    view! {
        <section class="result-card">
            <div class="result-header">
                <div class=format!("grade-badge {}", grade.css_class())>
                    <span class="grade-letter">{grade.letter().to_string()}</span>
                    <span class="grade-label">{grade.label()}</span>
                </div>
                <div>
                    <h2>{analysis.product_name.clone()}</h2>
                    <p class="text-muted">{time}</p>
                </div>
            </div>

            <p class="health-summary">{analysis.health_summary.clone()}</p>

            <h3>"القيم الغذائية (لكل 100 غ)"</h3>
            <table class="nutrition-table">
                <tbody>{nutrition_rows}</tbody>
            </table>

            <h3>"المكونات"</h3>
            <ul class="ingredients">{ingredients}</ul>

            <h3>"مسببات الحساسية"</h3>
            <div class="allergens">{allergens}</div>
        </section>
    }
}
