//! 解析結果のターミナル表示

use label_scan_common::{AnalysisResult, NutrientValue};
use std::fmt::Write;

fn nutrient_text(value: &NutrientValue) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

/// 結果1件を複数行で表示用に整形
pub fn render_result(result: &AnalysisResult) -> String {
    let analysis = &result.analysis;
    let grade = &analysis.health_grade;
    let mut out = String::new();

    let _ = writeln!(out, "📦 {}", analysis.product_name);
    let _ = writeln!(out, "評価: [{}] {}", grade.letter(), grade.label());
    if !analysis.health_summary.is_empty() {
        let _ = writeln!(out, "{}", analysis.health_summary);
    }

    let _ = writeln!(out, "\n栄養成分（100gあたり）:");
    for (label, value) in analysis.nutrition.rows() {
        let _ = writeln!(out, "  {}: {}", label, nutrient_text(value));
    }

    let ingredients = if analysis.ingredients.is_empty() {
        "-".to_string()
    } else {
        analysis.ingredients.join("، ")
    };
    let _ = writeln!(out, "\n原材料: {}", ingredients);

    let allergens = if analysis.has_allergens() {
        analysis.allergens.join("، ")
    } else {
        "なし".to_string()
    };
    let _ = writeln!(out, "アレルゲン: {}", allergens);
    let _ = write!(out, "日時: {}", result.display_time());

    out
}

/// 履歴一覧の1行
pub fn render_history_line(index: usize, result: &AnalysisResult) -> String {
    format!(
        "{:>2}  {}  [{}]  {}",
        index,
        result.display_time(),
        result.health_grade().letter(),
        result.product_name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use label_scan_common::{HealthGrade, LabelAnalysis, Nutrition};

    fn sample() -> AnalysisResult {
        AnalysisResult::new(
            LabelAnalysis {
                product_name: "لبن".to_string(),
                ingredients: vec!["حليب".to_string(), "خميرة".to_string()],
                nutrition: Nutrition {
                    calories: NutrientValue::Number(60.0),
                    ..Default::default()
                },
                allergens: vec!["حليب".to_string()],
                health_grade: HealthGrade::A,
                health_summary: "خيار صحي.".to_string(),
            },
            DateTime::from_timestamp(1_704_067_200, 0).unwrap(),
        )
    }

    #[test]
    fn test_render_result() {
        let text = render_result(&sample());
        assert!(text.contains("📦 لبن"));
        assert!(text.contains("評価: [A] ممتاز"));
        assert!(text.contains("السعرات الحرارية: 60"));
        assert!(text.contains("الدهون: -"));
        assert!(text.contains("原材料: حليب، خميرة"));
        assert!(text.contains("アレルゲン: حليب"));
        assert!(text.ends_with("日時: 2024-01-01 00:00"));
    }

    #[test]
    fn test_render_result_without_allergens() {
        let mut result = sample();
        result.analysis.allergens = vec!["لا يوجد".to_string()];
        assert!(render_result(&result).contains("アレルゲン: なし"));
    }

    #[test]
    fn test_render_history_line() {
        let line = render_history_line(3, &sample());
        assert_eq!(line, " 3  2024-01-01 00:00  [A]  لبن");
    }
}
