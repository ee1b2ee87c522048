//! APIレスポンスパーサー
//!
//! 推論サービスのレスポンステキストからJSONオブジェクトを抽出し、
//! LabelAnalysis にフィールド単位で寛容に変換する。
//! JSONとして解釈できないレスポンスは失敗として扱う。

use crate::error::{Error, Result};
use crate::types::{HealthGrade, LabelAnalysis, NutrientValue, Nutrition};
use serde_json::{Map, Value};

/// レスポンスからJSONオブジェクト部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 最初の `{` から最後の `}` まで
/// 3. エラー
///
/// # Examples
/// ```
/// use label_scan_common::extract_json_object;
///
/// let response = "result: {\"health_grade\": \"A\"}";
/// let json = extract_json_object(response).unwrap();
/// assert_eq!(json, "{\"health_grade\": \"A\"}");
/// ```
pub fn extract_json_object(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + "```json".len();
        if let Some(end_offset) = response[start..].find("```") {
            return Ok(response[start..start + end_offset].trim());
        }
    }

    if let (Some(start), Some(end)) = (response.find('{'), response.rfind('}')) {
        if end > start {
            return Ok(&response[start..=end]);
        }
    }

    Err(Error::Parse("JSON object not found".into()))
}

/// ラベル解析レスポンスをパース
///
/// # Returns
/// * `Ok(LabelAnalysis)` - パース成功（欠損・型違いのフィールドは空値）
/// * `Err` - JSONが見つからない、またはJSONオブジェクトでない
pub fn parse_analysis_response(response: &str) -> Result<LabelAnalysis> {
    let json_str = extract_json_object(response)?;
    let value: Value = serde_json::from_str(json_str)?;

    let obj = match value {
        Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
        other => other,
    };

    let Value::Object(map) = obj else {
        return Err(Error::Parse("JSON object expected".into()));
    };

    Ok(LabelAnalysis {
        product_name: get_string(&map, "product_name").unwrap_or_default(),
        ingredients: get_string_list(&map, "ingredients"),
        nutrition: get_nutrition(&map),
        allergens: get_string_list(&map, "allergens"),
        health_grade: get_string(&map, "health_grade")
            .map(|s| HealthGrade::parse(&s))
            .unwrap_or_default(),
        health_summary: get_string(&map, "health_summary").unwrap_or_default(),
    })
}

fn get_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    let value = map.get(key)?;
    if let Some(s) = value.as_str() {
        return Some(s.trim().to_string());
    }
    if value.is_null() {
        return None;
    }
    Some(value.to_string())
}

fn get_string_list(map: &Map<String, Value>, key: &str) -> Vec<String> {
    match map.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

fn get_nutrition(map: &Map<String, Value>) -> Nutrition {
    let Some(Value::Object(n)) = map.get("nutrition") else {
        return Nutrition::default();
    };

    Nutrition {
        calories: NutrientValue::from_json(n.get("calories")),
        protein: NutrientValue::from_json(n.get("protein")),
        carbohydrates: NutrientValue::from_json(n.get("carbohydrates").or_else(|| n.get("carbs"))),
        sugar: NutrientValue::from_json(n.get("sugar")),
        fat: NutrientValue::from_json(n.get("fat")),
    }
}
