//! 解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - LabelAnalysis: 推論サービスが返す内容（timestampなし）
//! - AnalysisResult: LabelAnalysis + クライアント側で付与したtimestamp
//! - HealthGrade / Nutrition / NutrientValue

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 健康評価（A が最良、E が最悪）
///
/// A〜E 以外の値は `Unknown` として元の文字列のまま保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HealthGrade {
    A,
    B,
    C,
    D,
    E,
    Unknown(String),
}

impl Default for HealthGrade {
    fn default() -> Self {
        HealthGrade::Unknown(String::new())
    }
}

impl HealthGrade {
    pub const ALL: [HealthGrade; 5] = [
        HealthGrade::A,
        HealthGrade::B,
        HealthGrade::C,
        HealthGrade::D,
        HealthGrade::E,
    ];

    /// 文字列から評価を判定（前後の空白を除去、大文字小文字を区別しない）
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "A" => HealthGrade::A,
            "B" => HealthGrade::B,
            "C" => HealthGrade::C,
            "D" => HealthGrade::D,
            "E" => HealthGrade::E,
            _ => HealthGrade::Unknown(raw.trim().to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, HealthGrade::Unknown(_))
    }

    /// バッジ表示用の文字
    pub fn letter(&self) -> &str {
        match self {
            HealthGrade::A => "A",
            HealthGrade::B => "B",
            HealthGrade::C => "C",
            HealthGrade::D => "D",
            HealthGrade::E => "E",
            HealthGrade::Unknown(_) => "?",
        }
    }

    /// CSSクラス名（A=excellent ... E=poor, それ以外はフォールバック）
    pub fn css_class(&self) -> &'static str {
        match self {
            HealthGrade::A => "grade-a",
            HealthGrade::B => "grade-b",
            HealthGrade::C => "grade-c",
            HealthGrade::D => "grade-d",
            HealthGrade::E => "grade-e",
            HealthGrade::Unknown(_) => "grade-unknown",
        }
    }

    /// 評価ラベル（アラビア語）
    pub fn label(&self) -> &'static str {
        match self {
            HealthGrade::A => "ممتاز",
            HealthGrade::B => "جيد جداً",
            HealthGrade::C => "جيد",
            HealthGrade::D => "ضعيف",
            HealthGrade::E => "سيئ",
            HealthGrade::Unknown(_) => "غير معروف",
        }
    }
}

impl From<String> for HealthGrade {
    fn from(value: String) -> Self {
        HealthGrade::parse(&value)
    }
}

impl From<&str> for HealthGrade {
    fn from(value: &str) -> Self {
        HealthGrade::parse(value)
    }
}

impl From<HealthGrade> for String {
    fn from(grade: HealthGrade) -> Self {
        match grade {
            HealthGrade::Unknown(raw) => raw,
            known => known.letter().to_string(),
        }
    }
}

impl fmt::Display for HealthGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// 栄養成分の値（数値またはテキスト、単位は100gあたりで暗黙）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NutrientValue {
    Number(f64),
    Text(String),
}

impl Default for NutrientValue {
    fn default() -> Self {
        NutrientValue::Text(String::new())
    }
}

impl NutrientValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, NutrientValue::Text(s) if s.trim().is_empty())
    }

    /// JSON値から寛容に変換（null/欠損は空テキスト）
    pub fn from_json(value: Option<&serde_json::Value>) -> Self {
        match value {
            None | Some(serde_json::Value::Null) => NutrientValue::default(),
            Some(serde_json::Value::Number(n)) => n
                .as_f64()
                .map(NutrientValue::Number)
                .unwrap_or_else(|| NutrientValue::Text(n.to_string())),
            Some(serde_json::Value::String(s)) => NutrientValue::Text(s.trim().to_string()),
            Some(other) => NutrientValue::Text(other.to_string()),
        }
    }
}

impl fmt::Display for NutrientValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NutrientValue::Number(n) if n.fract() == 0.0 => write!(f, "{:.0}", n),
            NutrientValue::Number(n) => write!(f, "{}", n),
            NutrientValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// 100gあたりの栄養成分
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nutrition {
    pub calories: NutrientValue,
    pub protein: NutrientValue,
    #[serde(alias = "carbs")]
    pub carbohydrates: NutrientValue,
    pub sugar: NutrientValue,
    pub fat: NutrientValue,
}

impl Nutrition {
    /// 表示用の (ラベル, 値) 一覧
    pub fn rows(&self) -> [(&'static str, &NutrientValue); 5] {
        [
            ("السعرات الحرارية", &self.calories),
            ("البروتين", &self.protein),
            ("الكربوهيدرات", &self.carbohydrates),
            ("السكر", &self.sugar),
            ("الدهون", &self.fat),
        ]
    }
}

/// アレルゲンなしを表す値
const NO_ALLERGEN_SENTINELS: &[&str] = &["لا يوجد", "لا توجد", "none", "n/a"];

/// 推論サービスから得られるラベル解析内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelAnalysis {
    pub product_name: String,
    pub ingredients: Vec<String>,
    pub nutrition: Nutrition,
    pub allergens: Vec<String>,
    pub health_grade: HealthGrade,
    pub health_summary: String,
}

impl LabelAnalysis {
    /// 実際のアレルゲンが含まれるか（空、または「なし」のみならfalse）
    pub fn has_allergens(&self) -> bool {
        self.allergens.iter().any(|a| {
            let a = a.trim();
            !a.is_empty()
                && !NO_ALLERGEN_SENTINELS
                    .iter()
                    .any(|s| a.eq_ignore_ascii_case(s))
        })
    }
}

/// 1回のスキャン結果
///
/// `timestamp` は結果を受け取った時点でクライアントが設定する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub analysis: LabelAnalysis,

    #[serde(default)]
    pub timestamp: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new(analysis: LabelAnalysis, timestamp: DateTime<Utc>) -> Self {
        Self { analysis, timestamp }
    }

    pub fn product_name(&self) -> &str {
        &self.analysis.product_name
    }

    pub fn health_grade(&self) -> &HealthGrade {
        &self.analysis.health_grade
    }

    /// 履歴一覧用の日時表示
    pub fn display_time(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M").to_string()
    }
}
