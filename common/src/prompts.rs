//! プロンプト生成モジュール
//!
//! 食品ラベル解析用の固定プロンプト（出力言語はアラビア語）

use crate::types::HealthGrade;

/// 健康評価の説明（プロンプトに埋め込む）
fn grade_scale() -> String {
    HealthGrade::ALL
        .iter()
        .map(|g| format!("{} = {}", g.letter(), g.label()))
        .collect::<Vec<_>>()
        .join("، ")
}

/// ラベル解析プロンプト生成
///
/// 商品名・原材料・100gあたりの栄養成分・アレルゲン・A〜Eの健康評価・
/// 1文の要約を、指定のJSONオブジェクトのみで返すよう指示する。
pub fn build_label_prompt() -> String {
    let scale = grade_scale();

    format!(
        r#"أنت خبير تغذية. حلّل صورة ملصق المنتج الغذائي المرفقة واستخرج المعلومات التالية باللغة العربية:

1. اسم المنتج
2. قائمة المكونات كما تظهر على الملصق
3. القيم الغذائية لكل 100 غرام: السعرات الحرارية، البروتين، الكربوهيدرات، السكر، الدهون
4. مسببات الحساسية (إن لم توجد اكتب "لا يوجد")
5. تقييم صحي من خمس درجات: {scale}
6. ملخص صحي في جملة واحدة

أجب فقط بكائن JSON بالشكل التالي تماماً، دون أي نص إضافي:
{{
  "product_name": "اسم المنتج",
  "ingredients": ["مكون 1", "مكون 2"],
  "nutrition": {{
    "calories": 0,
    "protein": 0,
    "carbohydrates": 0,
    "sugar": 0,
    "fat": 0
  }},
  "allergens": ["مسبب حساسية"],
  "health_grade": "A",
  "health_summary": "جملة واحدة تلخص القيمة الصحية"
}}"#
    )
}
