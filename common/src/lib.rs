//! Label Scan Common Library
//!
//! CLIとWeb(WASM)で共有される型とロジック:
//! 画像チェック、プロンプト、レスポンス解析、履歴、セッション状態

pub mod capture;
pub mod error;
pub mod gemini;
pub mod history;
pub mod parser;
pub mod prompts;
pub mod session;
pub mod types;

pub use capture::{check_upload, EncodedImage, MAX_FILE_BYTES};
pub use error::{Error, Result, ScanError};
pub use history::{History, MemoryStore, SnapshotStore, HISTORY_LIMIT, HISTORY_SLOT};
pub use parser::{extract_json_object, parse_analysis_response};
pub use prompts::build_label_prompt;
pub use session::ScanSession;
pub use types::{AnalysisResult, HealthGrade, LabelAnalysis, NutrientValue, Nutrition};
