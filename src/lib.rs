//! label-scan - 食品ラベル画像のAI解析CLI

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod image_file;
pub mod report;
pub mod store;
