//! スキャンセッションの状態管理
//!
//! 現在の画像・解析中フラグ・エラー・カメラ状態・表示中の結果・履歴を
//! 1つのコントローラが保持する。UI側はこの状態を参照して描画し、
//! 操作はすべてここのメソッドを経由する。

use crate::capture::{check_upload, EncodedImage};
use crate::error::{Result, ScanError};
use crate::history::{History, SnapshotStore};
use crate::types::{AnalysisResult, LabelAnalysis};
use chrono::{DateTime, Utc};
use std::fmt::Display;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanSession {
    image: Option<EncodedImage>,
    analyzing: bool,
    error: Option<ScanError>,
    camera_active: bool,
    current: Option<AnalysisResult>,
    history: History,
}

impl ScanSession {
    pub fn new(history: History) -> Self {
        Self {
            history,
            ..Default::default()
        }
    }

    /// 保存済み履歴からセッションを開始
    pub fn restore(store: &impl SnapshotStore) -> Self {
        Self::new(History::load(store))
    }

    pub fn image(&self) -> Option<&EncodedImage> {
        self.image.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn error(&self) -> Option<ScanError> {
        self.error
    }

    pub fn is_camera_active(&self) -> bool {
        self.camera_active
    }

    pub fn current(&self) -> Option<&AnalysisResult> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn persist_history(&self, store: &impl SnapshotStore) -> Result<()> {
        self.history.persist(store)
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // =============================================
    // 画像取得
    // =============================================

    /// デコード前のファイルチェック
    ///
    /// 不合格ならエラーを設定するだけで、現在の画像と結果はそのまま。
    pub fn check_file(&mut self, size: u64, mime_type: &str) -> std::result::Result<(), ScanError> {
        check_upload(size, mime_type).map_err(|e| {
            log::info!("file rejected: {}", e);
            let error = ScanError::from(&e);
            self.error = Some(error);
            error
        })
    }

    pub fn file_read_failed(&mut self) {
        self.error = Some(ScanError::FileRead);
    }

    /// 新しい画像を設定（前回の結果とエラーはクリア）
    ///
    /// 解析中は送信済みの画像と結果の対応を保つため受け付けない。
    ///
    /// # Returns
    /// 画像が設定された場合 true
    pub fn set_image(&mut self, image: EncodedImage) -> bool {
        if self.analyzing {
            log::info!("image ignored while analysis is in flight");
            return false;
        }
        self.image = Some(image);
        self.current = None;
        self.error = None;
        self.camera_active = false;
        true
    }

    pub fn camera_started(&mut self) {
        self.camera_active = true;
        self.error = None;
    }

    pub fn camera_stopped(&mut self) {
        self.camera_active = false;
    }

    pub fn camera_failed(&mut self) {
        self.camera_active = false;
        self.error = Some(ScanError::CameraUnavailable);
    }

    // =============================================
    // 解析
    // =============================================

    pub fn can_analyze(&self) -> bool {
        self.image.is_some() && !self.analyzing
    }

    /// 解析を開始し、送信する画像を返す
    ///
    /// 解析中または画像がない場合は None（同時に2件は送らない）。
    pub fn begin_analysis(&mut self) -> Option<EncodedImage> {
        if !self.can_analyze() {
            return None;
        }
        self.analyzing = true;
        self.error = None;
        self.image.clone()
    }

    /// 解析完了
    ///
    /// 成功時はtimestampに `now` を設定し、表示して履歴の先頭に追加する。
    /// 失敗時は固定メッセージのみ設定し、画像と履歴は変更しない。
    ///
    /// # Returns
    /// 履歴が変更された場合 true
    pub fn finish_analysis<E: Display>(
        &mut self,
        outcome: std::result::Result<LabelAnalysis, E>,
        now: DateTime<Utc>,
    ) -> bool {
        self.analyzing = false;
        match outcome {
            Ok(analysis) => {
                let result = AnalysisResult::new(analysis, now);
                self.history.push(result.clone());
                self.current = Some(result);
                true
            }
            Err(e) => {
                log::warn!("analysis failed: {}", e);
                self.error = Some(ScanError::AnalysisFailed);
                false
            }
        }
    }

    // =============================================
    // 履歴
    // =============================================

    /// 履歴の項目を表示（再解析せず、履歴も変更しない）
    pub fn select_history(&mut self, index: usize) -> bool {
        match self.history.get(index) {
            Some(entry) => {
                self.current = Some(entry.clone());
                true
            }
            None => false,
        }
    }

    pub fn remove_history(&mut self, index: usize) -> bool {
        self.history.remove(index).is_some()
    }

    /// 履歴を全削除（確認済みの場合のみ）
    pub fn clear_history(&mut self, confirmed: bool) -> bool {
        if !confirmed || self.history.is_empty() {
            return false;
        }
        self.history.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::MAX_FILE_BYTES;
    use crate::history::{MemoryStore, HISTORY_LIMIT};
    use crate::parser::parse_analysis_response;
    use crate::types::HealthGrade;

    fn image() -> EncodedImage {
        EncodedImage::from_base64("image/jpeg", "/9j/4AAQ")
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn analysis(name: &str) -> LabelAnalysis {
        LabelAnalysis {
            product_name: name.to_string(),
            health_grade: HealthGrade::B,
            ..Default::default()
        }
    }

    fn session_with_result() -> ScanSession {
        let mut session = ScanSession::default();
        session.set_image(image());
        session.begin_analysis().expect("解析開始できるべき");
        session.finish_analysis(Ok::<_, String>(analysis("شاي")), at(100));
        session
    }

    // =============================================
    // 画像取得
    // =============================================

    #[test]
    fn test_oversized_file_keeps_state() {
        let mut session = session_with_result();
        let before_image = session.image().cloned();
        let before_current = session.current().cloned();

        let result = session.check_file(6_000_000, "image/jpeg");

        assert_eq!(result, Err(ScanError::FileTooLarge));
        assert_eq!(session.error(), Some(ScanError::FileTooLarge));
        assert_eq!(session.image().cloned(), before_image);
        assert_eq!(session.current().cloned(), before_current);
    }

    #[test]
    fn test_oversized_file_sets_no_image() {
        let mut session = ScanSession::default();
        assert!(session.check_file(MAX_FILE_BYTES + 1, "image/png").is_err());
        assert!(session.image().is_none());
    }

    #[test]
    fn test_non_image_rejected() {
        let mut session = ScanSession::default();
        assert_eq!(
            session.check_file(10, "text/plain"),
            Err(ScanError::UnsupportedFile)
        );
    }

    #[test]
    fn test_set_image_clears_previous_result() {
        let mut session = session_with_result();
        assert!(session.current().is_some());

        assert!(session.set_image(EncodedImage::from_base64("image/png", "iVBO")));
        assert!(session.current().is_none());
        assert!(session.error().is_none());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_camera_flags() {
        let mut session = ScanSession::default();
        session.camera_started();
        assert!(session.is_camera_active());

        // 撮影で画像が設定されるとカメラモードを抜ける
        session.set_image(image());
        assert!(!session.is_camera_active());

        session.camera_started();
        session.camera_stopped();
        assert!(!session.is_camera_active());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_camera_failed() {
        let mut session = ScanSession::default();
        session.camera_started();
        session.camera_failed();
        assert!(!session.is_camera_active());
        assert_eq!(session.error(), Some(ScanError::CameraUnavailable));
    }

    // =============================================
    // 解析
    // =============================================

    #[test]
    fn test_begin_analysis_requires_image() {
        let mut session = ScanSession::default();
        assert!(!session.can_analyze());
        assert!(session.begin_analysis().is_none());
        assert!(!session.is_analyzing());
    }

    #[test]
    fn test_no_concurrent_analysis() {
        let mut session = ScanSession::default();
        session.set_image(image());
        assert!(session.begin_analysis().is_some());
        assert!(session.is_analyzing());
        assert!(session.begin_analysis().is_none());
        assert!(!session.can_analyze());
    }

    #[test]
    fn test_image_kept_while_analysis_in_flight() {
        let sent = EncodedImage::from_base64("image/jpeg", "AAAA");
        let mut session = ScanSession::default();
        session.set_image(sent.clone());
        assert_eq!(session.begin_analysis(), Some(sent.clone()));

        // 解析中のカメラ撮影は受け付けない
        session.camera_started();
        assert!(!session.set_image(EncodedImage::from_base64("image/jpeg", "BBBB")));
        assert_eq!(session.image(), Some(&sent));

        session.finish_analysis(Ok::<_, String>(analysis("for AAAA")), at(300));
        assert_eq!(session.image(), Some(&sent));
        assert_eq!(session.current().map(|r| r.product_name()), Some("for AAAA"));

        // 完了後は差し替えられる
        assert!(session.set_image(EncodedImage::from_base64("image/jpeg", "BBBB")));
        assert!(session.current().is_none());
        assert!(!session.is_camera_active());
    }

    #[test]
    fn test_success_stamps_local_time_and_prepends() {
        let mut session = ScanSession::default();
        session.set_image(image());
        session.begin_analysis();

        let response = r#"{"health_grade":"A","timestamp":"1999-01-01T00:00:00Z"}"#;
        let changed = session.finish_analysis(parse_analysis_response(response), at(1_700_000_000));

        assert!(changed);
        assert!(!session.is_analyzing());
        let current = session.current().expect("結果が表示されるべき");
        assert_eq!(current.timestamp, at(1_700_000_000));
        assert_eq!(current.health_grade().css_class(), "grade-a");
        assert_eq!(session.history().get(0), Some(current));
    }

    #[test]
    fn test_malformed_response_keeps_image_and_history() {
        let mut session = session_with_result();
        let history_before = session.history().clone();
        let image_before = session.image().cloned();

        session.begin_analysis();
        let changed = session.finish_analysis(parse_analysis_response("{oops"), at(200));

        assert!(!changed);
        assert_eq!(session.error(), Some(ScanError::AnalysisFailed));
        assert_eq!(session.image().cloned(), image_before);
        assert_eq!(session.history(), &history_before);
        // 再試行できる
        assert!(session.can_analyze());
    }

    #[test]
    fn test_full_history_stays_at_limit() {
        let mut session = ScanSession::default();
        for i in 0..HISTORY_LIMIT {
            session.set_image(image());
            session.begin_analysis();
            session.finish_analysis(Ok::<_, String>(analysis(&format!("p{}", i))), at(i as i64));
        }
        assert_eq!(session.history().len(), HISTORY_LIMIT);

        session.begin_analysis();
        session.finish_analysis(Ok::<_, String>(analysis("newest")), at(1000));

        assert_eq!(session.history().len(), HISTORY_LIMIT);
        assert_eq!(session.history().get(0).unwrap().product_name(), "newest");
        assert!(session
            .history()
            .entries()
            .iter()
            .all(|r| r.product_name() != "p0"));
    }

    // =============================================
    // 履歴
    // =============================================

    #[test]
    fn test_select_history_does_not_mutate() {
        let mut session = ScanSession::default();
        for name in ["a", "b", "c"] {
            session.set_image(image());
            session.begin_analysis();
            session.finish_analysis(Ok::<_, String>(analysis(name)), at(0));
        }
        let before = session.history().clone();

        assert!(session.select_history(2));
        assert_eq!(session.current().unwrap().product_name(), "a");
        assert_eq!(session.history(), &before);

        assert!(!session.select_history(10));
    }

    #[test]
    fn test_remove_history() {
        let mut session = session_with_result();
        assert!(session.remove_history(0));
        assert!(session.history().is_empty());
        assert!(!session.remove_history(0));
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let mut session = session_with_result();
        assert!(!session.clear_history(false));
        assert_eq!(session.history().len(), 1);

        assert!(session.clear_history(true));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_restore_and_persist() {
        let store = MemoryStore::default();
        let session = session_with_result();
        session.persist_history(&store).expect("保存失敗");

        let restored = ScanSession::restore(&store);
        assert_eq!(restored.history(), session.history());
        assert!(restored.current().is_none());
        assert!(restored.image().is_none());
    }
}
