//! カメラ（getUserMedia）
//!
//! `CameraStream` がストリームを所有し、Drop で全トラックを停止する。
//! キャンセル・撮影・画面破棄のどの経路でも値を手放せばカメラは解放される。

use label_scan_common::capture::CAMERA_JPEG_QUALITY;
use label_scan_common::EncodedImage;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack, MediaStreamTrackState,
};

pub struct CameraStream {
    stream: MediaStream,
}

impl CameraStream {
    /// 背面カメラを要求して開く（背面でなくても許容）
    pub async fn open() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("window not available"))?;
        let devices = window.navigator().media_devices()?;

        let video = js_sys::Object::new();
        js_sys::Reflect::set(&video, &"facingMode".into(), &"environment".into())?;

        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&video);
        constraints.set_audio(&JsValue::FALSE);

        let stream = JsFuture::from(devices.get_user_media_with_constraints(&constraints)?).await?;
        Ok(Self::from_stream(stream.dyn_into()?))
    }

    pub(crate) fn from_stream(stream: MediaStream) -> Self {
        Self { stream }
    }

    /// プレビュー用の video 要素に接続
    pub fn attach(&self, video: &HtmlVideoElement) -> Result<(), JsValue> {
        video.set_attribute("playsinline", "true")?;
        video.set_muted(true);
        video.set_src_object(Some(&self.stream));
        // play() の Promise は待たない（表示開始は autoplay と同じ扱い）
        let _ = video.play()?;
        Ok(())
    }

    fn tracks(&self) -> Vec<MediaStreamTrack> {
        self.stream
            .get_tracks()
            .iter()
            .filter_map(|t| t.dyn_into::<MediaStreamTrack>().ok())
            .collect()
    }

    pub fn live_tracks(&self) -> usize {
        self.tracks()
            .iter()
            .filter(|t| t.ready_state() == MediaStreamTrackState::Live)
            .count()
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        let tracks = self.tracks();
        for track in &tracks {
            track.stop();
        }
        log::debug!("camera released ({} tracks stopped)", tracks.len());
    }
}

/// video の現在フレームをJPEGとして取得
pub fn capture_frame(video: &HtmlVideoElement) -> Result<EncodedImage, JsValue> {
    let width = video.video_width();
    let height = video.video_height();
    if width == 0 || height == 0 {
        return Err(JsValue::from_str("video frame not ready"));
    }

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document not available"))?;
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context not available"))?
        .dyn_into()?;
    context.draw_image_with_html_video_element(video, 0.0, 0.0)?;

    let data_url = canvas.to_data_url_with_type_and_encoder_options(
        "image/jpeg",
        &JsValue::from_f64(CAMERA_JPEG_QUALITY),
    )?;

    EncodedImage::from_data_url(data_url).ok_or_else(|| JsValue::from_str("invalid frame data"))
}

/// video からストリームを外す
pub fn detach(video: &HtmlVideoElement) {
    video.set_src_object(None);
}
