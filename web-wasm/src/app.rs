//! メインアプリケーションコンポーネント
//!
//! セッション状態（ScanSession）は1つの RwSignal が所有し、
//! 各コンポーネントには派生シグナルとコールバックだけを渡す。

use crate::api::gemini::analyze_label;
use crate::camera::{self, CameraStream};
use crate::components::{
    camera_view::CameraView,
    header::Header,
    history_panel::HistoryPanel,
    preview::Preview,
    result_card::ResultCard,
    settings_panel::SettingsPanel,
    upload_area::{read_image_file, UploadArea},
};
use crate::storage::{self, LocalStorageSlot, Settings};
use chrono::{DateTime, Utc};
use label_scan_common::{ScanSession, HISTORY_SLOT};
use leptos::html::Video;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsValue;

const HISTORY_STORE: LocalStorageSlot = LocalStorageSlot::new(HISTORY_SLOT);

fn now_utc() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// 履歴の変更後に保存
fn persist_history(session: RwSignal<ScanSession>) {
    session.with_untracked(|s| {
        if let Err(e) = s.persist_history(&HISTORY_STORE) {
            log::error!("history save failed: {}", e);
        }
    });
}

/// カメラを解放（video からも外す）
fn release_camera(
    camera_slot: StoredValue<Option<CameraStream>, LocalStorage>,
    video_ref: NodeRef<Video>,
) {
    if let Some(video) = video_ref.get_untracked() {
        camera::detach(&video);
    }
    let _ = camera_slot.try_update_value(|slot| {
        slot.take();
    });
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let session = RwSignal::new(ScanSession::restore(&HISTORY_STORE));
    let stored_settings = storage::load_settings();
    let (api_key, set_api_key) = signal(stored_settings.api_key);
    let (model, set_model) = signal(stored_settings.model);
    let (settings_status, set_settings_status) = signal(String::new());
    let (camera_pending, set_camera_pending) = signal(false);
    let (decoding, set_decoding) = signal(false);

    let video_ref = NodeRef::<Video>::new();
    let camera_slot = StoredValue::new_local(None::<CameraStream>);

    // 画面破棄時もカメラを解放
    on_cleanup(move || release_camera(camera_slot, video_ref));

    let current_settings = move || Settings {
        api_key: api_key.get_untracked(),
        model: model.get_untracked(),
    };

    // 派生状態
    let is_analyzing = Signal::derive(move || session.with(|s| s.is_analyzing()));
    let camera_active = Signal::derive(move || session.with(|s| s.is_camera_active()));
    let settings_ready = move || {
        Settings {
            api_key: api_key.get(),
            model: model.get(),
        }
        .is_ready()
    };
    let can_analyze = Signal::derive(move || session.with(|s| s.can_analyze()) && settings_ready());
    let capture_busy =
        Signal::derive(move || is_analyzing.get() || decoding.get() || camera_pending.get());
    let image_url = Memo::new(move |_| {
        session.with(|s| s.image().map(|image| image.data_url().to_string()))
    });
    let current = Memo::new(move |_| session.with(|s| s.current().cloned()));
    let entries = Memo::new(move |_| session.with(|s| s.history().entries().to_vec()));
    let error_message = move || session.with(|s| s.error().map(|e| e.to_string()));

    // 設定保存ハンドラ
    let on_save_settings = move |_| {
        match storage::save_settings(&current_settings()) {
            Ok(()) => set_settings_status.set("تم الحفظ".to_string()),
            Err(e) => {
                log::error!("settings save failed: {}", e);
                set_settings_status.set("تعذّر الحفظ".to_string());
            }
        }
    };

    // ファイル選択ハンドラ
    let on_file = move |file: web_sys::File| {
        let size = file.size() as u64;
        let mime_type = file.type_();
        let accepted = session
            .try_update(|s| s.check_file(size, &mime_type).is_ok())
            .unwrap_or(false);
        if !accepted {
            return;
        }

        set_decoding.set(true);
        spawn_local(async move {
            match read_image_file(file).await {
                Ok(image) => {
                    if session.try_update(|s| s.set_image(image)).unwrap_or(false) {
                        release_camera(camera_slot, video_ref);
                    }
                }
                Err(_) => {
                    session.try_update(|s| s.file_read_failed());
                }
            }
            set_decoding.try_set(false);
        });
    };

    // カメラ起動ハンドラ
    let on_open_camera = move |_| {
        if camera_pending.get_untracked() || camera_active.get_untracked() {
            return;
        }
        set_camera_pending.set(true);

        spawn_local(async move {
            let opened = CameraStream::open().await.and_then(|stream| {
                let video = video_ref
                    .get_untracked()
                    .ok_or_else(|| JsValue::from_str("video element not mounted"))?;
                stream.attach(&video)?;
                Ok(stream)
            });
            set_camera_pending.try_set(false);

            match opened {
                Ok(stream) => {
                    // 破棄済みなら stream はここで drop され解放される
                    let stored = camera_slot.try_update_value(move |slot| *slot = Some(stream));
                    if stored.is_some() {
                        session.try_update(|s| s.camera_started());
                    }
                }
                Err(e) => {
                    log::warn!("camera unavailable: {:?}", e);
                    session.try_update(|s| s.camera_failed());
                }
            }
        });
    };

    // 撮影ハンドラ
    let on_capture = move |_| {
        if is_analyzing.get_untracked() {
            return;
        }
        let captured = video_ref
            .get_untracked()
            .ok_or_else(|| JsValue::from_str("video element not mounted"))
            .and_then(|video| camera::capture_frame(&video));
        release_camera(camera_slot, video_ref);

        match captured {
            Ok(image) => {
                session.update(|s| {
                    s.set_image(image);
                });
            }
            Err(e) => {
                log::warn!("capture failed: {:?}", e);
                session.update(|s| s.camera_failed());
            }
        }
    };

    // カメラキャンセルハンドラ
    let on_cancel_camera = move |_| {
        release_camera(camera_slot, video_ref);
        session.update(|s| s.camera_stopped());
    };

    // 解析開始ハンドラ
    let on_analyze = move |_| {
        if !current_settings().is_ready() {
            return;
        }
        let Some(image) = session.try_update(|s| s.begin_analysis()).flatten() else {
            return;
        };
        let settings = current_settings();

        spawn_local(async move {
            let outcome = analyze_label(&settings, &image)
                .await
                .map_err(|e| format!("{:?}", e));
            let now = now_utc();
            let changed = session
                .try_update(|s| s.finish_analysis(outcome, now))
                .unwrap_or(false);
            if changed {
                persist_history(session);
            }
        });
    };

    // 履歴ハンドラ
    let on_select_history = move |index: usize| {
        session.update(|s| {
            s.select_history(index);
        });
    };

    let on_remove_history = move |index: usize| {
        if session.try_update(|s| s.remove_history(index)).unwrap_or(false) {
            persist_history(session);
        }
    };

    let on_clear_history = move |_| {
        let confirmed = gloo::dialogs::confirm("هل تريد حذف سجل الفحوصات بالكامل؟");
        if session.try_update(|s| s.clear_history(confirmed)).unwrap_or(false) {
            persist_history(session);
        }
    };

    view! {
        <div class="container" dir="rtl">
            <Header />

            <SettingsPanel
                api_key=api_key
                set_api_key=set_api_key
                model=model
                set_model=set_model
                status=settings_status
                on_save=on_save_settings
            />

            {move || error_message().map(|message| view! {
                <div class="error-banner" role="alert">
                    <span>{message}</span>
                    <button class="btn btn-small" on:click=move |_| session.update(|s| s.dismiss_error())>
                        "✕"
                    </button>
                </div>
            })}

            <div class="capture">
                <CameraView
                    video_ref=video_ref
                    active=camera_active
                    pending=camera_pending
                    disabled=capture_busy
                    capture_disabled=is_analyzing
                    on_open=on_open_camera
                    on_capture=on_capture
                    on_cancel=on_cancel_camera
                />

                <Show when=move || !camera_active.get()>
                    <UploadArea disabled=capture_busy on_file=on_file />
                </Show>
            </div>

            <Show when=move || !settings_ready()>
                <p class="text-muted">"أدخل مفتاح Gemini API في الإعدادات لتفعيل التحليل"</p>
            </Show>

            <Preview
                image_url=image_url
                camera_active=camera_active
                is_analyzing=is_analyzing
                can_analyze=can_analyze
                on_analyze=on_analyze
            />

            {move || current.get().map(|result| view! { <ResultCard result=result /> })}

            <HistoryPanel
                entries=entries
                on_select=on_select_history
                on_remove=on_remove_history
                on_clear=on_clear_history
            />
        </div>
    }
}
