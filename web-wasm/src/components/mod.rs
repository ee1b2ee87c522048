pub mod camera_view;
pub mod header;
pub mod history_panel;
pub mod preview;
pub mod result_card;
pub mod settings_panel;
pub mod upload_area;
