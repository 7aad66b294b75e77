pub mod batch_loader;
pub mod header;
pub mod image_viewer;
pub mod image_with_fallback;
pub mod issue_cards;
pub mod mode_toolbar;
pub mod upload_area;
pub mod views;
