pub mod document_view;
pub mod download_service;

pub use document_view::{DocumentView, DocumentViewLoader};
pub use download_service::{download_filename, DownloadService};
