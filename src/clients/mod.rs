pub mod auth_client;
pub mod document_client;
pub mod http;
pub mod reader_client;
pub mod submission_client;

pub use auth_client::AuthClient;
pub use document_client::DocumentClient;
pub use http::ApiClient;
pub use reader_client::ReaderClient;
pub use submission_client::SubmissionClient;
