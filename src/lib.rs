//! # Doclib Client
//!
//! A Rust client for the digital library backend: authentication, gated
//! document reading, review workflow and file downloads.
//!
//! ## Architecture
//!
//! The crate is layered; each layer only calls downward:
//!
//! ### ① Transport (Clients)
//! - `clients/` - owns the HTTP connection and the bearer token handling
//! - `ApiClient` - the only place requests are executed; 401 responses
//!   clear the session and record a return path
//! - `AuthClient` / `DocumentClient` / `ReaderClient` / `SubmissionClient` -
//!   typed wrappers over the REST surface
//!
//! ### ② Domain rules
//! - `access` - the guest preview gate (pure, no I/O)
//! - `reader` - render queue + reading session over an opened document
//! - `workflow/actions` - status projections for the review workflow
//!
//! ### ③ Services
//! - `services/document_view` - parallel load of a document detail view
//! - `services/download_service` - authenticated downloads with stats logging
//! - `workflow/submission_flow` - submit / revise / review orchestration
//!
//! ### ④ Application
//! - `app` - wires session, transport and services into the demo flow

pub mod access;
pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod reader;
pub mod services;
pub mod session;
pub mod utils;
pub mod workflow;

// Re-export common types
pub use access::AccessGate;
pub use app::App;
pub use clients::ApiClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AccessInfo, DocumentInfo, SubmissionStatus, User};
pub use reader::{PageRenderer, ReaderSession, RenderQueue};
pub use session::{Session, SessionHandle};
pub use workflow::SubmissionWorkflow;
