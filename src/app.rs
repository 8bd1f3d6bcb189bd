//! Application wiring for the demo binary
//!
//! Builds the shared session + transport, hands out the per-surface clients,
//! and runs a small guest/reader flow against a configured document.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::clients::{ApiClient, AuthClient, DocumentClient, ReaderClient, SubmissionClient};
use crate::config::Config;
use crate::reader::{LoggingRenderer, ReaderSession};
use crate::services::{DocumentViewLoader, DownloadService};
use crate::session::SessionHandle;
use crate::utils::logging::truncate_text;
use crate::workflow::SubmissionWorkflow;

/// Application main structure
pub struct App {
    config: Config,
    session: SessionHandle,
    api: Arc<ApiClient>,
    auth: AuthClient,
    documents: Arc<DocumentClient>,
    reader: Arc<ReaderClient>,
    submissions: Arc<SubmissionClient>,
}

impl App {
    /// Initialize the application: restore any persisted session and build
    /// the client stack on top of it.
    pub fn initialize(config: Config) -> Result<Self> {
        let session = SessionHandle::load(&config.state_dir);
        let api = Arc::new(ApiClient::new(&config, session.clone())?);
        Ok(Self {
            auth: AuthClient::new(api.clone()),
            documents: Arc::new(DocumentClient::new(api.clone())),
            reader: Arc::new(ReaderClient::new(api.clone())),
            submissions: Arc::new(SubmissionClient::new(api.clone())),
            config,
            session,
            api,
        })
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    pub fn workflow(&self) -> SubmissionWorkflow {
        SubmissionWorkflow::new(self.submissions.clone(), self.api.clone(), self.session.clone())
    }

    pub fn view_loader(&self) -> DocumentViewLoader {
        DocumentViewLoader::new(self.documents.clone(), self.reader.clone())
    }

    pub fn downloads(&self) -> DownloadService {
        DownloadService::new(
            self.documents.clone(),
            self.session.clone(),
            PathBuf::from(&self.config.state_dir).join("downloads"),
        )
    }

    /// Demo flow: log in if credentials are configured, open the configured
    /// document, print its detail view and read through the opening pages.
    pub async fn run(&self) -> Result<()> {
        log_startup(&self.config);

        if !self.config.login_email.is_empty() {
            self.auth
                .login(&self.config.login_email, &self.config.login_password)
                .await?;
        } else if self.session.is_authenticated() {
            info!("✓ reusing persisted session");
        } else {
            info!("browsing as guest");
        }

        if self.config.document_id.is_empty() {
            warn!("⚠️ no DOCLIB_DOCUMENT_ID configured, nothing to open");
            return Ok(());
        }

        let cancel = CancellationToken::new();
        let view = self
            .view_loader()
            .load(&self.config.document_id, &cancel)
            .await?;

        info!("{}", "=".repeat(60));
        info!("📖 {}", truncate_text(&view.document.title, 80));
        info!(
            "   {} pages, {} authors, ⭐ {:.1} ({} reviews)",
            view.access.total_pages,
            view.document.authors.len(),
            view.document.avg_rating,
            view.document.total_reviews,
        );
        info!(
            "   {} file version(s), downloads {}",
            view.files.len(),
            if view.access.can_download { "allowed" } else { "blocked" }
        );
        info!("{}", "=".repeat(60));

        let mut reading =
            ReaderSession::open(&view.access, LoggingRenderer, Some(self.reader.clone()));
        match reading.show_current().await {
            Ok(()) => {}
            Err(e) if e.is_access_denied() => {
                info!("🔒 no free preview, login required: {}", e.user_message());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
        while reading.can_go_forward() {
            match reading.next_page().await {
                Ok(()) => {}
                Err(e) if e.is_access_denied() => {
                    info!(
                        "🔒 preview ended at page {}: {}",
                        reading.current_page() + 1,
                        e.user_message()
                    );
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!(
            "✓ finished at page {}/{} ({}%)",
            reading.current_page() + 1,
            reading.total_pages(),
            reading.progress_percentage()
        );
        Ok(())
    }
}

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 doclib client starting");
    info!("📡 API: {}", config.api_base_url);
    info!("{}", "=".repeat(60));
}
