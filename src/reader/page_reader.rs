//! Reading session over an opened PDF document
//!
//! Drives the render queue, enforces the access gate before any page is
//! fetched, tracks the current page, and reports reading progress for
//! authenticated viewers. The actual rasterization backend is injected via
//! `PageRenderer` so tests can observe render order without a PDF engine.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::access::AccessGate;
use crate::clients::ReaderClient;
use crate::error::{AppResult, BusinessError};
use crate::models::AccessInfo;
use crate::reader::RenderQueue;

/// Render backend for one opened document.
///
/// `page` is 1-based, matching PDF rasterizer numbering.
pub trait PageRenderer: Send + Sync {
    fn render_page<'a>(
        &'a self,
        page: usize,
    ) -> Pin<Box<dyn Future<Output = AppResult<()>> + Send + 'a>>;
}

/// Renderer that only logs. Used by the demo binary and as a stand-in where
/// no rasterizer is wired up.
pub struct LoggingRenderer;

impl PageRenderer for LoggingRenderer {
    fn render_page<'a>(
        &'a self,
        page: usize,
    ) -> Pin<Box<dyn Future<Output = AppResult<()>> + Send + 'a>> {
        Box::pin(async move {
            info!("rendered page {page}");
            Ok(())
        })
    }
}

pub struct ReaderSession<R: PageRenderer> {
    document_id: String,
    gate: AccessGate,
    total_pages: usize,
    /// 0-indexed page currently on screen
    current_page: usize,
    queue: RenderQueue,
    renderer: R,
    reader_client: Option<Arc<ReaderClient>>,
}

impl<R: PageRenderer> ReaderSession<R> {
    /// Open a reading session from the backend's access facts.
    ///
    /// Authenticated viewers resume at their last read page; guests always
    /// start at page 0.
    pub fn open(
        info: &AccessInfo,
        renderer: R,
        reader_client: Option<Arc<ReaderClient>>,
    ) -> Self {
        let gate = AccessGate::from_access_info(info);
        let current_page = if info.is_authenticated {
            info.last_read_page.unwrap_or(0)
        } else {
            0
        };
        Self {
            document_id: info.document_id.clone(),
            gate,
            total_pages: info.total_pages,
            current_page,
            queue: RenderQueue::new(),
            renderer,
            reader_client,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Percentage of the document read so far
    pub fn progress_percentage(&self) -> u32 {
        if self.total_pages == 0 {
            return 0;
        }
        (((self.current_page + 1) * 100) / self.total_pages).min(100) as u32
    }

    pub fn can_go_back(&self) -> bool {
        self.current_page > 0
    }

    /// Whether the forward arrow should be enabled: guests stop at the
    /// preview ceiling, everyone at the last page.
    pub fn can_go_forward(&self) -> bool {
        let next_index = self.current_page + 1;
        if next_index >= self.total_pages {
            return false;
        }
        self.gate.is_authenticated() || (next_index as i64) <= self.gate.max_guest_page_index()
    }

    /// Render the initial page (resume point). A guest of a document with no
    /// free preview gets the login-prompt denial here, before any render.
    pub async fn show_current(&mut self) -> AppResult<()> {
        self.gate.check_page(self.current_page)?;
        self.queue_render(self.current_page + 1).await
    }

    pub async fn next_page(&mut self) -> AppResult<()> {
        let next_index = self.current_page + 1;
        // Gate first: a denied page is never queued, let alone fetched.
        self.gate.check_page(next_index)?;
        if next_index >= self.total_pages {
            return Err(BusinessError::PageOutOfRange {
                page: next_index + 1,
                total_pages: self.total_pages,
            }
            .into());
        }
        self.queue_render(next_index + 1).await
    }

    pub async fn previous_page(&mut self) -> AppResult<()> {
        if self.current_page == 0 {
            return Ok(());
        }
        // current_page is the 0-index; the previous display page equals it
        self.queue_render(self.current_page).await
    }

    /// Jump to a display page (1-based).
    pub async fn go_to_page(&mut self, page: usize) -> AppResult<()> {
        if page < 1 || page > self.total_pages {
            return Err(BusinessError::PageOutOfRange {
                page,
                total_pages: self.total_pages,
            }
            .into());
        }
        self.gate.check_page(page - 1)?;
        self.queue_render(page).await
    }

    /// Re-render the current page (zoom changes and the like)
    pub async fn refresh(&mut self) -> AppResult<()> {
        self.gate.check_page(self.current_page)?;
        self.queue_render(self.current_page + 1).await
    }

    async fn queue_render(&mut self, page: usize) -> AppResult<()> {
        let Some(first) = self.queue.request(page) else {
            debug!("render in flight, page {page} stashed as pending");
            return Ok(());
        };
        self.render_chain(first).await
    }

    /// Render `page`, then keep draining the pending slot until the queue
    /// goes idle. Superseded pages are never rendered.
    async fn render_chain(&mut self, mut page: usize) -> AppResult<()> {
        loop {
            if let Err(e) = self.renderer.render_page(page).await {
                self.queue.abort();
                return Err(e);
            }
            self.current_page = page - 1;
            self.report_progress();
            match self.queue.complete() {
                Some(next) => page = next,
                None => return Ok(()),
            }
        }
    }

    /// Fire-and-forget progress report. Guests never report; failures are
    /// logged and swallowed, and never block rendering.
    fn report_progress(&self) {
        if !self.gate.is_authenticated() {
            return;
        }
        let Some(client) = self.reader_client.clone() else {
            return;
        };
        let document_id = self.document_id.clone();
        let current_page = self.current_page;
        tokio::spawn(async move {
            if let Err(e) = client.update_progress(&document_id, current_page).await {
                warn!("progress report for {document_id} failed: {e}");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Renderer that records the order pages were rasterized in
    struct RecordingRenderer {
        rendered: Arc<Mutex<Vec<usize>>>,
    }

    impl PageRenderer for RecordingRenderer {
        fn render_page<'a>(
            &'a self,
            page: usize,
        ) -> Pin<Box<dyn Future<Output = AppResult<()>> + Send + 'a>> {
            let rendered = self.rendered.clone();
            Box::pin(async move {
                rendered.lock().unwrap().push(page);
                Ok(())
            })
        }
    }

    fn guest_info(total_pages: usize, intro_end_page: i64) -> AccessInfo {
        serde_json::from_value(serde_json::json!({
            "documentId": "doc-1",
            "title": "T",
            "totalPages": total_pages,
            "introEndPage": intro_end_page,
            "isAuthenticated": false,
            "lastReadPage": null,
            "canDownload": false
        }))
        .unwrap()
    }

    fn member_info(total_pages: usize, last_read_page: Option<usize>) -> AccessInfo {
        serde_json::from_value(serde_json::json!({
            "documentId": "doc-1",
            "title": "T",
            "totalPages": total_pages,
            "introEndPage": 5,
            "isAuthenticated": true,
            "lastReadPage": last_read_page,
            "canDownload": true
        }))
        .unwrap()
    }

    fn recording_session(
        info: &AccessInfo,
    ) -> (ReaderSession<RecordingRenderer>, Arc<Mutex<Vec<usize>>>) {
        let rendered = Arc::new(Mutex::new(Vec::new()));
        let renderer = RecordingRenderer {
            rendered: rendered.clone(),
        };
        (ReaderSession::open(info, renderer, None), rendered)
    }

    #[tokio::test]
    async fn test_guest_reads_up_to_preview_then_denied() {
        let (mut session, rendered) = recording_session(&guest_info(20, 5));
        session.show_current().await.unwrap();
        // pages 2..=5 are free for a guest
        for _ in 0..4 {
            session.next_page().await.unwrap();
        }
        assert_eq!(*rendered.lock().unwrap(), vec![1, 2, 3, 4, 5]);
        assert_eq!(session.current_page(), 4);

        // display page 6 (index 5) triggers the login-prompt error
        let err = session.next_page().await.unwrap_err();
        assert!(err.is_access_denied());
        // and nothing was rendered for it
        assert_eq!(rendered.lock().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_member_resumes_at_last_read_page() {
        let (mut session, rendered) = recording_session(&member_info(20, Some(7)));
        session.show_current().await.unwrap();
        assert_eq!(session.current_page(), 7);
        assert_eq!(*rendered.lock().unwrap(), vec![8]);
    }

    #[tokio::test]
    async fn test_guest_starts_at_first_page() {
        let info = guest_info(20, 5);
        let (session, _) = recording_session(&info);
        assert_eq!(session.current_page(), 0);
    }

    #[tokio::test]
    async fn test_guest_with_no_preview_denied_on_open() {
        // introEndPage = 0: guests get no pages, not even the first one
        let (mut session, rendered) = recording_session(&guest_info(20, 0));
        let err = session.show_current().await.unwrap_err();
        assert!(err.is_access_denied());
        assert!(rendered.lock().unwrap().is_empty());

        let err = session.refresh().await.unwrap_err();
        assert!(err.is_access_denied());
        assert!(rendered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_guest_walks_fully_open_document_to_the_end() {
        // introEndPage past the page count: the whole document is free, and
        // the forward walk stops cleanly at the last page
        let (mut session, rendered) = recording_session(&guest_info(3, 10));
        session.show_current().await.unwrap();
        while session.can_go_forward() {
            session.next_page().await.unwrap();
        }
        assert_eq!(*rendered.lock().unwrap(), vec![1, 2, 3]);
        assert_eq!(session.current_page(), 2);
        assert!(!session.can_go_forward());
    }

    #[tokio::test]
    async fn test_go_to_page_out_of_range() {
        let (mut session, _) = recording_session(&member_info(10, None));
        assert!(session.go_to_page(0).await.is_err());
        assert!(session.go_to_page(11).await.is_err());
        assert!(session.go_to_page(10).await.is_ok());
    }

    #[tokio::test]
    async fn test_can_go_forward_respects_guest_ceiling() {
        let (mut session, _) = recording_session(&guest_info(20, 5));
        session.go_to_page(5).await.unwrap(); // index 4, last free page
        assert!(!session.can_go_forward());
        assert!(session.can_go_back());
    }

    #[tokio::test]
    async fn test_progress_percentage() {
        let (mut session, _) = recording_session(&member_info(10, None));
        session.go_to_page(5).await.unwrap();
        assert_eq!(session.progress_percentage(), 50);
    }
}
