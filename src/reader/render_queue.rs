//! Latest-wins render coalescing
//!
//! The viewing surface renders one page at a time. Requests arriving while a
//! render is in flight are coalesced into a single pending slot: the newest
//! request overwrites any earlier pending one. A user scrubbing through
//! pages only cares about the final target, so superseded requests are
//! dropped silently. This is a deliberate policy, not a missing queue.

/// Single-pending-slot render queue state
#[derive(Debug, Default)]
pub struct RenderQueue {
    rendering_in_progress: bool,
    pending_page: Option<usize>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask to render `page` (1-based, the rasterizer's numbering).
    ///
    /// Returns `Some(page)` when the caller should start rendering now, or
    /// `None` when a render is in flight and the request was stashed as the
    /// (sole) pending page.
    pub fn request(&mut self, page: usize) -> Option<usize> {
        if self.rendering_in_progress {
            self.pending_page = Some(page);
            None
        } else {
            self.rendering_in_progress = true;
            Some(page)
        }
    }

    /// Signal that the in-flight render finished.
    ///
    /// Returns the pending page the caller must render next, keeping the
    /// in-progress state; or `None`, after which the queue is idle.
    pub fn complete(&mut self) -> Option<usize> {
        match self.pending_page.take() {
            Some(page) => Some(page),
            None => {
                self.rendering_in_progress = false;
                None
            }
        }
    }

    /// Abandon the in-flight render without chaining into the pending page
    /// (render errors).
    pub fn abort(&mut self) {
        self.rendering_in_progress = false;
        self.pending_page = None;
    }

    pub fn is_rendering(&self) -> bool {
        self.rendering_in_progress
    }
}
