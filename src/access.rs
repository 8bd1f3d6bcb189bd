//! Document access gating
//!
//! A document's `intro_end_page` marks how far a guest may read: the value is
//! 1-based and inclusive, so `intro_end_page = 5` means display pages 1-5
//! (indices 0-4) are free. Authenticated viewers have no ceiling from this
//! rule. Denied pages are never fetched or rendered; the caller shows a
//! login prompt instead.

use crate::error::{AppResult, BusinessError};
use crate::models::AccessInfo;

/// Computed page-access policy for one (document, viewer) pair
#[derive(Debug, Clone, Copy)]
pub struct AccessGate {
    is_authenticated: bool,
    /// Highest 0-indexed page a guest may render; -1 means none
    max_guest_page_index: i64,
}

impl AccessGate {
    /// Build a gate from the configured intro end page.
    ///
    /// `intro_end_page = 0` leaves guests with no pages at all; a negative
    /// value is an input error and is treated as 0.
    pub fn new(intro_end_page: i64, is_authenticated: bool) -> Self {
        Self {
            is_authenticated,
            max_guest_page_index: intro_end_page.max(0) - 1,
        }
    }

    pub fn from_access_info(info: &AccessInfo) -> Self {
        Self::new(info.intro_end_page, info.is_authenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Highest 0-indexed page a guest may render (-1 when guests get nothing)
    pub fn max_guest_page_index(&self) -> i64 {
        self.max_guest_page_index
    }

    /// May the viewer render the given 0-indexed page?
    pub fn can_access_page(&self, page_index: usize) -> bool {
        self.is_authenticated || (page_index as i64) <= self.max_guest_page_index
    }

    /// Like `can_access_page`, but produces the denial error the reader
    /// translates into a login prompt.
    pub fn check_page(&self, page_index: usize) -> AppResult<()> {
        if self.can_access_page(page_index) {
            Ok(())
        } else {
            Err(BusinessError::PageAccessDenied {
                page_index,
                max_guest_page_index: self.max_guest_page_index,
            }
            .into())
        }
    }
}
