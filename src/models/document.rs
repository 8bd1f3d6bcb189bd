use serde::{Deserialize, Serialize};

/// Document metadata as returned by `GET /Documents/{id}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub document_type: String,
    /// Total page count recorded in the catalog
    #[serde(default)]
    pub page_num: usize,
    /// Last page (1-based, inclusive) of the free preview for guests
    #[serde(default)]
    pub intro_end_page: i64,
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default)]
    pub collection_id: Option<String>,
    #[serde(default)]
    pub cover_path: Option<String>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub keywords: Vec<String>,
    // Aggregate stats
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub total_reviews: u64,
    #[serde(default)]
    pub total_views: u64,
    #[serde(default)]
    pub total_downloads: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub expertise: Option<String>,
}

/// One attached file version of a document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFile {
    pub id: String,
    pub document_id: String,
    pub file_path: String,
    pub version: u32,
    #[serde(default)]
    pub change_note: Option<String>,
}

/// Per-(document, viewer) access facts from `GET /DocumentReader/{id}/access-info`
///
/// Not persisted client-side beyond the current viewing session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessInfo {
    pub document_id: String,
    #[serde(default)]
    pub title: String,
    pub total_pages: usize,
    pub intro_end_page: i64,
    pub is_authenticated: bool,
    #[serde(default)]
    pub last_read_page: Option<usize>,
    #[serde(default)]
    pub can_download: bool,
}

/// A reader rating + comment on a published document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    pub rating: u8,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
