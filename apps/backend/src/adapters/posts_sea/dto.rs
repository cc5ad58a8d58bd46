//! Write-side DTOs for the posts adapter.

#[derive(Debug, Clone)]
pub struct PostCreate {
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub image_urls: Vec<String>,
}
