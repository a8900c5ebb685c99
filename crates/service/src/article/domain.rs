use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;
use crate::users::AuthorSnapshot;
use models::errors::ModelError;
use models::validate::{media_url, non_blank};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArticleBody {
    pub title: String,
    #[serde(default)]
    pub latin_name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub author: Option<i64>,
}

fn validate_images(images: &[String]) -> Result<(), ModelError> {
    images.iter().try_for_each(|img| media_url("images", img))
}

impl ArticleBody {
    pub fn validate(&self) -> Result<(), ModelError> {
        non_blank("title", &self.title)?;
        validate_images(&self.images)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub latin_name: Option<String>,
    pub text: Option<String>,
    pub status: Option<String>,
    /// Replaces the whole image set when present; `[]` clears it.
    pub images: Option<Vec<String>>,
}

impl ArticleUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.latin_name.is_none()
            && self.text.is_none()
            && self.status.is_none()
            && self.images.is_none()
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(title) = &self.title {
            non_blank("title", title)?;
        }
        validate_images(self.images.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleFilter {
    pub status: Option<String>,
    pub crop_id: Option<i32>,
    pub category_id: Option<i32>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ArticleFilter {
    pub fn page(&self) -> Pagination { Pagination { limit: self.limit, offset: self.offset } }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub latin_name: Option<String>,
    pub text: Option<String>,
    pub images: Vec<String>,
    pub status: String,
    pub author: Option<AuthorSnapshot>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}
