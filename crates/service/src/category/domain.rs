use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;
use crate::users::AuthorSnapshot;
use models::errors::ModelError;
use models::validate::{non_blank, optional_media_url};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryBody {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub author: Option<i64>,
    /// Crop to link the new category to, in the same transaction.
    #[serde(default)]
    pub crop_id: Option<i32>,
}

impl CategoryBody {
    pub fn validate(&self) -> Result<(), ModelError> {
        non_blank("name", &self.name)?;
        optional_media_url("icon", self.icon.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub status: Option<String>,
}

impl CategoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.icon.is_none() && self.status.is_none()
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(name) = &self.name {
            non_blank("name", name)?;
        }
        optional_media_url("icon", self.icon.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryFilter {
    pub status: Option<String>,
    /// Only categories linked to this crop.
    pub crop_id: Option<i32>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl CategoryFilter {
    pub fn page(&self) -> Pagination { Pagination { limit: self.limit, offset: self.offset } }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub status: String,
    pub author: Option<AuthorSnapshot>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}
