use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;
use crate::users::AuthorSnapshot;
use models::errors::ModelError;
use models::validate::{non_blank, optional_media_url};

/// Create payload
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CropBody {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    /// Target status label; the configured create status when omitted.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub author: Option<i64>,
}

impl CropBody {
    pub fn validate(&self) -> Result<(), ModelError> {
        non_blank("name", &self.name)?;
        optional_media_url("img", self.img.as_deref())
    }
}

/// Partial update; omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CropUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub img: Option<String>,
    pub status: Option<String>,
}

impl CropUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.img.is_none() && self.status.is_none()
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(name) = &self.name {
            non_blank("name", name)?;
        }
        optional_media_url("img", self.img.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CropFilter {
    pub status: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl CropFilter {
    pub fn page(&self) -> Pagination { Pagination { limit: self.limit, offset: self.offset } }
}

/// Read view with status label and author resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crop {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub img: Option<String>,
    pub status: String,
    pub author: Option<AuthorSnapshot>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}
