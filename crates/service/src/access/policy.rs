use std::collections::HashSet;
use std::fmt;

use configs::PolicyConfig;
use serde::{Deserialize, Serialize};

/// Privilege levels understood by the access service, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    User,
    Moderator,
    Admin,
    Creator,
}

impl AccessLevel {
    /// Integer sent on the wire as `required_lvl`.
    pub fn as_u32(self) -> u32 {
        match self {
            AccessLevel::User => 0,
            AccessLevel::Moderator => 10,
            AccessLevel::Admin => 25,
            AccessLevel::Creator => 100,
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccessLevel::User => "user",
            AccessLevel::Moderator => "moderator",
            AccessLevel::Admin => "admin",
            AccessLevel::Creator => "creator",
        };
        f.write_str(s)
    }
}

/// Maps a target status label to the level a write into that status requires.
///
/// Statuses in the self-serve set (by default only `pending`) can be written by any
/// authenticated user; every other status is a moderation decision.
#[derive(Clone, Debug)]
pub struct AccessPolicy {
    self_serve: HashSet<String>,
}

impl AccessPolicy {
    /// Level for Update and Delete regardless of payload.
    pub const MODERATE: AccessLevel = AccessLevel::Moderator;
    /// Level for adding or removing crop/category links.
    pub const RELATE: AccessLevel = AccessLevel::User;

    pub fn new<I, S>(self_serve: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { self_serve: self_serve.into_iter().map(Into::into).collect() }
    }

    pub fn from_config(cfg: &PolicyConfig) -> Self {
        Self::new(cfg.self_serve_statuses.iter().cloned())
    }

    pub fn level_for_status(&self, label: &str) -> AccessLevel {
        if self.self_serve.contains(label) {
            AccessLevel::User
        } else {
            AccessLevel::Moderator
        }
    }
}

impl Default for AccessPolicy {
    fn default() -> Self { Self::from_config(&PolicyConfig::default()) }
}
