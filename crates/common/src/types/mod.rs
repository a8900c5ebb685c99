use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Plain acknowledgement body returned by mutating endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatusBody {
    pub status: String,
}

impl StatusBody {
    pub fn ok() -> Self {
        Self { status: "ok".into() }
    }
}

/// Body returned by create endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CreatedBody {
    pub id: i32,
}
