use serde::{Deserialize, Serialize};

#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
}

impl Comment {
    pub fn new(id: i64, post_id: i64, content: impl Into<String>) -> Self {
        Self {
            id,
            post_id,
            content: content.into(),
        }
    }
}
