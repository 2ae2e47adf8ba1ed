use serde::{Deserialize, Serialize};

/// An investor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub display_code: Option<String>,
    pub full_name: String,
    pub email: Option<String>,
}
