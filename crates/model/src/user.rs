use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

/// An account: either an administrator, a guardian (tutor) of one or more
/// children, or an institution admin.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct User {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    #[serde(rename = "es_tutor")]
    pub is_guardian: bool,
    #[serde(rename = "es_admin_institucion")]
    pub is_institution_admin: bool,
    pub is_active: bool,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

impl HasId for User {
    type IdType = i64;
}
