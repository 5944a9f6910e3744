use model::{user::User, WithId};
use serde::Serialize;
use utility::id::Id;

use crate::{client::ApiClient, session::TokenStore, ApiResult};

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct UserDraft {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    #[serde(rename = "es_tutor")]
    pub is_guardian: Option<bool>,
    #[serde(rename = "es_admin_institucion")]
    pub is_institution_admin: Option<bool>,
    pub is_active: Option<bool>,
}

/// Partial update; absent fields are left untouched by the backend.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPatch {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    #[serde(rename = "es_tutor")]
    pub is_guardian: Option<bool>,
    #[serde(rename = "es_admin_institucion")]
    pub is_institution_admin: Option<bool>,
    pub is_active: Option<bool>,
}

impl<S> ApiClient<S>
where
    S: TokenStore,
{
    pub async fn users(&self) -> ApiResult<Vec<WithId<User>>> {
        self.get("/usuarios").await
    }

    pub async fn user(&self, id: Id<User>) -> ApiResult<WithId<User>> {
        self.get(&format!("/usuarios/{}/", id)).await
    }

    pub async fn create_user(&self, draft: &UserDraft) -> ApiResult<WithId<User>> {
        self.post("/usuarios/", draft).await
    }

    pub async fn update_user(
        &self,
        id: Id<User>,
        patch: &UserPatch,
    ) -> ApiResult<WithId<User>> {
        self.put(&format!("/usuarios/{}/", id), patch).await
    }

    pub async fn delete_user(&self, id: Id<User>) -> ApiResult<()> {
        self.delete(&format!("/usuarios/{}/", id)).await
    }
}
