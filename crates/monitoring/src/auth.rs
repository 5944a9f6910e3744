use model::{user::User, WithId};
use serde::{Deserialize, Serialize};

use crate::{client::ApiClient, session::TokenStore, ApiResult};

#[derive(Debug, Clone, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Bearer token issued by the login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
}

impl<S> ApiClient<S>
where
    S: TokenStore,
{
    /// Logs in and stores the access token in the injected session.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> ApiResult<TokenResponse> {
        let token: TokenResponse = self
            .post("/login/", &LoginRequest { username, password })
            .await?;
        self.session().set(token.access_token.clone());
        Ok(token)
    }

    pub async fn register(
        &self,
        registration: &Registration,
    ) -> ApiResult<WithId<User>> {
        self.post("/auth/register", registration).await
    }

    pub async fn current_user(&self) -> ApiResult<WithId<User>> {
        self.get("/auth/me").await
    }

    /// Forgets the session token. The backend keeps no server-side session,
    /// so this is all a logout amounts to.
    pub fn logout(&self) {
        self.session().clear();
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_a_token_response() {
        let token: TokenResponse = serde_json::from_value(json!({
            "access_token": "eyJhbGciOi...",
            "token_type": "bearer",
            "expires_in": 3600,
        }))
        .unwrap();
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in, 3600);
    }

    #[test]
    fn registration_omits_missing_phone() {
        let registration = Registration {
            email: "mgarcia@example.com".to_owned(),
            password: "secret".to_owned(),
            full_name: "María García".to_owned(),
            phone: None,
        };
        let value = serde_json::to_value(&registration).unwrap();
        assert!(value.get("phone").is_none());
    }
}
