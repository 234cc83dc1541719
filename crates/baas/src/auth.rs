//! GoTrue authentication.
//!
//! A successful sign-in yields a [`Session`] that callers hand to every
//! table operation explicitly.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    SupabaseClient,
    error::{BaasError, Result},
};

/// An authenticated user: the bearer token plus who it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

/// Sign-up answers with a session when auto-confirm is on, otherwise with
/// the bare user.
#[derive(Debug, Deserialize)]
struct SignupResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<AuthUser>,
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupBody<'a> {
    email: &'a str,
    password: &'a str,
    data: SignupMetadata<'a>,
}

#[derive(Debug, Serialize)]
struct SignupMetadata<'a> {
    full_name: &'a str,
}

/// Outcome of a sign-up: the new user and, if already confirmed, a token.
#[derive(Debug)]
pub struct SignedUp {
    pub user_id: Uuid,
    pub email: String,
    pub access_token: Option<String>,
}

fn session_from(access_token: String, user: AuthUser, fallback_email: &str) -> Session {
    Session {
        access_token,
        user_id: user.id,
        email: user.email.unwrap_or_else(|| fallback_email.to_string()),
    }
}

impl SupabaseClient {
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        let req = self
            .request(Method::POST, url, self.anon_key())
            .json(&Credentials { email, password });

        let token: TokenResponse = self.send_json(req).await.map_err(|err| match err {
            // GoTrue answers bad credentials with 400 invalid_grant.
            BaasError::Query { status, message, .. } if status.is_client_error() => {
                BaasError::Unauthorized(message)
            }
            other => other,
        })?;
        Ok(session_from(token.access_token, token.user, email))
    }

    pub async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<SignedUp> {
        let url = self.endpoint("auth/v1/signup")?;
        let req = self
            .request(Method::POST, url, self.anon_key())
            .json(&SignupBody {
                email,
                password,
                data: SignupMetadata { full_name },
            });
        let res: SignupResponse = self.send_json(req).await?;

        let (user_id, user_email) = match (res.user, res.id) {
            (Some(user), _) => (user.id, user.email),
            (None, Some(id)) => (id, res.email),
            (None, None) => {
                return Err(BaasError::Query {
                    status: reqwest::StatusCode::OK,
                    code: String::new(),
                    message: "sign-up response carries no user".to_string(),
                });
            }
        };
        Ok(SignedUp {
            user_id,
            email: user_email.unwrap_or_else(|| email.to_string()),
            access_token: res.access_token,
        })
    }

    /// Resolves an access token to its user; fails with `Unauthorized` when
    /// the token is invalid or expired.
    pub async fn user(&self, access_token: &str) -> Result<Session> {
        let url = self.endpoint("auth/v1/user")?;
        let user: AuthUser = self
            .send_json(self.request(Method::GET, url, access_token))
            .await?;
        Ok(session_from(access_token.to_string(), user, ""))
    }

    pub async fn sign_out(&self, session: &Session) -> Result<()> {
        let url = self.endpoint("auth/v1/logout")?;
        self.send_unit(self.request(Method::POST, url, &session.access_token))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_token_response() {
        let body = r#"{
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "r",
            "user": {"id": "6f1c3a52-2f0e-4a55-9a63-9b8f2b7a4d10", "email": "a@b.co", "role": "authenticated"}
        }"#;
        let token: TokenResponse = serde_json::from_str(body).unwrap();
        let session = session_from(token.access_token, token.user, "");
        assert_eq!(session.access_token, "jwt");
        assert_eq!(session.email, "a@b.co");
    }

    #[test]
    fn decodes_unconfirmed_signup() {
        let body = r#"{"id": "6f1c3a52-2f0e-4a55-9a63-9b8f2b7a4d10", "email": "a@b.co", "confirmation_sent_at": "2025-01-01T00:00:00Z"}"#;
        let res: SignupResponse = serde_json::from_str(body).unwrap();
        assert!(res.user.is_none());
        assert!(res.access_token.is_none());
        assert!(res.id.is_some());
    }
}
