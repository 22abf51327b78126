use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use ts_rs::TS;
use url::Url;
use uuid::Uuid;

use crate::{
    StoreError,
    http::{endpoint, parse_base_url, read_json},
};

/// Evidence of an authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub user_id: Uuid,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: Uuid,
}

/// Auth capability for the hosted backend.
///
/// The current session lives behind a watch channel so the HTTP store and
/// the controller both observe sign-in state without polling.
pub struct AuthClient {
    client: reqwest::Client,
    base_url: Url,
    publish_key: String,
    session_tx: watch::Sender<Option<Session>>,
}

impl AuthClient {
    pub fn new(base_url: &str, publish_key: impl Into<String>) -> Result<Self, StoreError> {
        let (session_tx, _) = watch::channel(None);
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: parse_base_url(base_url)?,
            publish_key: publish_key.into(),
            session_tx,
        })
    }

    pub fn session(&self) -> Option<Session> {
        self.session_tx.borrow().clone()
    }

    /// Session-change subscription handle.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session_tx.subscribe()
    }

    /// The initial session check: exchange a persisted refresh token for a
    /// live session, install it, and notify subscribers.
    pub async fn restore(&self, refresh_token: &str) -> Result<Session, StoreError> {
        let url = endpoint(&self.base_url, &["auth", "v1", "token"]);
        let resp = self
            .client
            .post(url)
            .query(&[("grant_type", "refresh_token")])
            .header("apikey", &self.publish_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await?;
        let token: TokenResponse = read_json(resp).await?;

        let session = Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: token
                .expires_in
                .map(|secs| Utc::now() + chrono::Duration::seconds(secs)),
            user_id: token.user.id,
        };
        self.session_tx.send_replace(Some(session.clone()));
        tracing::debug!(user_id = %session.user_id, "Session restored");
        Ok(session)
    }

    /// Revoke the token remotely, then drop the local session. The local
    /// downgrade happens even when the revoke request fails.
    pub async fn sign_out(&self) {
        if let Some(session) = self.session() {
            let url = endpoint(&self.base_url, &["auth", "v1", "logout"]);
            let result = self
                .client
                .post(url)
                .header("apikey", &self.publish_key)
                .bearer_auth(&session.access_token)
                .send()
                .await;
            match result {
                Ok(resp) if !resp.status().is_success() => {
                    tracing::warn!(status = resp.status().as_u16(), "Sign-out revoke rejected");
                }
                Err(err) => {
                    tracing::warn!("Sign-out revoke failed: {err}");
                }
                Ok(_) => {}
            }
        }
        self.session_tx.send_replace(None);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::{AuthClient, Session};

    fn session(expires_at: Option<chrono::DateTime<Utc>>) -> Session {
        Session {
            access_token: "token".to_string(),
            refresh_token: None,
            expires_at,
            user_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn expiry_is_checked_against_the_given_instant() {
        let now = Utc::now();
        assert!(session(Some(now - Duration::seconds(1))).is_expired(now));
        assert!(session(Some(now)).is_expired(now));
        assert!(!session(Some(now + Duration::hours(1))).is_expired(now));
        assert!(!session(None).is_expired(now));
    }

    #[tokio::test]
    async fn subscribers_see_the_session_dropped_on_sign_out() {
        let auth = AuthClient::new("https://example.supabase.co", "publish-key").unwrap();
        let mut rx = auth.subscribe();
        assert!(rx.borrow_and_update().is_none());

        // No session installed: sign_out skips the revoke request entirely
        // and just broadcasts the empty state.
        auth.sign_out().await;
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
        assert!(auth.session().is_none());
    }
}
