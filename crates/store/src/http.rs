use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::watch;
use url::Url;
use uuid::Uuid;

use crate::{
    StoreError, collections,
    auth::Session,
    models::{CreateMember, CreateTask, Member, Task, TaskPatch},
    remote::RemoteStore,
    types::TaskStatus,
};

/// HTTP adapter for the hosted tabular store.
///
/// Speaks the PostgREST row API: one request per operation, row filters as
/// `column=eq.value` query pairs, inserted rows echoed back under
/// `Prefer: return=representation`.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: Url,
    publish_key: String,
    session: watch::Receiver<Option<Session>>,
}

impl HttpStore {
    pub fn new(
        base_url: &str,
        publish_key: impl Into<String>,
        session: watch::Receiver<Option<Session>>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: parse_base_url(base_url)?,
            publish_key: publish_key.into(),
            session,
        })
    }

    fn collection_url(&self, collection: &str) -> Url {
        endpoint(&self.base_url, &["rest", "v1", collection])
    }

    /// Requests run under the caller's token when signed in, otherwise
    /// under the publish key alone and row-level security decides.
    fn authed(&self, rb: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let bearer = match self.session.borrow().as_ref() {
            Some(session) => session.access_token.clone(),
            None => self.publish_key.clone(),
        };
        rb.header("apikey", &self.publish_key).bearer_auth(bearer)
    }

    pub async fn list_rows<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, StoreError> {
        let request = self
            .client
            .get(self.collection_url(collection))
            .query(&[("select", "*")]);
        let resp = self.authed(request).send().await?;
        read_json(resp).await
    }

    pub async fn insert_rows<T, B>(&self, collection: &str, rows: &[B]) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let request = self
            .client
            .post(self.collection_url(collection))
            .header("Prefer", "return=representation")
            .json(rows);
        let resp = self.authed(request).send().await?;
        read_json(resp).await
    }

    pub async fn update_row<B: Serialize>(
        &self,
        collection: &str,
        id: Uuid,
        patch: &B,
    ) -> Result<(), StoreError> {
        let request = self
            .client
            .patch(self.collection_url(collection))
            .query(&[("id", format!("eq.{id}"))])
            .json(patch);
        let resp = self.authed(request).send().await?;
        read_ok(resp).await
    }

    pub async fn delete_row(&self, collection: &str, id: Uuid) -> Result<(), StoreError> {
        let request = self
            .client
            .delete(self.collection_url(collection))
            .query(&[("id", format!("eq.{id}"))]);
        let resp = self.authed(request).send().await?;
        read_ok(resp).await
    }
}

#[async_trait]
impl RemoteStore for HttpStore {
    async fn list_members(&self) -> Result<Vec<Member>, StoreError> {
        self.list_rows(collections::MEMBERS).await
    }

    async fn insert_member(&self, data: &CreateMember) -> Result<Vec<Member>, StoreError> {
        self.insert_rows(collections::MEMBERS, std::slice::from_ref(data))
            .await
    }

    async fn delete_member(&self, id: Uuid) -> Result<(), StoreError> {
        self.delete_row(collections::MEMBERS, id).await
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        self.list_rows(collections::TASKS).await
    }

    async fn insert_task(&self, data: &CreateTask) -> Result<Vec<Task>, StoreError> {
        self.insert_rows(collections::TASKS, std::slice::from_ref(data))
            .await
    }

    async fn update_task_status(&self, id: Uuid, status: TaskStatus) -> Result<(), StoreError> {
        let patch = TaskPatch {
            status: Some(status),
        };
        self.update_row(collections::TASKS, id, &patch).await
    }
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url, StoreError> {
    let url =
        Url::parse(raw).map_err(|err| StoreError::InvalidBaseUrl(format!("{raw}: {err}")))?;
    if url.cannot_be_a_base() {
        return Err(StoreError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(url)
}

pub(crate) fn endpoint(base_url: &Url, segments: &[&str]) -> Url {
    let mut url = base_url.clone();
    // parse_base_url rejects cannot-be-a-base URLs.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

pub(crate) async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, StoreError> {
    let body = read_success_body(resp).await?;
    Ok(serde_json::from_str(&body)?)
}

pub(crate) async fn read_ok(resp: reqwest::Response) -> Result<(), StoreError> {
    read_success_body(resp).await.map(drop)
}

async fn read_success_body(resp: reqwest::Response) -> Result<String, StoreError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(api_error(status, &body));
    }
    Ok(body)
}

fn api_error(status: StatusCode, body: &str) -> StoreError {
    if status == StatusCode::UNAUTHORIZED {
        return StoreError::Unauthorized;
    }
    let message = parse_error_message(body)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "request failed".to_string());
    StoreError::Api {
        status: status.as_u16(),
        message,
    }
}

/// PostgREST error bodies carry `message`; the auth endpoints use `msg`
/// or `error_description`.
fn parse_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["message", "msg", "error_description"] {
        if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
            let trimmed = message.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::{api_error, endpoint, parse_base_url, parse_error_message};
    use crate::StoreError;

    #[test]
    fn collection_urls_keep_the_base_path() {
        let base = parse_base_url("https://example.supabase.co").unwrap();
        assert_eq!(
            endpoint(&base, &["rest", "v1", "members"]).as_str(),
            "https://example.supabase.co/rest/v1/members"
        );

        let prefixed = parse_base_url("https://example.com/backend/").unwrap();
        assert_eq!(
            endpoint(&prefixed, &["auth", "v1", "logout"]).as_str(),
            "https://example.com/backend/auth/v1/logout"
        );
    }

    #[test]
    fn opaque_urls_are_rejected() {
        assert!(parse_base_url("mailto:ops@example.com").is_err());
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn status_codes_map_to_store_errors() {
        assert!(matches!(
            api_error(StatusCode::UNAUTHORIZED, ""),
            StoreError::Unauthorized
        ));
        match api_error(StatusCode::NOT_FOUND, r#"{"message":"no such table"}"#) {
            StoreError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "no such table");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_messages_come_from_known_body_keys() {
        assert_eq!(
            parse_error_message(r#"{"message":"duplicate key"}"#).as_deref(),
            Some("duplicate key")
        );
        assert_eq!(
            parse_error_message(r#"{"msg":"Invalid token"}"#).as_deref(),
            Some("Invalid token")
        );
        assert_eq!(parse_error_message(r#"{"message":"  "}"#), None);
        assert_eq!(parse_error_message("<html>gateway</html>"), None);
    }
}
