use reqwest::{Method, RequestBuilder, Response, StatusCode, Url, header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    Query,
    error::{BaasError, Result},
};

/// PostgREST code for "single row requested, zero returned".
const NO_ROWS: &str = "PGRST116";

/// Thin client over a Supabase project: PostgREST under `/rest/v1` and
/// GoTrue under `/auth/v1`.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    base_url: Url,
    anon_key: String,
    http: reqwest::Client,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default, alias = "msg", alias = "error_description")]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Maps a failed response to an error; `401`/`403` are auth failures and
/// `409` is a unique-key conflict.
pub(crate) fn error_from_body(status: StatusCode, body: &str) -> BaasError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let code = match parsed.code {
        Some(serde_json::Value::String(code)) => code,
        Some(other) => other.to_string(),
        None => String::new(),
    };
    let message = parsed
        .message
        .or(parsed.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if body.is_empty() {
                "unknown error".to_string()
            } else {
                body.to_string()
            }
        });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BaasError::Unauthorized(message),
        StatusCode::CONFLICT => BaasError::Conflict(message),
        _ => BaasError::Query {
            status,
            code,
            message,
        },
    }
}

async fn error_from(res: Response) -> BaasError {
    let status = res.status();
    let body = res.text().await.unwrap_or_default();
    error_from_body(status, &body)
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| BaasError::Config(format!("invalid supabase url: {err}")))?;
        if anon_key.trim().is_empty() {
            return Err(BaasError::Config("supabase anon key is empty".to_string()));
        }
        Ok(Self {
            base_url,
            anon_key: anon_key.to_string(),
            http: reqwest::Client::new(),
        })
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| BaasError::Config(format!("invalid endpoint {path}: {err}")))
    }

    /// Request carrying the project key and the caller's bearer token.
    pub(crate) fn request(&self, method: Method, url: Url, token: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let res = req.send().await?;
        if !res.status().is_success() {
            return Err(error_from(res).await);
        }
        let bytes = res.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn send_unit(&self, req: RequestBuilder) -> Result<()> {
        let res = req.send().await?;
        if !res.status().is_success() {
            return Err(error_from(res).await);
        }
        Ok(())
    }

    fn table_url(&self, query: &Query) -> Result<Url> {
        let mut url = self.endpoint(&format!("rest/v1/{}", query.table_name()))?;
        if !query.params().is_empty() {
            url.query_pairs_mut().extend_pairs(query.params());
        }
        Ok(url)
    }

    pub async fn select<T: DeserializeOwned>(&self, token: &str, query: &Query) -> Result<Vec<T>> {
        let url = self.table_url(query)?;
        tracing::debug!(table = query.table_name(), "select");
        self.send_json(self.request(Method::GET, url, token)).await
    }

    /// Single-row read; "no rows" is `None`, not an error.
    pub async fn select_single<T: DeserializeOwned>(
        &self,
        token: &str,
        query: &Query,
    ) -> Result<Option<T>> {
        let url = self.table_url(query)?;
        let req = self
            .request(Method::GET, url, token)
            .header(header::ACCEPT, "application/vnd.pgrst.object+json");
        match self.send_json(req).await {
            Ok(row) => Ok(Some(row)),
            Err(BaasError::Query { code, .. }) if code == NO_ROWS => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Inserts `rows` and returns the stored representation.
    pub async fn insert<B, T>(&self, token: &str, table: &str, rows: &B) -> Result<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.table_url(&Query::table(table))?;
        tracing::debug!(table, "insert");
        let req = self
            .request(Method::POST, url, token)
            .header("Prefer", "return=representation")
            .json(rows);
        self.send_json(req).await
    }

    /// Patches every row matched by `query`.
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        token: &str,
        query: &Query,
        patch: &B,
    ) -> Result<()> {
        let url = self.table_url(query)?;
        tracing::debug!(table = query.table_name(), "update");
        let req = self
            .request(Method::PATCH, url, token)
            .header("Prefer", "return=minimal")
            .json(patch);
        self.send_unit(req).await
    }

    /// Insert-or-merge on the `on_conflict` columns.
    pub async fn upsert<B: Serialize + ?Sized>(
        &self,
        token: &str,
        table: &str,
        on_conflict: &str,
        rows: &B,
    ) -> Result<()> {
        let mut url = self.table_url(&Query::table(table))?;
        url.query_pairs_mut().append_pair("on_conflict", on_conflict);
        tracing::debug!(table, on_conflict, "upsert");
        let req = self
            .request(Method::POST, url, token)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(rows);
        self.send_unit(req).await
    }
}
