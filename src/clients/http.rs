//! Authenticated HTTP transport
//!
//! All backend clients go through `ApiClient`: it owns the `reqwest` client,
//! attaches the bearer token from the shared session, enforces the request
//! timeout, and applies the crate-wide error policy (server message shown
//! verbatim, 401 forces logout).

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, AuthError};
use crate::session::SessionHandle;

/// Shape of a backend error body, e.g. `{ "message": "Không có quyền phân công" }`
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionHandle,
    verbose: bool,
}

impl ApiClient {
    pub fn new(config: &Config, session: SessionHandle) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
            verbose: config.verbose_logging,
        })
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET a JSON resource
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        self.decode(path, response).await
    }

    /// GET a JSON resource with query parameters
    pub async fn get_json_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> AppResult<T> {
        let builder = self.authed(self.http.get(self.url(path))).query(query);
        let response = self.execute(path, builder).await?;
        self.decode(path, response).await
    }

    /// POST a JSON body, expecting a JSON response
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        self.decode(path, response).await
    }

    /// POST a JSON body, ignoring the response body
    pub async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> AppResult<()> {
        self.send(Method::POST, path, Some(body)).await?;
        Ok(())
    }

    /// POST with query parameters and an empty body (the submission endpoints
    /// take their arguments this way)
    pub async fn post_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> AppResult<()> {
        let builder = self.authed(self.http.post(self.url(path))).query(query);
        self.execute(path, builder).await?;
        Ok(())
    }

    /// PUT a JSON body, ignoring the response body
    pub async fn put_unit<B: Serialize>(&self, path: &str, body: &B) -> AppResult<()> {
        self.send(Method::PUT, path, Some(body)).await?;
        Ok(())
    }

    /// GET binary content (file downloads)
    pub async fn get_bytes(&self, path: &str) -> AppResult<Vec<u8>> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::api_request_failed(path, e))?;
        Ok(bytes.to_vec())
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> AppResult<Response> {
        let mut builder = self.authed(self.http.request(method, self.url(path)));
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(path, builder).await
    }

    async fn execute(&self, path: &str, builder: RequestBuilder) -> AppResult<Response> {
        if self.verbose {
            debug!("→ {}", path);
        }
        let response = builder
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(path, e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            // Token expired or revoked: forced logout, remembering where the
            // user was so login can send them back.
            warn!("401 from {}, clearing session", path);
            self.session.clear();
            self.session.set_return_url(path);
            return Err(AppError::Auth(AuthError::Unauthorized {
                return_path: Some(path.to_string()),
            }));
        }

        // Surface the server-provided message verbatim when there is one.
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|b| b.message)
            .unwrap_or_default();
        Err(AppError::bad_response(path, status.as_u16(), message))
    }

    async fn decode<T: DeserializeOwned>(&self, path: &str, response: Response) -> AppResult<T> {
        response.json::<T>().await.map_err(|e| {
            AppError::Api(crate::error::ApiError::Decode {
                endpoint: path.to_string(),
                source: Box::new(e),
            })
        })
    }
}
