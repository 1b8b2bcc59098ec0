// Mist API HTTP client
//
// Wraps `reqwest::Client` with token authentication, v1 URL construction and
// status handling. Responses are returned as untyped JSON; shaping them is
// the caller's job (see `mistly-core`).

use std::marker::PhantomData;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::access::{Access, ReadOnly, ReadWrite};
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Client facade for the Mist REST API.
///
/// The type parameter fixes the capability at construction time:
/// `MistClient<ReadOnly>` (the default) can only [`read`](Self::read);
/// `MistClient<ReadWrite>` adds [`create`](MistClient::create),
/// [`update`](MistClient::update) and [`delete`](MistClient::delete).
///
/// Every call is a single round trip on the same connection pool. Nothing is
/// retried, paginated or cached.
#[derive(Debug, Clone)]
pub struct MistClient<A: Access = ReadOnly> {
    http: reqwest::Client,
    base_url: Url,
    _access: PhantomData<A>,
}

impl MistClient<ReadOnly> {
    /// Build a client that can only issue GET requests.
    pub fn read_only(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        Self::with_token(base_url, token, transport)
    }
}

impl MistClient<ReadWrite> {
    /// Build a client that may also create, update and delete resources.
    pub fn read_write(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        Self::with_token(base_url, token, transport)
    }
}

impl<A: Access> MistClient<A> {
    // ── Constructors ─────────────────────────────────────────────────

    /// Injects `Authorization: Token <token>` and `Content-Type:
    /// application/json` as default headers on every request.
    fn with_token(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Token {}", token.expose_secret()))
            .map_err(|e| Error::InvalidToken {
                message: format!("invalid header value: {e}"),
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = transport.build_client_with_headers(headers)?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }
        debug!(access = A::LABEL, %base_url, "created Mist API client");

        Ok(Self {
            http,
            base_url,
            _access: PhantomData,
        })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Full URL for an endpoint: `{base}/api/v1/{segments...}`.
    pub fn url(&self, endpoint: Endpoint<'_>) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(["api", "v1"])
            .extend(endpoint.segments());
        Ok(url)
    }

    /// Like [`url`](Self::url), with URL-encoded query pairs appended.
    pub fn url_with_query(
        &self,
        endpoint: Endpoint<'_>,
        query: &[(&str, &str)],
    ) -> Result<Url, Error> {
        let mut url = self.url(endpoint)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    /// `GET url`. Returns the parsed body on HTTP 200.
    pub async fn read(&self, url: Url) -> Result<Value, Error> {
        self.send(Method::GET, url, None).await
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Value, Error> {
        debug!(access = A::LABEL, "{method} {url}");

        let mut request = self.http.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let resp = request.send().await?;

        handle_response(url, resp).await
    }
}

impl MistClient<ReadWrite> {
    /// `POST url` with an optional JSON body.
    ///
    /// Only available on read-write clients:
    ///
    /// ```compile_fail
    /// # use mistly_api::{Endpoint, MistClient, ReadOnly};
    /// # async fn demo(client: MistClient<ReadOnly>) -> Result<(), mistly_api::Error> {
    /// let url = client.url(Endpoint::ApiTokens)?;
    /// client.create(url, None).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, url: Url, body: Option<&Value>) -> Result<Value, Error> {
        self.send(Method::POST, url, body).await
    }

    /// `PUT url` with a JSON body.
    ///
    /// ```compile_fail
    /// # use mistly_api::{Endpoint, MistClient, ReadOnly};
    /// # async fn demo(client: MistClient<ReadOnly>) -> Result<(), mistly_api::Error> {
    /// let url = client.url(Endpoint::OrgStats("org"))?;
    /// client.update(url, &serde_json::json!({})).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update(&self, url: Url, body: &Value) -> Result<Value, Error> {
        self.send(Method::PUT, url, Some(body)).await
    }

    /// `DELETE url`.
    ///
    /// ```compile_fail
    /// # use mistly_api::{Endpoint, MistClient, ReadOnly};
    /// # async fn demo(client: MistClient<ReadOnly>) -> Result<(), mistly_api::Error> {
    /// let url = client.url(Endpoint::ApiToken("t1"))?;
    /// client.delete(url).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn delete(&self, url: Url) -> Result<Value, Error> {
        self.send(Method::DELETE, url, None).await
    }
}

/// Map a response to its JSON body (200) or an `Error::Api` (anything else).
///
/// An empty 200 body, as some DELETE endpoints return, becomes `Value::Null`.
async fn handle_response(url: Url, resp: reqwest::Response) -> Result<Value, Error> {
    let status = resp.status();

    if status != StatusCode::OK {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Api {
            status: status.as_u16(),
            url,
            body,
        });
    }

    let body = resp.text().await?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        url,
        message: e.to_string(),
        body,
    })
}
