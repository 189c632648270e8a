//! RPC client implementation.
//!
//! Every command is a `POST` to `{base_url}/api/v0/{command}`; the node
//! rejects other methods.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;

use ipfskit_core::constants::{
    ADD_FORM_FIELD, ANONYMOUS_PART_NAME, API_PREFIX, BLOCK_FORM_FIELD, DEFAULT_TIMEOUT_SECONDS,
    OCTET_STREAM,
};
use ipfskit_core::error::{IpfsKitError, Result};
use ipfskit_core::traits::IpfsApi;
use ipfskit_core::types::{AddedNode, ContentHash};

/// HTTP transport configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpApiConfig {
    /// Node API root (e.g. "http://localhost:5001")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl HttpApiConfig {
    /// Creates config for the node at `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// [`IpfsApi`] over the node's HTTP RPC interface.
#[derive(Clone, Debug)]
pub struct HttpIpfsApi {
    base_url: String,
    timeout_seconds: u64,
    http_client: reqwest::Client,
}

impl HttpIpfsApi {
    /// Creates a transport for the configured node.
    ///
    /// Fails with [`IpfsKitError::ConfigError`] if the base URL is not an
    /// absolute http(s) URL.
    pub fn with_config(config: HttpApiConfig) -> Result<Self> {
        let parsed = Url::parse(&config.base_url).map_err(|e| {
            IpfsKitError::ConfigError(format!("invalid API URL '{}': {}", config.base_url, e))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(IpfsKitError::ConfigError(format!(
                "unsupported scheme '{}' in API URL",
                parsed.scheme()
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| IpfsKitError::HttpError(e.to_string()))?;

        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            timeout_seconds: config.timeout_seconds,
            http_client,
        })
    }

    /// The normalized API root, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, command: &str) -> String {
        format!("{}{}/{}", self.base_url, API_PREFIX, command)
    }

    fn file_part(data: Vec<u8>, file_name: &str) -> Result<Part> {
        Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(OCTET_STREAM)
            .map_err(|e| IpfsKitError::HttpError(e.to_string()))
    }

    fn transport_error(&self, err: reqwest::Error) -> IpfsKitError {
        if err.is_timeout() {
            IpfsKitError::Timeout {
                seconds: self.timeout_seconds,
            }
        } else {
            IpfsKitError::HttpError(err.to_string())
        }
    }

    /// Sends the request and turns non-success statuses into `ApiError`.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or(text);

        warn!(status = status.as_u16(), error = %message, "IPFS API returned an error");
        Err(IpfsKitError::ApiError {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl IpfsApi for HttpIpfsApi {
    #[instrument(skip(self, data), fields(len = data.len()))]
    async fn block_put(&self, data: Vec<u8>) -> Result<ContentHash> {
        let part = Self::file_part(data, ANONYMOUS_PART_NAME)?;
        let form = Form::new().part(BLOCK_FORM_FIELD, part);

        let response = self
            .send(self.http_client.post(self.endpoint("block/put")).multipart(form))
            .await?;

        let body: BlockPutResponse = response
            .json()
            .await
            .map_err(|e| IpfsKitError::InvalidResponse(e.to_string()))?;

        let hash = ContentHash::from_cid_str(&body.key)?;
        debug!(cid = %body.key, size = body.size, "Stored block");
        Ok(hash)
    }

    #[instrument(skip(self, data), fields(len = data.len()))]
    async fn add(&self, file_name: &str, data: Vec<u8>) -> Result<Vec<AddedNode>> {
        let form = Form::new().part(ADD_FORM_FIELD, Self::file_part(data, file_name)?);

        let response = self
            .send(
                self.http_client
                    .post(self.endpoint("add"))
                    .query(&[("pin", "true")])
                    .multipart(form),
            )
            .await?;

        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        let nodes = parse_add_response(&text)?;
        debug!(count = nodes.len(), cid = %nodes[0].hash, "Added file");
        Ok(nodes)
    }

    #[instrument(skip(self, hash), fields(hash = %hash))]
    async fn cat(&self, hash: &ContentHash) -> Result<Vec<u8>> {
        let response = self
            .send(
                self.http_client
                    .post(self.endpoint("cat"))
                    .query(&[("arg", hash.to_string())]),
            )
            .await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!(len = bytes.len(), "Read content");
        Ok(bytes.to_vec())
    }

    #[instrument(skip(self))]
    async fn version(&self) -> Result<String> {
        let response = self.send(self.http_client.post(self.endpoint("version"))).await?;

        let body: VersionResponse = response
            .json()
            .await
            .map_err(|e| IpfsKitError::InvalidResponse(e.to_string()))?;

        Ok(body.version)
    }
}

/// Parses the newline-delimited JSON an `add` call streams back.
fn parse_add_response(body: &str) -> Result<Vec<AddedNode>> {
    let nodes = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(serde_json::from_str::<AddedNode>)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if nodes.is_empty() {
        return Err(IpfsKitError::InvalidResponse("empty add response".into()));
    }
    Ok(nodes)
}

#[derive(Debug, Deserialize)]
struct BlockPutResponse {
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Size", default)]
    size: u64,
}

#[derive(Debug, Deserialize)]
struct VersionResponse {
    #[serde(rename = "Version")]
    version: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "Message")]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const V0: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";
    const RAW_V1: &str = "bafkreifzjut3te2nhyekklss27nh3k72ysco7y32koao5eei66wof36n5e";

    fn api_for(server: &MockServer) -> HttpIpfsApi {
        HttpIpfsApi::with_config(HttpApiConfig::new(server.uri())).unwrap()
    }

    #[test]
    fn test_config_rejects_bad_urls() {
        let err = HttpIpfsApi::with_config(HttpApiConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, IpfsKitError::ConfigError(_)));

        let err = HttpIpfsApi::with_config(HttpApiConfig::new("ftp://node:5001")).unwrap_err();
        assert!(matches!(err, IpfsKitError::ConfigError(_)));
    }

    #[test]
    fn test_endpoint_normalizes_trailing_slash() {
        let api = HttpIpfsApi::with_config(HttpApiConfig::new("http://node:5001/")).unwrap();
        assert_eq!(api.base_url(), "http://node:5001");
        assert_eq!(api.endpoint("block/put"), "http://node:5001/api/v0/block/put");
    }

    #[test]
    fn test_parse_add_response_ndjson() {
        let body = format!(
            "{}\n{}\n",
            json!({"Name": "a.txt", "Hash": V0, "Size": "11"}),
            json!({"Name": "", "Hash": V0, "Size": "62"}),
        );
        let nodes = parse_add_response(&body).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name, "a.txt");

        assert!(matches!(
            parse_add_response("\n  \n"),
            Err(IpfsKitError::InvalidResponse(_))
        ));
        assert!(matches!(parse_add_response("{oops"), Err(IpfsKitError::JsonError(_))));
    }

    #[tokio::test]
    async fn test_block_put_parses_cid_v1_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v0/block/put"))
            .and(body_string_contains("name=\"data\""))
            .and(body_string_contains("hello block"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Key": RAW_V1,
                "Size": 11
            })))
            .expect(1)
            .mount(&server)
            .await;

        let hash = api_for(&server).block_put(b"hello block".to_vec()).await.unwrap();
        assert_eq!(hash, ContentHash::from_cid_str(RAW_V1).unwrap());
        assert_eq!(hash.codec(), ipfskit_core::constants::RAW_CODEC);
        assert_eq!(hash.to_string(), RAW_V1);
    }

    #[tokio::test]
    async fn test_add_sends_file_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v0/add"))
            .and(query_param("pin", "true"))
            .and(body_string_contains("name=\"file\""))
            .and(body_string_contains("filename=\"report.json\""))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                "{}\n",
                json!({"Name": "report.json", "Hash": V0, "Size": "20"})
            )))
            .expect(1)
            .mount(&server)
            .await;

        let nodes = api_for(&server)
            .add("report.json", b"{\"k\":1}".to_vec())
            .await
            .unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].hash, V0);
    }

    #[tokio::test]
    async fn test_cat_passes_base58_arg() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v0/cat"))
            .and(query_param("arg", V0))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"payload".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let hash = ContentHash::from_base58(V0).unwrap();
        let data = api_for(&server).cat(&hash).await.unwrap();
        assert_eq!(data, b"payload");
    }

    #[tokio::test]
    async fn test_cat_passes_cid_v1_arg_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v0/cat"))
            .and(query_param("arg", RAW_V1))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"raw block".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let hash = ContentHash::from_cid_str(RAW_V1).unwrap();
        let data = api_for(&server).cat(&hash).await.unwrap();
        assert_eq!(data, b"raw block");
    }

    #[tokio::test]
    async fn test_version() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v0/version"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Version": "0.24.0",
                "Commit": "",
                "Repo": "15"
            })))
            .mount(&server)
            .await;

        assert_eq!(api_for(&server).version().await.unwrap(), "0.24.0");
    }

    #[tokio::test]
    async fn test_api_error_body_is_decoded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v0/cat"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "Message": "block was not found locally (offline)",
                "Code": 0,
                "Type": "error"
            })))
            .mount(&server)
            .await;

        let hash = ContentHash::from_base58(V0).unwrap();
        match api_for(&server).cat(&hash).await {
            Err(IpfsKitError::ApiError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "block was not found locally (offline)");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_api_error_plain_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(405).set_body_string("405 - Method Not Allowed"))
            .mount(&server)
            .await;

        let err = api_for(&server).version().await.unwrap_err();
        assert!(matches!(
            err,
            IpfsKitError::ApiError { status: 405, ref message } if message.contains("Method Not Allowed")
        ));
        assert!(!err.is_recoverable());
    }

    #[tokio::test]
    async fn test_malformed_block_put_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v0/block/put"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = api_for(&server).block_put(vec![1, 2, 3]).await.unwrap_err();
        assert!(matches!(err, IpfsKitError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"Version": "0.24.0"}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let api =
            HttpIpfsApi::with_config(HttpApiConfig::new(server.uri()).with_timeout(1)).unwrap();
        let err = api.version().await.unwrap_err();
        assert!(matches!(err, IpfsKitError::Timeout { seconds: 1 }));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        let api = HttpIpfsApi::with_config(HttpApiConfig::new("http://127.0.0.1:1")).unwrap();
        let err = api.version().await.unwrap_err();
        assert!(matches!(err, IpfsKitError::HttpError(_)));
    }
}
