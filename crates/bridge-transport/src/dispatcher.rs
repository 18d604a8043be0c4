//! # Transport Dispatcher
//!
//! One logical request API over two mutually incompatible transports.
//! The transport is selected exactly once, when the dispatcher is built,
//! from the `cors` flag of the configuration; after that the dispatcher
//! carries a fixed `TransportMode` and never swaps paths at runtime.
//!
//! Both paths resolve a request future exactly once, with either a parsed
//! response body or a `BridgeError`, and never before the call returns.
//! Callers must not assume synchronous completion.

use crate::jsonp;
use bridge_core::{BridgeError, BridgeResult, CheckoutConfig, Payload};
use serde::Deserialize;
use tracing::{debug, error, instrument};

/// HTTP methods the bridge issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The transport a dispatcher is locked to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    /// Direct cross-origin request with credentials
    Cors,
    /// Script-tag transport with a named callback
    Jsonp,
}

impl TransportMode {
    /// Transport selection is a pure function of configuration
    pub fn from_config(config: &CheckoutConfig) -> Self {
        if config.cors {
            TransportMode::Cors
        } else {
            TransportMode::Jsonp
        }
    }
}

/// Issues bridge requests over the transport selected at construction
pub struct Dispatcher {
    mode: TransportMode,
    client: reqwest::Client,
    api_base: String,
}

impl Dispatcher {
    /// Build a dispatcher for the given configuration.
    ///
    /// Performs the capability-selection step once; the resulting mode is
    /// immutable for the dispatcher's lifetime.
    pub fn new(config: &CheckoutConfig) -> BridgeResult<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BridgeError::Configuration(format!("http client: {}", e)))?;

        Ok(Self {
            mode: TransportMode::from_config(config),
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// The transport this dispatcher is locked to
    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    /// Issue one logical request.
    ///
    /// The payload is a flat map of primitives; it is encoded as a query
    /// string for GET and as a form body for POST on the CORS path, and as
    /// a query string on the JSONP path.
    #[instrument(skip(self, payload), fields(mode = ?self.mode, method = %method))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        payload: &Payload,
    ) -> BridgeResult<serde_json::Value> {
        match self.mode {
            TransportMode::Cors => self.cors_request(method, path, payload).await,
            TransportMode::Jsonp => self.jsonp_request(method, path, payload).await,
        }
    }

    /// Resolve a path against the API base. Absolute URLs pass through.
    fn endpoint(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.api_base, path)
        } else {
            format!("{}/{}", self.api_base, path)
        }
    }

    async fn cors_request(
        &self,
        method: Method,
        path: &str,
        payload: &Payload,
    ) -> BridgeResult<serde_json::Value> {
        let url = self.endpoint(path);
        let pairs = payload.to_pairs();

        let builder = match method {
            Method::Get => self.client.get(&url).query(&pairs),
            Method::Post => self.client.post(&url).form(&pairs),
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            error!("bridge API error: status={}, body={}", status, body);
            return Err(error_from_body(status.as_u16(), &body));
        }

        debug!("bridge API responded: status={}", status);
        serde_json::from_str(&body)
            .map_err(|e| BridgeError::MalformedResponse(format!("invalid JSON body: {}", e)))
    }

    async fn jsonp_request(
        &self,
        method: Method,
        path: &str,
        payload: &Payload,
    ) -> BridgeResult<serde_json::Value> {
        // A script tag can only ever issue a GET
        if method != Method::Get {
            return Err(BridgeError::Configuration(
                "JSONP transport is GET-only".to_string(),
            ));
        }

        let callback = jsonp::callback_name();
        let url = self.endpoint(path);
        let mut pairs = payload.to_pairs();
        pairs.push(("callback".to_string(), callback.clone()));

        debug!(%callback, "issuing JSONP request");

        let response = self
            .client
            .get(&url)
            .query(&pairs)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // The script tag's error event fired before the callback did
            error!("JSONP script load failed: status={}", status);
            return Err(BridgeError::RequestFailed {
                status: status.as_u16(),
                message: "script load failed before the callback fired".to_string(),
            });
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        jsonp::parse_invocation(&callback, &body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> BridgeError {
    if err.is_timeout() {
        BridgeError::Timeout
    } else {
        BridgeError::Network(err.to_string())
    }
}

/// Surface the API's own error message when it sends one
fn error_from_body(status: u16, body: &str) -> BridgeError {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }

    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("HTTP {}", status)
            } else {
                trimmed.chars().take(200).collect()
            }
        });

    BridgeError::RequestFailed { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::CheckoutConfig;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    fn config_for(server: &MockServer, cors: bool) -> CheckoutConfig {
        CheckoutConfig::new(server.uri(), "https://hosted.test").with_cors(cors)
    }

    /// Echoes the issued callback name back, the way a JSONP endpoint does
    struct JsonpResponder {
        argument: serde_json::Value,
    }

    impl Respond for JsonpResponder {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            let callback = request
                .url
                .query_pairs()
                .find(|(k, _)| k == "callback")
                .map(|(_, v)| v.to_string())
                .unwrap_or_default();
            ResponseTemplate::new(200)
                .set_body_string(format!("{}({});", callback, self.argument))
        }
    }

    #[test]
    fn test_mode_is_a_pure_function_of_config() {
        let cors = CheckoutConfig::new("https://api.test", "https://hosted.test").with_cors(true);
        let jsonp = CheckoutConfig::new("https://api.test", "https://hosted.test");

        assert_eq!(TransportMode::from_config(&cors), TransportMode::Cors);
        assert_eq!(TransportMode::from_config(&jsonp), TransportMode::Jsonp);

        assert_eq!(Dispatcher::new(&cors).unwrap().mode(), TransportMode::Cors);
        assert_eq!(
            Dispatcher::new(&jsonp).unwrap().mode(),
            TransportMode::Jsonp
        );
    }

    #[tokio::test]
    async fn test_cors_get_sends_query_and_parses_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/token"))
            .and(query_param("currencyCode", "EUR"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "tok_1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = Dispatcher::new(&config_for(&server, true)).unwrap();
        let payload = Payload::new().with("currencyCode", "EUR");
        let value = dispatcher
            .request(Method::Get, "/token", &payload)
            .await
            .unwrap();

        assert_eq!(value["id"], "tok_1");
    }

    #[tokio::test]
    async fn test_cors_post_sends_form_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("skinCode=X7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = Dispatcher::new(&config_for(&server, true)).unwrap();
        let payload = Payload::new().with("skinCode", "X7");
        let value = dispatcher
            .request(Method::Post, "/token", &payload)
            .await
            .unwrap();

        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn test_cors_surfaces_api_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "error": { "message": "currency not supported" }
            })))
            .mount(&server)
            .await;

        let dispatcher = Dispatcher::new(&config_for(&server, true)).unwrap();
        let err = dispatcher
            .request(Method::Get, "/token", &Payload::new())
            .await
            .unwrap_err();

        match err {
            BridgeError::RequestFailed { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "currency not supported");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cors_network_failure_is_a_request_error() {
        // Nothing is listening on this port
        let config = CheckoutConfig::new("http://127.0.0.1:1", "https://hosted.test")
            .with_cors(true);
        let dispatcher = Dispatcher::new(&config).unwrap();

        let err = dispatcher
            .request(Method::Get, "/token", &Payload::new())
            .await
            .unwrap_err();

        assert_eq!(err.code(), "request-network");
    }

    #[tokio::test]
    async fn test_timeout_surfaces_as_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = config_for(&server, true).with_request_timeout(Duration::from_millis(50));
        let dispatcher = Dispatcher::new(&config).unwrap();

        let err = dispatcher
            .request(Method::Get, "/slow", &Payload::new())
            .await
            .unwrap_err();

        assert_eq!(err.code(), "request-timeout");
    }

    #[tokio::test]
    async fn test_jsonp_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/token"))
            .and(query_param("countryCode", "NL"))
            .respond_with(JsonpResponder {
                argument: serde_json::json!({ "id": "tok_2" }),
            })
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = Dispatcher::new(&config_for(&server, false)).unwrap();
        let payload = Payload::new().with("countryCode", "NL");
        let value = dispatcher
            .request(Method::Get, "/token", &payload)
            .await
            .unwrap();

        assert_eq!(value["id"], "tok_2");
    }

    #[tokio::test]
    async fn test_jsonp_rejects_wrong_callback_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"someOtherCallback({"id":1});"#),
            )
            .mount(&server)
            .await;

        let dispatcher = Dispatcher::new(&config_for(&server, false)).unwrap();
        let err = dispatcher
            .request(Method::Get, "/token", &Payload::new())
            .await
            .unwrap_err();

        assert_eq!(err.code(), "request-malformed");
    }

    #[tokio::test]
    async fn test_jsonp_script_load_failure_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let dispatcher = Dispatcher::new(&config_for(&server, false)).unwrap();
        let err = dispatcher
            .request(Method::Get, "/token", &Payload::new())
            .await
            .unwrap_err();

        assert_eq!(err.code(), "request-failed");
    }

    #[tokio::test]
    async fn test_jsonp_refuses_post() {
        let config = CheckoutConfig::new("https://api.test", "https://hosted.test");
        let dispatcher = Dispatcher::new(&config).unwrap();

        let err = dispatcher
            .request(Method::Post, "/token", &Payload::new())
            .await
            .unwrap_err();

        assert_eq!(err.code(), "configuration-error");
    }

    #[test]
    fn test_endpoint_resolution() {
        let config = CheckoutConfig::new("https://api.test/", "https://hosted.test");
        let dispatcher = Dispatcher::new(&config).unwrap();

        assert_eq!(dispatcher.endpoint("/token"), "https://api.test/token");
        assert_eq!(dispatcher.endpoint("token"), "https://api.test/token");
        assert_eq!(
            dispatcher.endpoint("https://other.test/x"),
            "https://other.test/x"
        );
    }
}
