use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Every backend route the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Me,
    Marketplace,
    BuyPkg,
    PkgLicenseState,
    CashBalances,
    SelfIssueCash,
    PkgOfferState,
    FeeAgreementState,
    EstablishFeeAgreement,
    RegisterPkg,
    UpdatePkg,
    DeletePkg,
}

impl Endpoint {
    /// Path relative to the configured base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Me => "me",
            Endpoint::Marketplace => "marketplace",
            Endpoint::BuyPkg => "marketplace/buy-pkg",
            Endpoint::PkgLicenseState => "pkg-license-state",
            Endpoint::CashBalances => "cash-balances",
            Endpoint::SelfIssueCash => "self-issue-cash",
            Endpoint::PkgOfferState => "pkg-offer-state",
            Endpoint::FeeAgreementState => "fee-agreement-state",
            Endpoint::EstablishFeeAgreement => "establish-fee-agreement",
            Endpoint::RegisterPkg => "register-pkg",
            Endpoint::UpdatePkg => "update-pkg",
            Endpoint::DeletePkg => "delete-pkg",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::Me
            | Endpoint::Marketplace
            | Endpoint::PkgLicenseState
            | Endpoint::CashBalances
            | Endpoint::PkgOfferState
            | Endpoint::FeeAgreementState => Method::GET,
            Endpoint::BuyPkg | Endpoint::SelfIssueCash => Method::POST,
            Endpoint::EstablishFeeAgreement
            | Endpoint::RegisterPkg
            | Endpoint::UpdatePkg
            | Endpoint::DeletePkg => Method::PUT,
        }
    }
}

/// One outgoing call: endpoint, query parameters and an optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn method(&self) -> Method {
        self.endpoint.method()
    }

    /// `METHOD path?k=v&...`, used for logging and status lines.
    pub fn describe(&self) -> String {
        let mut s = format!("{} {}", self.method(), self.endpoint.path());
        if !self.query.is_empty() {
            let pairs: Vec<String> = self.query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            s.push('?');
            s.push_str(&pairs.join("&"));
        }
        s
    }
}

/// Status and raw body of a completed call. Non-2xx statuses are replies too.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint.path())
    }

    /// Issue the request once. Any HTTP status comes back as an [`ApiReply`];
    /// only transport failures are errors.
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiReply, ApiError> {
        let mut builder = self.http.request(request.method(), self.url(request.endpoint));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiReply { status, body })
    }

    /// GET an endpoint and decode its JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let reply = self.send(&ApiRequest::new(endpoint)).await?;
        if !reply.is_success() {
            return Err(ApiError::Status {
                status: reply.status,
                body: reply.body,
            });
        }
        Ok(serde_json::from_str(&reply.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Bytes,
        extract::{Query, State},
        http::{HeaderMap, StatusCode},
        routing::{get, post, put},
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    #[derive(Clone, Default)]
    struct Seen {
        calls: Arc<Mutex<Vec<(String, Option<String>, String)>>>,
    }

    async fn spawn(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/")
    }

    #[test]
    fn endpoint_table_matches_backend_routes() {
        assert_eq!(Endpoint::BuyPkg.path(), "marketplace/buy-pkg");
        assert_eq!(Endpoint::BuyPkg.method(), Method::POST);
        assert_eq!(Endpoint::SelfIssueCash.method(), Method::POST);
        assert_eq!(Endpoint::EstablishFeeAgreement.method(), Method::PUT);
        assert_eq!(Endpoint::DeletePkg.method(), Method::PUT);
        assert_eq!(Endpoint::FeeAgreementState.method(), Method::GET);
    }

    #[test]
    fn describe_renders_query_in_order() {
        let req = ApiRequest::new(Endpoint::SelfIssueCash)
            .query("amount", 10)
            .query("currency", "USD");
        assert_eq!(req.describe(), "POST self-issue-cash?amount=10&currency=USD");
        assert_eq!(ApiRequest::new(Endpoint::Me).describe(), "GET me");
    }

    #[test]
    fn url_joins_with_or_without_trailing_slash() {
        assert_eq!(
            ApiClient::new("http://node:10050/").url(Endpoint::Me),
            "http://node:10050/me"
        );
        assert_eq!(
            ApiClient::new("http://node:10050/api").url(Endpoint::BuyPkg),
            "http://node:10050/api/marketplace/buy-pkg"
        );
    }

    #[tokio::test]
    async fn send_posts_query_parameters() {
        let seen = Seen::default();
        let router = Router::new()
            .route(
                "/self-issue-cash",
                post(
                    |State(seen): State<Seen>, Query(q): Query<HashMap<String, String>>| async move {
                        let query = format!("amount={}&currency={}", q["amount"], q["currency"]);
                        seen.calls
                            .lock()
                            .unwrap()
                            .push(("POST".into(), None, query));
                        (StatusCode::CREATED, "10.00 USD issued")
                    },
                ),
            )
            .with_state(seen.clone());
        let client = ApiClient::new(spawn(router).await);

        let req = ApiRequest::new(Endpoint::SelfIssueCash)
            .query("amount", 10)
            .query("currency", "USD");
        let reply = client.send(&req).await.unwrap();

        assert_eq!(reply.status, 201);
        assert!(reply.is_success());
        assert_eq!(reply.body, "10.00 USD issued");
        let calls = seen.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].2, "amount=10&currency=USD");
    }

    #[tokio::test]
    async fn send_puts_json_body_with_content_type() {
        let seen = Seen::default();
        let router = Router::new()
            .route(
                "/delete-pkg",
                put(|State(seen): State<Seen>, headers: HeaderMap, body: Bytes| async move {
                    let ct = headers
                        .get("content-type")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    seen.calls.lock().unwrap().push((
                        "PUT".into(),
                        ct,
                        String::from_utf8_lossy(&body).into_owned(),
                    ));
                    (StatusCode::BAD_REQUEST, "no such package")
                }),
            )
            .with_state(seen.clone());
        let client = ApiClient::new(spawn(router).await);

        let linear_id = json!({"externalId": null, "id": "5e0c"});
        let req = ApiRequest::new(Endpoint::DeletePkg).json(linear_id.clone());
        let reply = client.send(&req).await.unwrap();

        assert_eq!(reply.status, 400);
        assert!(!reply.is_success());
        assert_eq!(reply.body, "no such package");
        let calls = seen.calls.lock().unwrap();
        assert_eq!(calls[0].1.as_deref(), Some("application/json"));
        let sent: Value = serde_json::from_str(&calls[0].2).unwrap();
        assert_eq!(sent, linear_id);
    }

    #[tokio::test]
    async fn get_json_decodes_and_reports_status() {
        let router = Router::new()
            .route("/me", get(|| async { Json(json!({"me": "O=Buyer, L=Pisa, C=IT"})) }))
            .route(
                "/cash-balances",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "vault unavailable") }),
            );
        let client = ApiClient::new(spawn(router).await);

        let me: HashMap<String, String> = client.get_json(Endpoint::Me).await.unwrap();
        assert_eq!(me["me"], "O=Buyer, L=Pisa, C=IT");

        let err = client
            .get_json::<Value>(Endpoint::CashBalances)
            .await
            .unwrap_err();
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "vault unavailable");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_failure_is_an_error() {
        // Bind and drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(format!("http://{addr}/"));
        let err = client.send(&ApiRequest::new(Endpoint::Me)).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
