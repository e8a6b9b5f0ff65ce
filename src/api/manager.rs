use crate::api::client::{ApiClient, ApiError, ApiRequest, Endpoint};
use crate::api::models::{CashBalances, FeeAgreement, Identity, PkgLicense, PkgOffer};
use crate::app::event::{AppEvent, DialogId};
use crate::dialog::{Operation, ResponseMessage};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// A view model that can be re-fetched independently of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshTarget {
    Identity,
    Marketplace,
    Licenses,
    Balances,
    PkgOffers,
    FeeAgreement,
}

impl RefreshTarget {
    pub const ALL: [RefreshTarget; 6] = [
        RefreshTarget::Identity,
        RefreshTarget::Marketplace,
        RefreshTarget::Licenses,
        RefreshTarget::Balances,
        RefreshTarget::PkgOffers,
        RefreshTarget::FeeAgreement,
    ];

    pub fn endpoint(self) -> Endpoint {
        match self {
            RefreshTarget::Identity => Endpoint::Me,
            RefreshTarget::Marketplace => Endpoint::Marketplace,
            RefreshTarget::Licenses => Endpoint::PkgLicenseState,
            RefreshTarget::Balances => Endpoint::CashBalances,
            RefreshTarget::PkgOffers => Endpoint::PkgOfferState,
            RefreshTarget::FeeAgreement => Endpoint::FeeAgreementState,
        }
    }
}

/// A freshly fetched view model.
#[derive(Debug, Clone, PartialEq)]
pub enum Refreshed {
    Identity(Identity),
    Marketplace(Vec<PkgOffer>),
    Licenses(Vec<PkgLicense>),
    Balances(CashBalances),
    PkgOffers(Vec<PkgOffer>),
    FeeAgreement(FeeAgreement),
}

pub async fn fetch(client: &ApiClient, target: RefreshTarget) -> Result<Refreshed, ApiError> {
    let endpoint = target.endpoint();
    let refreshed = match target {
        RefreshTarget::Identity => Refreshed::Identity(client.get_json(endpoint).await?),
        RefreshTarget::Marketplace => Refreshed::Marketplace(client.get_json(endpoint).await?),
        RefreshTarget::Licenses => Refreshed::Licenses(client.get_json(endpoint).await?),
        RefreshTarget::Balances => Refreshed::Balances(client.get_json(endpoint).await?),
        RefreshTarget::PkgOffers => Refreshed::PkgOffers(client.get_json(endpoint).await?),
        RefreshTarget::FeeAgreement => Refreshed::FeeAgreement(client.get_json(endpoint).await?),
    };
    Ok(refreshed)
}

/// Runs HTTP calls on background tasks and reports completions as [`AppEvent`]s.
pub struct ApiManager {
    client: ApiClient,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl ApiManager {
    pub fn new(client: ApiClient, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { client, event_tx }
    }

    /// Fire the single request of a closed dialog. Success and failure both
    /// come back as [`AppEvent::Response`].
    pub fn submit(&self, dialog_id: DialogId, operation: Operation, request: ApiRequest) {
        info!(dialog_id, %operation, request = %request.describe(), "dispatching request");
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let outcome = client.send(&request).await;
            let message = ResponseMessage::from_outcome(outcome);
            debug!(dialog_id, %operation, success = message.is_success(), "request resolved");
            let _ = tx.send(AppEvent::Response {
                dialog_id,
                operation,
                message,
            });
        });
    }

    /// Re-fetch one view model on its own task.
    pub fn refresh(&self, target: RefreshTarget) {
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = match fetch(&client, target).await {
                Ok(refreshed) => AppEvent::Refreshed(refreshed),
                Err(e) => AppEvent::RefreshFailed {
                    target,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(event);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, routing::post, Json, Router};
    use serde_json::json;
    use tokio::net::TcpListener;

    async fn spawn(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/")
    }

    fn backend() -> Router {
        Router::new()
            .route(
                "/marketplace",
                get(|| async { Json(json!([{"name": "vFirewall", "pkgType": "VNF"}])) }),
            )
            .route(
                "/cash-balances",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "vault down") }),
            )
            .route("/fee-agreement-state", get(|| async { Json(json!({"fee": 10})) }))
            .route(
                "/self-issue-cash",
                post(|| async { (StatusCode::CREATED, "Cash issued") }),
            )
    }

    #[tokio::test]
    async fn failing_refresh_does_not_affect_others() {
        let client = ApiClient::new(spawn(backend()).await);

        let balances = fetch(&client, RefreshTarget::Balances).await;
        let listing = fetch(&client, RefreshTarget::Marketplace).await.unwrap();

        assert!(matches!(balances, Err(ApiError::Status { status: 500, .. })));
        match listing {
            Refreshed::Marketplace(pkgs) => {
                assert_eq!(pkgs.len(), 1);
                assert_eq!(pkgs[0].name, "vFirewall");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn refresh_reports_each_target_separately() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let manager = ApiManager::new(ApiClient::new(spawn(backend()).await), tx);

        manager.refresh(RefreshTarget::Balances);
        manager.refresh(RefreshTarget::FeeAgreement);

        let mut failed = None;
        let mut fee = None;
        for _ in 0..2 {
            match rx.recv().await.unwrap() {
                AppEvent::RefreshFailed { target, error } => failed = Some((target, error)),
                AppEvent::Refreshed(Refreshed::FeeAgreement(f)) => fee = Some(f.fee),
                other => panic!("unexpected {other:?}"),
            }
        }
        let (target, error) = failed.unwrap();
        assert_eq!(target, RefreshTarget::Balances);
        assert!(error.contains("vault down"));
        assert_eq!(fee, Some(10));
    }

    #[tokio::test]
    async fn submit_reports_response_for_dialog() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let manager = ApiManager::new(ApiClient::new(spawn(backend()).await), tx);

        let request = ApiRequest::new(Endpoint::SelfIssueCash)
            .query("amount", 10)
            .query("currency", "USD");
        manager.submit(7, Operation::SelfIssueCash, request);

        match rx.recv().await.unwrap() {
            AppEvent::Response {
                dialog_id,
                operation,
                message,
            } => {
                assert_eq!(dialog_id, 7);
                assert_eq!(operation, Operation::SelfIssueCash);
                assert_eq!(
                    message,
                    ResponseMessage::Reply {
                        status: 201,
                        body: "Cash issued".into()
                    }
                );
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
