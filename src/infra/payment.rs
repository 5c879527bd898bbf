//! Payment capture collaborator.

use crate::domain::error::{MarketError, MarketResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    /// Provider-side reference of the captured payment.
    pub reference: String,
    pub amount: f64,
    pub currency: String,
    pub captured_at: DateTime<Utc>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Captures `amount` and returns the provider's confirmation.
    async fn capture(&self, amount: f64, currency: &str) -> MarketResult<PaymentConfirmation>;
}

/// Posts `{amount, currency}` to a capture endpoint and expects
/// `{id, status}` back, with `status == "COMPLETED"` on success.
pub struct HttpPaymentGateway {
    client: reqwest::Client,
    capture_url: String,
}

#[derive(Serialize)]
struct CaptureRequest<'a> {
    amount: String,
    currency: &'a str,
}

#[derive(Deserialize)]
struct CaptureResponse {
    id: String,
    status: String,
}

impl HttpPaymentGateway {
    pub fn new(capture_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            capture_url,
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn capture(&self, amount: f64, currency: &str) -> MarketResult<PaymentConfirmation> {
        let response = self
            .client
            .post(&self.capture_url)
            .json(&CaptureRequest {
                amount: format!("{:.2}", amount),
                currency,
            })
            .send()
            .await
            .map_err(|e| MarketError::Payment(format!("capture request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(MarketError::Payment(format!(
                "provider answered {}",
                response.status()
            )));
        }

        let body: CaptureResponse = response
            .json()
            .await
            .map_err(|e| MarketError::Payment(format!("unreadable capture response: {}", e)))?;
        if !body.status.eq_ignore_ascii_case("COMPLETED") {
            return Err(MarketError::Payment(format!(
                "capture {} ended as {}",
                body.id, body.status
            )));
        }

        Ok(PaymentConfirmation {
            reference: body.id,
            amount,
            currency: currency.to_string(),
            captured_at: Utc::now(),
        })
    }
}

/// Approves every capture immediately. For local runs without a provider.
pub struct InstantApproval;

#[async_trait]
impl PaymentGateway for InstantApproval {
    async fn capture(&self, amount: f64, currency: &str) -> MarketResult<PaymentConfirmation> {
        Ok(PaymentConfirmation {
            reference: format!("local-{}", Uuid::new_v4()),
            amount,
            currency: currency.to_string(),
            captured_at: Utc::now(),
        })
    }
}
