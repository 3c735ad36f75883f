use anyhow::Context;
use bigdecimal::{BigDecimal, ToPrimitive};
use hmac::{Hmac, Mac};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Thin client over the payment gateway's order-intent API.
///
/// The gateway collects the actual payment through its hosted checkout;
/// this service only creates intents and verifies the signed callback.
#[derive(Debug)]
pub struct PaymentClient {
    http_client: Client,
    base_url: String,
    key_id: String,
    key_secret: SecretString,
    currency: String,
}

#[derive(Debug, Serialize)]
pub struct PaymentIntentCreateRequest<'a> {
    pub amount: i64,
    pub currency: &'a str,
    pub receipt: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentIntentStatus {
    Created,
    Attempted,
    Paid,
}

#[derive(Debug, Deserialize)]
pub struct PaymentIntentData {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentIntentStatus,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    error: GatewayErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorDetail {
    description: String,
}

impl PaymentClient {
    pub fn new(
        base_url: String,
        key_id: String,
        key_secret: SecretString,
        currency: String,
        timeout: std::time::Duration,
    ) -> Result<Self, anyhow::Error> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build payment gateway HTTP client")?;
        Ok(Self {
            http_client,
            base_url,
            key_id,
            key_secret,
            currency,
        })
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// The gateway bills in the currency's minor unit (paise for INR).
    pub fn to_minor_units(amount: &BigDecimal) -> Result<i64, anyhow::Error> {
        (amount * BigDecimal::from(100))
            .with_scale(0)
            .to_i64()
            .context("Order amount overflows the gateway's minor currency unit")
    }

    #[tracing::instrument(name = "Create payment intent", skip(self))]
    pub async fn create_intent(
        &self,
        order_id: Uuid,
        amount: &BigDecimal,
    ) -> Result<PaymentIntentData, anyhow::Error> {
        let url = format!("{}/orders", self.base_url);
        let request_body = PaymentIntentCreateRequest {
            amount: Self::to_minor_units(amount)?,
            currency: &self.currency,
            receipt: format!("order_{}", order_id),
        };
        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .json(&request_body)
            .send()
            .await
            .context("Payment gateway request failed")?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<PaymentIntentData>()
                .await
                .context("Failed to parse payment gateway response")
        } else {
            let message = response
                .json::<GatewayErrorBody>()
                .await
                .map(|body| body.error.description)
                .unwrap_or_else(|_| format!("Payment gateway returned {}", status));
            Err(anyhow::anyhow!(message))
        }
    }

    /// Recomputes the callback signature and compares in constant time.
    ///
    /// The gateway signs `"{gateway_order_id}|{gateway_payment_id}"` with
    /// HMAC-SHA256 under the key secret and sends the hex digest.
    pub fn verify_signature(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature: &str,
    ) -> Result<(), anyhow::Error> {
        verify_payment_signature(
            gateway_order_id,
            gateway_payment_id,
            signature,
            self.key_secret.expose_secret(),
        )
    }
}

pub fn verify_payment_signature(
    gateway_order_id: &str,
    gateway_payment_id: &str,
    signature: &str,
    key_secret: &str,
) -> Result<(), anyhow::Error> {
    let payload = format!("{}|{}", gateway_order_id, gateway_payment_id);
    let mut mac = HmacSha256::new_from_slice(key_secret.as_bytes())
        .context("Failed to initialise HMAC from gateway secret")?;
    mac.update(payload.as_bytes());
    let supplied = hex::decode(signature).context("Signature is not valid hex")?;
    mac.verify_slice(&supplied)
        .context("Payment signature mismatch")
}

#[cfg(test)]
pub fn sign_payment_payload(
    gateway_order_id: &str,
    gateway_payment_id: &str,
    key_secret: &str,
) -> String {
    let payload = format!("{}|{}", gateway_order_id, gateway_payment_id);
    let mut mac = HmacSha256::new_from_slice(key_secret.as_bytes()).unwrap();
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn valid_signature_is_accepted() {
        let signature = sign_payment_payload("order_abc", "pay_xyz", "secret");
        assert!(verify_payment_signature("order_abc", "pay_xyz", &signature, "secret").is_ok());
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let signature = sign_payment_payload("order_abc", "pay_xyz", "wrong-secret");
        assert!(verify_payment_signature("order_abc", "pay_xyz", &signature, "secret").is_err());
    }

    #[test]
    fn signature_binds_payment_id() {
        let signature = sign_payment_payload("order_abc", "pay_xyz", "secret");
        assert!(verify_payment_signature("order_abc", "pay_other", &signature, "secret").is_err());
    }

    #[test]
    fn amount_converts_to_minor_units() {
        let amount = BigDecimal::from_str("25.50").unwrap();
        assert_eq!(PaymentClient::to_minor_units(&amount).unwrap(), 2550);
    }
}
