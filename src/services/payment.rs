//! eSewa registration-fee hand-off.
//!
//! ARCHITECTURE
//! ============
//! The backend owns the merchant secret: `POST /payment/initiate` returns
//! the signed form fields and the portal renders them as a form that posts
//! to the gateway. eSewa sends the browser back to `/payment/success` with a
//! base64 JSON `data` parameter, which the portal decodes and forwards to
//! `POST /payment/verify-payment`. Without a real merchant account the
//! form posts to the portal's own mock gateway, which answers the same way.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::api::normalize::pick_str;
use crate::config::Config;

pub const STATUS_COMPLETE: &str = "COMPLETE";
const URL_KEYS: [&str; 4] = ["formUrl", "paymentUrl", "url", "action"];
const FIELD_CONTAINERS: [&str; 4] = ["fields", "formData", "paymentData", "data"];

/// Errors produced while handling gateway payloads.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PaymentError {
    /// The `data` parameter is not base64.
    #[error("payment payload is not valid base64")]
    InvalidEncoding,

    /// The decoded payload is not the expected JSON object.
    #[error("payment payload is malformed: {0}")]
    InvalidPayload(String),

    /// A required field is absent.
    #[error("payment payload is missing {0}")]
    MissingField(&'static str),

    /// A return URL points somewhere other than this portal.
    #[error("return URL {0:?} is not on this portal")]
    ForeignReturnUrl(String),
}

// =============================================================================
// CHECKOUT
// =============================================================================

/// A form the browser submits to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsewaCheckout {
    pub action: String,
    pub fields: Vec<(String, String)>,
}

impl EsewaCheckout {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_default(&mut self, name: &str, value: impl FnOnce() -> String) {
        if self.field(name).is_none() {
            self.fields.push((name.to_owned(), value()));
        }
    }
}

/// Body for `POST /payment/initiate`.
pub fn initiate_payload(team_id: &str, config: &Config) -> Value {
    json!({
        "teamId": team_id,
        "amount": config.esewa.registration_fee,
        "productCode": config.esewa.product_code,
        "successUrl": config.public_url("/payment/success"),
        "failureUrl": config.public_url("/payment/failure"),
    })
}

/// Build the gateway form from the backend's initiate response, filling
/// any unsigned defaults the backend left out.
pub fn checkout_form(init: &Value, config: &Config) -> EsewaCheckout {
    let action = pick_str(init, &URL_KEYS).unwrap_or_else(|| config.esewa.form_url.clone());
    let source = FIELD_CONTAINERS
        .iter()
        .filter_map(|key| init.get(*key))
        .find(|candidate| candidate.is_object())
        .unwrap_or(init);

    let mut checkout = EsewaCheckout { action, fields: Vec::new() };
    if let Some(map) = source.as_object() {
        for (key, value) in map {
            if URL_KEYS.contains(&key.as_str()) {
                continue;
            }
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            checkout.fields.push((key.clone(), text));
        }
    }

    let fee = config.esewa.registration_fee.to_string();
    checkout.set_default("amount", || fee.clone());
    checkout.set_default("tax_amount", || "0".to_owned());
    checkout.set_default("product_service_charge", || "0".to_owned());
    checkout.set_default("product_delivery_charge", || "0".to_owned());
    checkout.set_default("total_amount", || fee.clone());
    checkout.set_default("transaction_uuid", || Uuid::new_v4().to_string());
    checkout.set_default("product_code", || config.esewa.product_code.clone());
    checkout.set_default("success_url", || config.public_url("/payment/success"));
    checkout.set_default("failure_url", || config.public_url("/payment/failure"));
    checkout.set_default("signed_field_names", || "total_amount,transaction_uuid,product_code".to_owned());
    checkout
}

// =============================================================================
// CALLBACK
// =============================================================================

/// The gateway's decoded success payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsewaCallback {
    pub transaction_code: Option<String>,
    pub status: String,
    pub total_amount: String,
    pub transaction_uuid: String,
    pub product_code: Option<String>,
    pub signed_field_names: Option<String>,
    pub signature: Option<String>,
}

impl EsewaCallback {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_COMPLETE)
    }

    /// Body for `POST /payment/verify-payment`; the raw `data` is passed
    /// through so the backend can check the signature itself.
    #[must_use]
    pub fn verify_payload(&self, raw_data: &str) -> Value {
        json!({
            "data": raw_data,
            "transaction_code": self.transaction_code,
            "status": self.status,
            "total_amount": self.total_amount,
            "transaction_uuid": self.transaction_uuid,
            "product_code": self.product_code,
            "signed_field_names": self.signed_field_names,
            "signature": self.signature,
        })
    }
}

fn decode_base64(data: &str) -> Result<Vec<u8>, PaymentError> {
    // Form decoding turns '+' into ' '.
    let cleaned: String = data.trim().replace(' ', "+");
    STANDARD
        .decode(&cleaned)
        .or_else(|_| URL_SAFE.decode(&cleaned))
        .or_else(|_| URL_SAFE_NO_PAD.decode(cleaned.trim_end_matches('=')))
        .map_err(|_| PaymentError::InvalidEncoding)
}

/// Decode eSewa's `data` query parameter.
///
/// # Errors
///
/// Returns an error if the parameter is not base64, not a JSON object, or
/// lacks the status, amount or transaction id.
pub fn decode_callback(data: &str) -> Result<EsewaCallback, PaymentError> {
    let bytes = decode_base64(data)?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|e| PaymentError::InvalidPayload(e.to_string()))?;
    if !value.is_object() {
        return Err(PaymentError::InvalidPayload("expected a JSON object".to_owned()));
    }
    Ok(EsewaCallback {
        transaction_code: pick_str(&value, &["transaction_code", "transactionCode", "refId"]),
        status: pick_str(&value, &["status"]).ok_or(PaymentError::MissingField("status"))?,
        total_amount: pick_str(&value, &["total_amount", "totalAmount", "amount"])
            .ok_or(PaymentError::MissingField("total_amount"))?,
        transaction_uuid: pick_str(&value, &["transaction_uuid", "transactionUuid"])
            .ok_or(PaymentError::MissingField("transaction_uuid"))?,
        product_code: pick_str(&value, &["product_code", "productCode"]),
        signed_field_names: pick_str(&value, &["signed_field_names"]),
        signature: pick_str(&value, &["signature"]),
    })
}

// =============================================================================
// MOCK GATEWAY
// =============================================================================

/// Where the mock gateway sends the browser after a simulated payment.
///
/// A `COMPLETE` status goes to `success_url` with an encoded `data`
/// payload; anything else goes to `failure_url` untouched. Both must be on
/// the portal's own origin.
///
/// # Errors
///
/// Returns an error if the submitted form lacks the return URLs, amount or
/// transaction id, or if a return URL leaves the portal.
pub fn mock_gateway_redirect(
    fields: &[(String, String)],
    status: &str,
    config: &Config,
) -> Result<String, PaymentError> {
    let get = |name: &'static str| {
        fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .filter(|value| !value.trim().is_empty())
            .ok_or(PaymentError::MissingField(name))
    };
    let return_url = |name: &'static str| {
        let raw = get(name)?;
        config.portal_url(&raw).ok_or(PaymentError::ForeignReturnUrl(raw))
    };

    if !status.eq_ignore_ascii_case(STATUS_COMPLETE) {
        return return_url("failure_url").map(String::from);
    }

    let mut success_url = return_url("success_url")?;
    let transaction_uuid = get("transaction_uuid")?;
    let payload = json!({
        "transaction_code": format!("MOCK{}", transaction_uuid.chars().filter(char::is_ascii_alphanumeric).take(8).collect::<String>().to_uppercase()),
        "status": STATUS_COMPLETE,
        "total_amount": get("total_amount")?,
        "transaction_uuid": transaction_uuid,
        "product_code": get("product_code").ok(),
        "signed_field_names": get("signed_field_names").ok(),
        "signature": get("signature").ok(),
    });
    let encoded = STANDARD.encode(payload.to_string());
    success_url.query_pairs_mut().append_pair("data", &encoded);
    Ok(success_url.into())
}

#[cfg(test)]
#[path = "payment_test.rs"]
mod tests;
