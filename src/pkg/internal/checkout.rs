use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::prelude::{AppError, Result};

/// Hosted checkout link prefilled with the visitor's email. The email doubles
/// as the client reference so the payment can be matched to the saved request.
pub fn checkout_link(base: &str, email: &str) -> Result<String> {
    let mut url = Url::parse(base)
        .map_err(|e| AppError::malformed("ERR-CHECKOUT-001", format!("{}: {}", base, e)))?;
    url.query_pairs_mut()
        .append_pair("prefilled_email", email)
        .append_pair("client_reference_id", email);
    Ok(url.into())
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckoutReturn {
    pub success: Option<String>,
    pub canceled: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutOutcome {
    Completed,
    Canceled,
    Pending,
}

impl CheckoutOutcome {
    pub fn from_query(q: &CheckoutReturn) -> Self {
        if q.success.as_deref() == Some("true") {
            CheckoutOutcome::Completed
        } else if q.canceled.as_deref() == Some("true") {
            CheckoutOutcome::Canceled
        } else {
            CheckoutOutcome::Pending
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            CheckoutOutcome::Completed => {
                "Payment received. We'll start searching and reach out by email."
            }
            CheckoutOutcome::Canceled => "Payment was canceled. You can try again anytime.",
            CheckoutOutcome::Pending => "No payment result yet.",
        }
    }
}
