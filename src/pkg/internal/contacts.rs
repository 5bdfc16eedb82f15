use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::prelude::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum UserGroup {
    One(String),
    Many(Vec<String>),
}

impl UserGroup {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            UserGroup::One(g) if g.is_empty() => Vec::new(),
            UserGroup::One(g) => vec![g],
            UserGroup::Many(gs) => gs,
        }
    }
}

/// Contact as written to the email-marketing vendor. Unset fields are left
/// untouched on the vendor side.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_group: Option<UserGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailing_lists: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_group: Option<UserGroup>,
}

impl Contact {
    pub fn user_groups(&self) -> Vec<String> {
        self.user_group.clone().map(UserGroup::into_vec).unwrap_or_default()
    }
}

/// Acknowledgement returned by create/update calls.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ContactAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub id: Option<String>,
}

#[async_trait]
pub trait ContactsApi: Send + Sync {
    async fn find(&self, email: &str) -> Result<Option<Contact>>;
    async fn create(&self, contact: &ContactPayload) -> Result<ContactAck>;
    async fn update(&self, contact: &ContactPayload) -> Result<ContactAck>;
}

#[derive(Debug, Clone)]
pub struct LoopsClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl LoopsClient {
    pub fn new(api_url: &str, api_key: &str) -> Result<Self> {
        Ok(LoopsClient {
            http: Client::builder().build()?,
            api_url: api_url.trim_end_matches('/').into(),
            api_key: api_key.into(),
        })
    }

    async fn ack(&self, code: &'static str, req: reqwest::RequestBuilder) -> Result<ContactAck> {
        let res = req
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::vendor(code, e))?;
        let status = res.status();
        let body = res.text().await.map_err(|e| AppError::vendor(code, e))?;
        if !status.is_success() {
            return Err(AppError::vendor(code, format!("{} {}", status, body)));
        }
        serde_json::from_str(&body).map_err(|e| AppError::malformed(code, format!("{}: {}", e, body)))
    }
}

#[async_trait]
impl ContactsApi for LoopsClient {
    async fn find(&self, email: &str) -> Result<Option<Contact>> {
        let res = self
            .http
            .get(format!("{}/contacts/find", self.api_url))
            .bearer_auth(&self.api_key)
            .query(&[("email", email)])
            .send()
            .await
            .map_err(|e| AppError::vendor("ERR-LOOPS-001", e))?;
        let status = res.status();
        if !status.is_success() {
            return Err(AppError::vendor("ERR-LOOPS-001", status));
        }
        let body: Value = res
            .json()
            .await
            .map_err(|e| AppError::malformed("ERR-LOOPS-001", e))?;
        parse_found(body)
    }

    async fn create(&self, contact: &ContactPayload) -> Result<ContactAck> {
        tracing::debug!("creating contact for {}", &contact.email);
        let req = self
            .http
            .post(format!("{}/contacts/create", self.api_url))
            .json(contact);
        self.ack("ERR-LOOPS-002", req).await
    }

    async fn update(&self, contact: &ContactPayload) -> Result<ContactAck> {
        tracing::debug!("updating contact for {}", &contact.email);
        let req = self
            .http
            .put(format!("{}/contacts/update", self.api_url))
            .json(contact);
        self.ack("ERR-LOOPS-003", req).await
    }
}

/// The find endpoint answers with a list; older accounts answer with a bare object.
fn parse_found(body: Value) -> Result<Option<Contact>> {
    let first = match body {
        Value::Array(items) => items.into_iter().next(),
        Value::Null => None,
        other => Some(other),
    };
    match first {
        Some(v) => serde_json::from_value(v)
            .map(Some)
            .map_err(|e| AppError::malformed("ERR-LOOPS-001", e)),
        None => Ok(None),
    }
}

/// Splits a full name at the first space: "Ada King Lovelace" → ("Ada", "King Lovelace").
pub fn split_name(name: &str) -> (String, String) {
    let name = name.trim();
    match name.split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (name.to_string(), String::new()),
    }
}
