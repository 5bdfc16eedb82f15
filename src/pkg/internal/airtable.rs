use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::prelude::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirtableRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(rename = "createdTime", default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListPage {
    records: Option<Vec<AirtableRecord>>,
    offset: Option<String>,
}

/// Spreadsheet style records api.
#[async_trait]
pub trait RecordsApi: Send + Sync {
    async fn list_view(&self, table: &str, view: &str) -> Result<Vec<AirtableRecord>>;
    async fn create_record(&self, table: &str, fields: Value) -> Result<AirtableRecord>;
}

#[derive(Debug, Clone)]
pub struct AirtableClient {
    http: Client,
    api_url: String,
    api_key: String,
    base_id: String,
}

impl AirtableClient {
    pub fn new(api_url: &str, api_key: &str, base_id: &str) -> Result<Self> {
        if api_key.is_empty() || base_id.is_empty() {
            return Err(AppError::Config(config::ConfigError::Message(
                "missing required airtable configuration".into(),
            )));
        }
        Ok(AirtableClient {
            http: Client::builder().build()?,
            api_url: api_url.trim_end_matches('/').into(),
            api_key: api_key.into(),
            base_id: base_id.into(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.api_url, self.base_id, table)
    }
}

async fn vendor_failure(code: &'static str, status: StatusCode, res: reqwest::Response) -> AppError {
    let body = res.text().await.unwrap_or_default();
    AppError::vendor(code, format!("{} {}", status, body))
}

#[async_trait]
impl RecordsApi for AirtableClient {
    async fn list_view(&self, table: &str, view: &str) -> Result<Vec<AirtableRecord>> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let mut query = vec![("view", view.to_string())];
            if let Some(o) = offset.take() {
                query.push(("offset", o));
            }
            let res = self
                .http
                .get(self.table_url(table))
                .bearer_auth(&self.api_key)
                .query(&query)
                .send()
                .await
                .map_err(|e| AppError::vendor("ERR-AIRTABLE-001", e))?;
            let status = res.status();
            if !status.is_success() {
                return Err(vendor_failure("ERR-AIRTABLE-001", status, res).await);
            }
            let page: ListPage = res
                .json()
                .await
                .map_err(|e| AppError::malformed("ERR-AIRTABLE-002", e))?;
            let Some(batch) = page.records else {
                return Err(AppError::malformed(
                    "ERR-AIRTABLE-002",
                    "response has no records",
                ));
            };
            tracing::debug!("airtable {}: fetched {} records", table, batch.len());
            records.extend(batch);
            match page.offset {
                Some(o) if !o.is_empty() => offset = Some(o),
                _ => break,
            }
        }
        Ok(records)
    }

    async fn create_record(&self, table: &str, fields: Value) -> Result<AirtableRecord> {
        let res = self
            .http
            .post(self.table_url(table))
            .bearer_auth(&self.api_key)
            .json(&json!({ "fields": fields, "typecast": true }))
            .send()
            .await
            .map_err(|e| AppError::vendor("ERR-AIRTABLE-003", e))?;
        let status = res.status();
        if !status.is_success() {
            return Err(vendor_failure("ERR-AIRTABLE-003", status, res).await);
        }
        let record: AirtableRecord = res
            .json()
            .await
            .map_err(|e| AppError::malformed("ERR-AIRTABLE-004", e))?;
        Ok(record)
    }
}

/// Directory card built from a curated companies view record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Startup {
    pub id: String,
    pub name: String,
    pub description: String,
    pub company_url: String,
    pub location: String,
    pub opportunity_type: String,
    pub opportunities: Vec<String>,
    pub impact_areas: Vec<String>,
    pub image_url: String,
    pub tags: Vec<String>,
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn list_field(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    match fields.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

impl Startup {
    pub fn from_record(record: &AirtableRecord, placeholder_image: &str) -> Self {
        let f = &record.fields;
        Startup {
            id: record.id.clone(),
            name: text_field(f, "name").unwrap_or_default(),
            description: text_field(f, "description").unwrap_or_default(),
            company_url: text_field(f, "companyUrl").unwrap_or_default(),
            location: text_field(f, "location").unwrap_or_default(),
            opportunity_type: text_field(f, "opportunityType")
                .unwrap_or_else(|| "Looking for".into()),
            opportunities: list_field(f, "opportunities"),
            impact_areas: list_field(f, "impactAreas"),
            image_url: text_field(f, "imageUrl").unwrap_or_else(|| placeholder_image.into()),
            tags: list_field(f, "tags"),
        }
    }
}
