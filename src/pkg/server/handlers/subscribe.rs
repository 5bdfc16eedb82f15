use axum::{Json, extract::State, extract::rejection::JsonRejection};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use validator::Validate;

use crate::{
    pkg::{
        internal::contacts::{ContactPayload, UserGroup, split_name},
        server::state::AppState,
    },
    prelude::Result,
};

/// Early access, quick signup, newsletter and company signup forms all land here.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct SubscribeInput {
    #[validate(email(message = "Email is required"))]
    pub email: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub source: Option<String>,
    pub subscribed: Option<bool>,
    pub user_group: Option<UserGroup>,
    pub user_id: Option<String>,
    pub mailing_lists: Option<Value>,
    pub role: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub company_name: Option<String>,
    pub company_url: Option<String>,
    pub notes: Option<String>,
}

fn present(v: &Option<String>) -> Option<String> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn focus_for(role: &str) -> String {
    match role {
        "job_seeker" => "jobs".into(),
        "founder" => "building".into(),
        other => other.into(),
    }
}

impl SubscribeInput {
    pub fn is_company(&self) -> bool {
        self.kind.as_deref() == Some("company")
    }

    pub fn to_contact(&self, signup_date: &str) -> ContactPayload {
        let mut payload = ContactPayload {
            email: self.email.clone(),
            ..Default::default()
        };
        if let Some(name) = present(&self.name) {
            let (first, last) = split_name(&name);
            payload.first_name = Some(first);
            payload.last_name = Some(last).filter(|l| !l.is_empty());
        }
        if let Some(first) = present(&self.first_name) {
            payload.first_name = Some(first);
        }
        if let Some(last) = present(&self.last_name) {
            payload.last_name = Some(last);
        }
        payload.source = present(&self.source);
        payload.subscribed = self.subscribed;
        payload.user_group = self.user_group.clone();
        payload.user_id = present(&self.user_id);
        payload.mailing_lists = self.mailing_lists.clone();
        payload.focus = present(&self.role).map(|r| focus_for(&r));
        if self.is_company() {
            payload.user_group = Some(UserGroup::One("companies".into()));
            payload.details = Some(
                json!({
                    "companyName": self.company_name,
                    "companyUrl": self.company_url,
                    "notes": self.notes,
                    "signupDate": signup_date,
                    "source": "company-signup",
                })
                .to_string(),
            );
        }
        payload
    }

    fn lead_fields(&self, signup_date: &str) -> Value {
        json!({
            "email": &self.email,
            "name": present(&self.name).unwrap_or_default(),
            "companyName": present(&self.company_name).unwrap_or_default(),
            "companyUrl": present(&self.company_url).unwrap_or_default(),
            "notes": present(&self.notes).unwrap_or_default(),
            "signupDate": signup_date,
        })
    }
}

pub async fn create(
    State(state): State<AppState>,
    input: core::result::Result<Json<SubscribeInput>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(mut input) = input?;
    input.email = input.email.trim().to_string();
    input.validate()?;
    let signup_date = Utc::now().to_rfc3339();
    let contact = input.to_contact(&signup_date);
    tracing::debug!("subscribing {} (focus: {:?})", &contact.email, &contact.focus);
    let ack = state.contacts.create(&contact).await?;

    let mut lead_id = None;
    if input.is_company() {
        if let Some(table) = state.site.leads_table.as_deref() {
            let lead = state
                .records
                .create_record(table, input.lead_fields(&signup_date))
                .await?;
            lead_id = Some(lead.id);
        }
    }
    tracing::info!("new subscriber {}", &contact.email);
    Ok(Json(json!({
        "success": true,
        "id": ack.id,
        "leadId": lead_id,
    })))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use axum::http::StatusCode;
    use serde_json::json;
    use tracing_test::traced_test;

    use super::*;
    use crate::pkg::server::testing::{Harness, VENDOR_SECRET};

    #[tokio::test]
    async fn missing_email_is_rejected_without_vendor_calls() {
        let h = Harness::new();
        let (status, body) = h
            .post_json("/api/subscribe", json!({ "name": "Ada Lovelace" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["field"], "email");
        assert!(h.calls().is_empty());
    }

    #[tokio::test]
    async fn padded_email_is_trimmed_before_validation() {
        let h = Harness::new();
        let (status, body) = h
            .post_json("/api/subscribe", json!({ "email": "  ada@example.com " }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let sent = h.contacts.sent.lock().unwrap().clone();
        assert_eq!(sent[0].email, "ada@example.com");
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let h = Harness::new();
        let (status, body) = h.post_json("/api/subscribe", json!(["not", "an", "object"])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "body");
        assert!(h.calls().is_empty());
    }

    #[tokio::test]
    async fn subscriber_is_created_with_split_name_and_focus() {
        let h = Harness::new();
        let (status, body) = h
            .post_json(
                "/api/subscribe",
                json!({
                    "email": "ada@example.com",
                    "name": "Ada King Lovelace",
                    "type": "full",
                    "role": "job_seeker"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["id"], "contact_123");

        let sent = h.contacts.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].first_name.as_deref(), Some("Ada"));
        assert_eq!(sent[0].last_name.as_deref(), Some("King Lovelace"));
        assert_eq!(sent[0].focus.as_deref(), Some("jobs"));
        assert_eq!(h.calls(), vec!["contacts.create"]);
    }

    #[tokio::test]
    async fn company_signup_is_grouped_and_logged_as_lead() {
        let mut h = Harness::new();
        h.site.leads_table = Some("Leads".into());
        let (status, body) = h
            .post_json(
                "/api/subscribe",
                json!({
                    "email": "founder@sunly.io",
                    "name": "Sam",
                    "companyName": "Sunly",
                    "companyUrl": "https://sunly.io",
                    "notes": "hiring two engineers",
                    "type": "company"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["leadId"], "recLEAD1");

        let sent = h.contacts.sent.lock().unwrap().clone();
        assert_eq!(sent[0].user_group, Some(UserGroup::One("companies".into())));
        let details: Value = serde_json::from_str(sent[0].details.as_deref().unwrap()).unwrap();
        assert_eq!(details["companyName"], "Sunly");
        assert_eq!(details["source"], "company-signup");

        let created = h.records.created.lock().unwrap().clone();
        assert_eq!(created[0].0, "Leads");
        assert_eq!(created[0].1["companyUrl"], "https://sunly.io");
        assert_eq!(h.calls(), vec!["contacts.create", "records.create:Leads"]);
    }

    #[tokio::test]
    #[traced_test]
    async fn vendor_failure_is_generic_500() {
        let h = Harness::new();
        h.contacts.fail.store(true, Ordering::SeqCst);
        let (status, body) = h
            .post_json("/api/subscribe", json!({ "email": "ada@example.com" }))
            .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(!body.to_string().contains("sk_live_42"));
        assert!(logs_contain(VENDOR_SECRET));
    }

    #[test]
    fn explicit_names_override_split_name() {
        let input = SubscribeInput {
            email: "a@b.co".into(),
            name: Some("Ada Lovelace".into()),
            last_name: Some("Byron".into()),
            role: Some("founder".into()),
            ..Default::default()
        };
        let c = input.to_contact("2025-01-01T00:00:00Z");
        assert_eq!(c.first_name.as_deref(), Some("Ada"));
        assert_eq!(c.last_name.as_deref(), Some("Byron"));
        assert_eq!(c.focus.as_deref(), Some("building"));
        assert!(c.details.is_none());
    }
}
