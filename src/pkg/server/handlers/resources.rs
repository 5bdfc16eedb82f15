use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};
use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::resources::spec::CreateResourceData,
            contacts::{ContactPayload, UserGroup, split_name},
            filters::{ResourceQuery, available_resource_types},
        },
        server::state::AppState,
    },
    prelude::Result,
};

const RESOURCE_GROUP: &str = "resource";

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SubmitResourceInput {
    #[validate(length(min = 1, message = "All fields are required"))]
    pub name: String,
    #[validate(email(message = "All fields are required"))]
    pub email: String,
    #[validate(length(min = 1, message = "All fields are required"))]
    pub title: String,
    #[validate(length(min = 1, message = "All fields are required"))]
    pub url: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub kind: String,
    #[validate(length(min = 1, message = "All fields are required"))]
    pub focus: String,
    #[validate(length(min = 1, message = "All fields are required"))]
    pub value: String,
}

/// Existing groups plus `resource`, without duplicating it.
fn with_resource_group(mut groups: Vec<String>) -> Vec<String> {
    if !groups.iter().any(|g| g == RESOURCE_GROUP) {
        groups.push(RESOURCE_GROUP.into());
    }
    groups
}

pub async fn submit(
    State(state): State<AppState>,
    input: core::result::Result<Json<SubmitResourceInput>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(mut input) = input?;
    input.email = input.email.trim().to_string();
    input.validate()?;

    let existing = match state.contacts.find(&input.email).await {
        Ok(found) => found.map(|c| c.user_groups()).unwrap_or_default(),
        Err(e) => {
            tracing::warn!("could not fetch existing contact, will create new one: {}", e);
            Vec::new()
        }
    };
    let (first_name, last_name) = split_name(&input.name);
    let contact = ContactPayload {
        email: input.email.clone(),
        first_name: Some(first_name),
        last_name: Some(last_name),
        user_group: Some(UserGroup::Many(with_resource_group(existing))),
        ..Default::default()
    };
    let ack = state.contacts.update(&contact).await?;

    let resource = state
        .store
        .create_resource(CreateResourceData {
            title: input.title,
            url: input.url,
            kind: input.kind,
            focus: input.focus,
            value: input.value,
        })
        .await?;
    tracing::info!("resource {} submitted by {}", &resource.id, &contact.email);
    Ok(Json(json!({
        "success": true,
        "message": "Resource submitted successfully",
        "contact": ack,
        "resource": resource,
    })))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<Value>> {
    let resources = state.store.live_resources().await?;
    let types = available_resource_types(&resources);
    let resources: Vec<_> = resources.into_iter().filter(|r| query.matches(r)).collect();
    Ok(Json(json!({
        "resources": resources,
        "types": types,
    })))
}
