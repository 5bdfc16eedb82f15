use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::{Value, json};

use crate::{
    pkg::{
        internal::filters::{JobQuery, available_role_types},
        server::state::AppState,
    },
    prelude::Result,
};

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> Result<Json<Value>> {
    let jobs = state.store.live_jobs().await?;
    let role_types = available_role_types(&jobs);
    let jobs: Vec<_> = jobs.into_iter().filter(|j| query.matches(j)).collect();
    Ok(Json(json!({
        "jobs": jobs,
        "roleTypes": role_types,
    })))
}
