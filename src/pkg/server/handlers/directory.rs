use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    pkg::{
        internal::{airtable::Startup, filters::StartupQuery},
        server::state::AppState,
    },
    prelude::Result,
};

/// Curated startup directory kept in the records api.
pub async fn startups(
    State(state): State<AppState>,
    Query(query): Query<StartupQuery>,
) -> Result<Json<Vec<Startup>>> {
    let records = state
        .records
        .list_view(&state.site.companies_table, &state.site.companies_view)
        .await?;
    tracing::debug!("directory returned {} records", records.len());
    let startups = records
        .iter()
        .map(|r| Startup::from_record(r, &state.site.placeholder_image))
        .collect();
    Ok(Json(query.apply(startups)))
}
