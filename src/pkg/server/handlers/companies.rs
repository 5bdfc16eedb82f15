use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde_json::{Value, json};

use crate::{
    pkg::{
        internal::filters::{
            CompanyCard, CompanyFilter, CompanyQuery, available_impact_areas, available_sizes,
            similar_companies, slugify, unslugify,
        },
        server::state::AppState,
    },
    prelude::{AppError, Result},
};

const SIMILAR_LIMIT: usize = 3;

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CompanyQuery>,
) -> Result<Json<Value>> {
    let today = Utc::now().date_naive();
    let cards: Vec<CompanyCard> = state
        .store
        .live_companies()
        .await?
        .iter()
        .map(|c| CompanyCard::from_entry(c, &state.site.placeholder_image, today))
        .collect();
    let impact_areas = available_impact_areas(&cards);
    let sizes = available_sizes(&cards);
    let filter = CompanyFilter::from(&query);
    let companies = filter.apply(cards, today);
    tracing::debug!("{} companies after filtering", companies.len());
    Ok(Json(json!({
        "companies": companies,
        "impactAreas": impact_areas,
        "sizes": sizes,
    })))
}

/// Company page data: the company, its live jobs and a few related companies.
pub async fn detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>> {
    let today = Utc::now().date_naive();
    let name = unslugify(&slug);
    let mut live = None;
    let company = match state.store.company_by_name(&name).await? {
        Some(c) => c,
        None => {
            // names with punctuation never round-trip through the slug
            let all = state.store.live_companies().await?;
            let found = all.iter().find(|c| slugify(&c.name) == slug).cloned();
            live = Some(all);
            found.ok_or_else(|| AppError::NotFound(format!("company \"{}\"", name)))?
        }
    };
    let jobs = state.store.live_jobs_for_company(company.id).await?;
    tracing::debug!("{} has {} live jobs", &company.name, jobs.len());

    let similar: Vec<CompanyCard> = if company.cause_tags.is_empty() {
        Vec::new()
    } else {
        let others = match live {
            Some(all) => all,
            None => state.store.live_companies().await?,
        };
        similar_companies(&company, &others, SIMILAR_LIMIT)
            .into_iter()
            .map(|c| CompanyCard::from_entry(c, &state.site.placeholder_image, today))
            .collect()
    };
    Ok(Json(json!({
        "company": company,
        "card": CompanyCard::from_entry(&company, &state.site.placeholder_image, today),
        "jobs": jobs,
        "similar": similar,
    })))
}
