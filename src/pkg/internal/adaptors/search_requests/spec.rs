use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SearchRequestEntry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub job_titles: String,
    pub resume_url: Option<String>,
    pub paid: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Row shape written by the job finder form. Public submissions carry no user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateSearchRequestData {
    pub name: String,
    pub email: String,
    pub job_titles: String,
    pub location: String,
    pub cause_tags: String,
    pub employment_type: Vec<String>,
    pub location_setup: Vec<String>,
    pub industries: String,
    pub impact_only: bool,
    pub notes: String,
    pub resume_url: Option<String>,
}
