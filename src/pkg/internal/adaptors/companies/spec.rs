use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyEntry {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub industry_tags: Vec<String>,
    pub cause_tags: Vec<String>,
    pub stage: Option<String>,
    pub founder_name: Option<String>,
    pub founder_linkedin: Option<String>,
    pub is_hiring: bool,
    pub size: Option<String>,
    pub logo: Option<String>,
    pub linkedin: Option<String>,
    pub careers: Option<String>,
    pub hiring_as_of: Option<NaiveDate>,
    pub last_funding_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
