use sqlx::PgConnection;
use uuid::Uuid;

use crate::{pkg::internal::adaptors::jobs::spec::JobListing, prelude::Result};

const LISTING: &str = "SELECT j.id, j.title, j.description, j.company_id, j.location, \
    j.employment_type, j.role_type, j.apply_link, j.salary_range, j.experience_level, \
    j.remote_work, j.status, j.created_at, \
    c.name AS company_name, c.website AS company_website, c.logo AS company_logo \
    FROM jobs j LEFT JOIN companies c ON c.id = j.company_id";

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn get_live(&mut self) -> Result<Vec<JobListing>> {
        let rows = sqlx::query_as::<_, JobListing>(&format!(
            "{} WHERE j.status = 'Live' ORDER BY j.created_at DESC",
            LISTING
        ))
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_live_by_company(&mut self, company_id: Uuid) -> Result<Vec<JobListing>> {
        let rows = sqlx::query_as::<_, JobListing>(&format!(
            "{} WHERE j.status = 'Live' AND j.company_id = $1 ORDER BY j.created_at DESC",
            LISTING
        ))
        .bind(company_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
