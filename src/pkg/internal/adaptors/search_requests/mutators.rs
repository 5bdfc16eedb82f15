use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::search_requests::spec::{CreateSearchRequestData, SearchRequestEntry},
    prelude::Result,
};

pub struct SearchRequestMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> SearchRequestMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        SearchRequestMutator { pool }
    }

    pub async fn create(&mut self, request: CreateSearchRequestData) -> Result<SearchRequestEntry> {
        let row = sqlx::query_as::<_, SearchRequestEntry>(
            r#"
            INSERT INTO search_requests (
                user_id, name, email, job_titles, location, cause_tags, employment_type,
                location_setup, industries, impact_only, notes, resume_url, paid, status
            )
            VALUES (NULL, $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, false, 'open')
            RETURNING id, name, email, job_titles, resume_url, paid, status, created_at
            "#,
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.job_titles)
        .bind(&request.location)
        .bind(&request.cause_tags)
        .bind(&request.employment_type)
        .bind(&request.location_setup)
        .bind(&request.industries)
        .bind(request.impact_only)
        .bind(&request.notes)
        .bind(&request.resume_url)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
