use sqlx::PgConnection;

use crate::{pkg::internal::adaptors::companies::spec::CompanyEntry, prelude::Result};

const COLUMNS: &str = "id, name, description, website, location, \
    COALESCE(industry_tags, '{}') AS industry_tags, COALESCE(cause_tags, '{}') AS cause_tags, \
    stage, founder_name, founder_linkedin, COALESCE(is_hiring, false) AS is_hiring, size, logo, \
    linkedin, careers, hiring_as_of, last_funding_date, status, created_at";

pub struct CompanySelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> CompanySelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        CompanySelector { pool }
    }

    pub async fn get_live(&mut self) -> Result<Vec<CompanyEntry>> {
        let rows = sqlx::query_as::<_, CompanyEntry>(&format!(
            "SELECT {} FROM companies WHERE status = 'Live' ORDER BY created_at DESC",
            COLUMNS
        ))
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_name(&mut self, name: &str) -> Result<Option<CompanyEntry>> {
        let row = sqlx::query_as::<_, CompanyEntry>(&format!(
            "SELECT {} FROM companies WHERE name ILIKE $1 ORDER BY created_at DESC LIMIT 1",
            COLUMNS
        ))
        .bind(escape_like(name))
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }
}

/// `ILIKE` treats `%` and `_` as wildcards; names are matched literally.
fn escape_like(name: &str) -> String {
    name.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
