use sqlx::PgConnection;

use crate::{pkg::internal::adaptors::resources::spec::ResourceEntry, prelude::Result};

pub struct ResourceSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ResourceSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ResourceSelector { pool }
    }

    pub async fn get_live(&mut self) -> Result<Vec<ResourceEntry>> {
        let rows = sqlx::query_as::<_, ResourceEntry>(
            "SELECT id, title, url, type, focus, value, priority, status, created_at
             FROM resources WHERE status = 'Live'
             ORDER BY priority DESC, created_at DESC",
        )
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
