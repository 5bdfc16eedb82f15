use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::resources::spec::{CreateResourceData, DEFAULT_PRIORITY, ResourceEntry},
    prelude::Result,
};

pub struct ResourceMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ResourceMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ResourceMutator { pool }
    }

    pub async fn create(&mut self, resource: CreateResourceData) -> Result<ResourceEntry> {
        let row = sqlx::query_as::<_, ResourceEntry>(
            r#"
            INSERT INTO resources (title, url, type, focus, value, priority, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, CURRENT_TIMESTAMP)
            RETURNING id, title, url, type, focus, value, priority, status, created_at
            "#,
        )
        .bind(&resource.title)
        .bind(&resource.url)
        .bind(&resource.kind)
        .bind(&resource.focus)
        .bind(&resource.value)
        .bind(DEFAULT_PRIORITY)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
