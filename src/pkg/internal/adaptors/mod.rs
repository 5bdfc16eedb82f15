pub mod companies;
pub mod jobs;
pub mod resources;
pub mod search_requests;

use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};
use uuid::Uuid;

use crate::{conf::Settings, prelude::Result};
use companies::{selectors::CompanySelector, spec::CompanyEntry};
use jobs::{selectors::JobSelector, spec::JobListing};
use resources::{
    mutators::ResourceMutator,
    selectors::ResourceSelector,
    spec::{CreateResourceData, ResourceEntry},
};
use search_requests::{
    mutators::SearchRequestMutator,
    spec::{CreateSearchRequestData, SearchRequestEntry},
};

/// Reads and writes against the hosted relational datastore.
#[async_trait]
pub trait Datastore: Send + Sync {
    async fn ping(&self) -> Result<()>;
    async fn live_companies(&self) -> Result<Vec<CompanyEntry>>;
    async fn company_by_name(&self, name: &str) -> Result<Option<CompanyEntry>>;
    async fn live_jobs(&self) -> Result<Vec<JobListing>>;
    async fn live_jobs_for_company(&self, company_id: Uuid) -> Result<Vec<JobListing>>;
    async fn live_resources(&self) -> Result<Vec<ResourceEntry>>;
    async fn create_resource(&self, resource: CreateResourceData) -> Result<ResourceEntry>;
    async fn create_search_request(
        &self,
        request: CreateSearchRequestData,
    ) -> Result<SearchRequestEntry>;
}

pub fn db_pool(s: &Settings) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(s.database_pool_max_connections)
        .connect_lazy(&s.database_url)?;
    Ok(pool)
}

#[derive(Debug, Clone)]
pub struct PgDatastore {
    pool: PgPool,
}

impl PgDatastore {
    pub fn new(pool: PgPool) -> Self {
        PgDatastore { pool }
    }
}

#[async_trait]
impl Datastore for PgDatastore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("select 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn live_companies(&self) -> Result<Vec<CompanyEntry>> {
        let mut conn = self.pool.acquire().await?;
        CompanySelector::new(&mut conn).get_live().await
    }

    async fn company_by_name(&self, name: &str) -> Result<Option<CompanyEntry>> {
        let mut conn = self.pool.acquire().await?;
        CompanySelector::new(&mut conn).get_by_name(name).await
    }

    async fn live_jobs(&self) -> Result<Vec<JobListing>> {
        let mut conn = self.pool.acquire().await?;
        JobSelector::new(&mut conn).get_live().await
    }

    async fn live_jobs_for_company(&self, company_id: Uuid) -> Result<Vec<JobListing>> {
        let mut conn = self.pool.acquire().await?;
        JobSelector::new(&mut conn)
            .get_live_by_company(company_id)
            .await
    }

    async fn live_resources(&self) -> Result<Vec<ResourceEntry>> {
        let mut conn = self.pool.acquire().await?;
        ResourceSelector::new(&mut conn).get_live().await
    }

    async fn create_resource(&self, resource: CreateResourceData) -> Result<ResourceEntry> {
        let mut tx = self.pool.begin().await?;
        let row = ResourceMutator::new(&mut tx).create(resource).await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn create_search_request(
        &self,
        request: CreateSearchRequestData,
    ) -> Result<SearchRequestEntry> {
        let mut tx = self.pool.begin().await?;
        let row = SearchRequestMutator::new(&mut tx).create(request).await?;
        tx.commit().await?;
        Ok(row)
    }
}
