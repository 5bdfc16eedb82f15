use std::sync::Arc;

use crate::{
    conf::{SiteOptions, settings},
    pkg::internal::{
        adaptors::{Datastore, PgDatastore, db_pool},
        airtable::{AirtableClient, RecordsApi},
        contacts::{ContactsApi, LoopsClient},
        feed::{FeedSource, Rss2JsonClient},
        minio::{S3Ops, s3_client},
    },
    prelude::Result,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Datastore>,
    pub records: Arc<dyn RecordsApi>,
    pub contacts: Arc<dyn ContactsApi>,
    pub s3_client: Arc<dyn S3Ops>,
    pub feed: Arc<dyn FeedSource>,
    pub site: Arc<SiteOptions>,
}

impl AppState {
    pub fn new() -> Result<AppState> {
        Ok(AppState {
            store: Arc::new(PgDatastore::new(db_pool(&settings)?)),
            records: Arc::new(AirtableClient::new(
                &settings.airtable_api_url,
                &settings.airtable_api_key,
                &settings.airtable_base_id,
            )?),
            contacts: Arc::new(LoopsClient::new(
                &settings.loops_api_url,
                &settings.loops_api_key,
            )?),
            s3_client: Arc::new(s3_client(&settings)),
            feed: Arc::new(Rss2JsonClient::new(&settings.feed_url)?),
            site: Arc::new(SiteOptions::from_settings(&settings)),
        })
    }
}
