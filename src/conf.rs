use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

pub const PLACEHOLDER_IMAGE: &str =
    "https://images.pexels.com/photos/3183150/pexels-photo-3183150.jpeg";

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub service_name: String,
    pub listen_port: String,
    //datastore
    pub database_url: String,
    pub database_pool_max_connections: u32,
    //object storage
    pub s3_endpoint: String,
    pub s3_region: String,
    pub s3_access_key: String,
    pub s3_secret_key: String,
    pub resume_bucket: String,
    //records api
    pub airtable_api_url: String,
    pub airtable_api_key: String,
    pub airtable_base_id: String,
    pub airtable_companies_table: String,
    pub airtable_companies_view: String,
    pub airtable_leads_table: Option<String>,
    //email marketing
    pub loops_api_url: String,
    pub loops_api_key: String,
    //checkout + feed
    pub checkout_url: String,
    pub feed_url: String,
    pub roundup_title_filter: String,
    pub placeholder_image: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .set_default("service_name", "ignytus")?
            .set_default("listen_port", "3000")?
            .set_default("database_pool_max_connections", 5)?
            .set_default("s3_region", "us-east-1")?
            .set_default("resume_bucket", "resumes")?
            .set_default("airtable_api_url", "https://api.airtable.com/v0")?
            .set_default("airtable_companies_table", "Companies")?
            .set_default("airtable_companies_view", "Finalized")?
            .set_default("loops_api_url", "https://app.loops.so/api/v1")?
            .set_default(
                "feed_url",
                "https://api.rss2json.com/v1/api.json?rss_url=https%3A%2F%2Fignyt.substack.com%2Ffeed",
            )?
            .set_default("roundup_title_filter", "weekly")?
            .set_default("placeholder_image", PLACEHOLDER_IMAGE)?
            .add_source(Environment::default())
            .build()?;
        let mut s: Settings = conf.try_deserialize()?;
        s.airtable_api_url = s.airtable_api_url.trim_end_matches('/').into();
        s.loops_api_url = s.loops_api_url.trim_end_matches('/').into();
        if s.airtable_leads_table.as_deref().is_some_and(str::is_empty) {
            s.airtable_leads_table = None;
        }
        Ok(s)
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}

/// Per-request knobs handed to handlers through `AppState`.
#[derive(Debug, Clone)]
pub struct SiteOptions {
    pub resume_bucket: String,
    pub checkout_url: String,
    pub roundup_title_filter: String,
    pub placeholder_image: String,
    pub companies_table: String,
    pub companies_view: String,
    pub leads_table: Option<String>,
}

impl SiteOptions {
    pub fn from_settings(s: &Settings) -> Self {
        SiteOptions {
            resume_bucket: s.resume_bucket.clone(),
            checkout_url: s.checkout_url.clone(),
            roundup_title_filter: s.roundup_title_filter.clone(),
            placeholder_image: s.placeholder_image.clone(),
            companies_table: s.airtable_companies_table.clone(),
            companies_view: s.airtable_companies_view.clone(),
            leads_table: s.airtable_leads_table.clone(),
        }
    }
}
