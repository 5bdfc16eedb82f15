use crate::{
    conf::settings,
    pkg::internal::minio::{create_bucket, s3_client},
    prelude::Result,
};
use sqlx::{migrate::Migrator, postgres::PgPoolOptions};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn apply() -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&settings.database_url)
        .await?;
    tracing::debug!("connected to db");
    let mut tx = pool.begin().await?;
    MIGRATOR.run(&mut *tx).await?;
    tx.commit().await?;
    tracing::info!("migrations applied successfully");

    let client = s3_client(&settings);
    match create_bucket(&client, &settings.resume_bucket, &settings.s3_region).await? {
        Some(_) => tracing::info!("created bucket {}", &settings.resume_bucket),
        None => tracing::info!("bucket {} already present", &settings.resume_bucket),
    }
    Ok(())
}
