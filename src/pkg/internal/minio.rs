use async_trait::async_trait;
use aws_sdk_s3::{
    Client,
    config::{BehaviorVersion, Credentials, Region},
    primitives::ByteStream,
    types::{BucketLocationConstraint, CreateBucketConfiguration},
};

use crate::{
    conf::Settings,
    prelude::{AppError, Result},
};

#[async_trait]
pub trait S3Ops: Send + Sync {
    async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;
}

#[async_trait]
impl S3Ops for Client {
    async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let size = data.len();
        self.put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| AppError::vendor("ERR-S3-002", format!("{:?}", e)))?;
        tracing::debug!("uploaded {} ({} bytes) to {}", key, size, bucket);
        Ok(())
    }
}

/// Path-style client for an s3 compatible endpoint (hosted storage, minio).
pub fn s3_client(s: &Settings) -> Client {
    let creds = Credentials::new(
        s.s3_access_key.clone(),
        s.s3_secret_key.clone(),
        None,
        None,
        "ignytus-settings",
    );
    let conf = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(s.s3_region.clone()))
        .endpoint_url(&s.s3_endpoint)
        .credentials_provider(creds)
        .force_path_style(true)
        .build();
    Client::from_conf(conf)
}

/// us-east-1 is the implicit default and rejects an explicit constraint.
pub fn bucket_configuration(region: &str) -> Option<CreateBucketConfiguration> {
    if region.is_empty() || region == "us-east-1" {
        return None;
    }
    Some(
        CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(region))
            .build(),
    )
}

pub async fn create_bucket(
    client: &Client,
    bucket_name: &str,
    region: &str,
) -> Result<Option<aws_sdk_s3::operation::create_bucket::CreateBucketOutput>> {
    let create = client
        .create_bucket()
        .set_create_bucket_configuration(bucket_configuration(region))
        .bucket(bucket_name)
        .send()
        .await;
    create.map(Some).or_else(|err| {
        if err
            .as_service_error()
            .map(|se| se.is_bucket_already_exists() || se.is_bucket_already_owned_by_you())
            == Some(true)
        {
            Ok(None)
        } else {
            Err(AppError::vendor("ERR-S3-001", format!("{:?}", err)))
        }
    })
}

/// Folder-safe form of an email: everything outside `[a-zA-Z0-9]` becomes `_`.
pub fn sanitize_key_segment(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

pub fn resume_key(email: &str, millis: i64, file_name: &str) -> String {
    format!("{}/{}-{}", sanitize_key_segment(email), millis, file_name)
}

pub fn mime_type(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_keys_are_grouped_by_sanitized_email() {
        assert_eq!(
            resume_key("jane.doe+jobs@example.com", 1717171717000, "cv.pdf"),
            "jane_doe_jobs_example_com/1717171717000-cv.pdf"
        );
    }

    #[test]
    fn bucket_location_follows_region() {
        assert!(bucket_configuration("us-east-1").is_none());
        let cfg = bucket_configuration("eu-central-1").unwrap();
        assert_eq!(
            cfg.location_constraint().map(|c| c.as_str()),
            Some("eu-central-1")
        );
    }

    #[test]
    fn unknown_extensions_are_octet_streams() {
        assert_eq!(mime_type("pdf"), "application/pdf");
        assert_eq!(mime_type("exe"), "application/octet-stream");
    }
}
