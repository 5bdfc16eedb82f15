pub mod adaptors;
pub mod airtable;
pub mod checkout;
pub mod contacts;
pub mod feed;
pub mod filters;
pub mod minio;
