//! In-memory stand-ins for every vendor seam, recording the calls they see.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{
    conf::{PLACEHOLDER_IMAGE, SiteOptions},
    pkg::{
        internal::{
            adaptors::{
                Datastore,
                companies::spec::CompanyEntry,
                jobs::spec::JobListing,
                resources::spec::{CreateResourceData, DEFAULT_PRIORITY, ResourceEntry},
                search_requests::spec::{CreateSearchRequestData, SearchRequestEntry},
            },
            airtable::{AirtableRecord, RecordsApi},
            contacts::{Contact, ContactAck, ContactPayload, ContactsApi},
            feed::{FeedItem, FeedMeta, FeedResponse, FeedSource},
            minio::S3Ops,
        },
        server::{router::build_routes, state::AppState},
    },
    prelude::{AppError, Result},
};

pub const VENDOR_SECRET: &str = "upstream exploded: token sk_live_42 rejected";

pub type Log = Arc<Mutex<Vec<String>>>;

fn record(log: &Log, call: &str) {
    log.lock().unwrap().push(call.to_string());
}

fn failure() -> AppError {
    AppError::vendor("ERR-FAKE-500", VENDOR_SECRET)
}

pub struct FakeStore {
    pub log: Log,
    pub fail: AtomicBool,
    pub companies: Mutex<Vec<CompanyEntry>>,
    pub jobs: Mutex<Vec<JobListing>>,
    pub resources: Mutex<Vec<ResourceEntry>>,
    pub saved_requests: Mutex<Vec<CreateSearchRequestData>>,
    pub saved_resources: Mutex<Vec<CreateResourceData>>,
}

impl FakeStore {
    fn check(&self, call: &str) -> Result<()> {
        record(&self.log, call);
        if self.fail.load(Ordering::SeqCst) {
            return Err(failure());
        }
        Ok(())
    }
}

#[async_trait]
impl Datastore for FakeStore {
    async fn ping(&self) -> Result<()> {
        self.check("store.ping")
    }

    async fn live_companies(&self) -> Result<Vec<CompanyEntry>> {
        self.check("store.live_companies")?;
        Ok(self.companies.lock().unwrap().clone())
    }

    async fn company_by_name(&self, name: &str) -> Result<Option<CompanyEntry>> {
        self.check("store.company_by_name")?;
        Ok(self
            .companies
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn live_jobs(&self) -> Result<Vec<JobListing>> {
        self.check("store.live_jobs")?;
        Ok(self.jobs.lock().unwrap().clone())
    }

    async fn live_jobs_for_company(&self, company_id: Uuid) -> Result<Vec<JobListing>> {
        self.check("store.live_jobs_for_company")?;
        Ok(self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.company_id == Some(company_id))
            .cloned()
            .collect())
    }

    async fn live_resources(&self) -> Result<Vec<ResourceEntry>> {
        self.check("store.live_resources")?;
        Ok(self.resources.lock().unwrap().clone())
    }

    async fn create_resource(&self, resource: CreateResourceData) -> Result<ResourceEntry> {
        self.check("store.create_resource")?;
        self.saved_resources.lock().unwrap().push(resource.clone());
        Ok(ResourceEntry {
            id: Uuid::new_v4(),
            title: resource.title,
            url: resource.url,
            kind: resource.kind,
            focus: Some(resource.focus),
            value: Some(resource.value),
            priority: DEFAULT_PRIORITY.into(),
            status: "Pending".into(),
            created_at: Utc::now(),
        })
    }

    async fn create_search_request(
        &self,
        request: CreateSearchRequestData,
    ) -> Result<SearchRequestEntry> {
        self.check("store.create_search_request")?;
        self.saved_requests.lock().unwrap().push(request.clone());
        Ok(SearchRequestEntry {
            id: Uuid::new_v4(),
            name: request.name,
            email: request.email,
            job_titles: request.job_titles,
            resume_url: request.resume_url,
            paid: false,
            status: "open".into(),
            created_at: Utc::now(),
        })
    }
}

pub struct FakeContacts {
    pub log: Log,
    pub fail: AtomicBool,
    pub fail_find: AtomicBool,
    pub existing: Mutex<Option<Contact>>,
    pub sent: Mutex<Vec<ContactPayload>>,
}

#[async_trait]
impl ContactsApi for FakeContacts {
    async fn find(&self, _email: &str) -> Result<Option<Contact>> {
        record(&self.log, "contacts.find");
        if self.fail_find.load(Ordering::SeqCst) {
            return Err(failure());
        }
        Ok(self.existing.lock().unwrap().clone())
    }

    async fn create(&self, contact: &ContactPayload) -> Result<ContactAck> {
        record(&self.log, "contacts.create");
        if self.fail.load(Ordering::SeqCst) {
            return Err(failure());
        }
        self.sent.lock().unwrap().push(contact.clone());
        Ok(ContactAck {
            success: true,
            id: Some("contact_123".into()),
        })
    }

    async fn update(&self, contact: &ContactPayload) -> Result<ContactAck> {
        record(&self.log, "contacts.update");
        if self.fail.load(Ordering::SeqCst) {
            return Err(failure());
        }
        self.sent.lock().unwrap().push(contact.clone());
        Ok(ContactAck {
            success: true,
            id: Some("contact_123".into()),
        })
    }
}

pub struct FakeRecords {
    pub log: Log,
    pub fail: AtomicBool,
    pub records: Mutex<Vec<AirtableRecord>>,
    pub created: Mutex<Vec<(String, Value)>>,
}

#[async_trait]
impl RecordsApi for FakeRecords {
    async fn list_view(&self, table: &str, view: &str) -> Result<Vec<AirtableRecord>> {
        record(&self.log, &format!("records.list_view:{}:{}", table, view));
        if self.fail.load(Ordering::SeqCst) {
            return Err(failure());
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create_record(&self, table: &str, fields: Value) -> Result<AirtableRecord> {
        record(&self.log, &format!("records.create:{}", table));
        if self.fail.load(Ordering::SeqCst) {
            return Err(failure());
        }
        self.created
            .lock()
            .unwrap()
            .push((table.to_string(), fields.clone()));
        Ok(AirtableRecord {
            id: "recLEAD1".into(),
            fields: fields.as_object().cloned().unwrap_or_default(),
            created_time: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub bucket: String,
    pub key: String,
    pub size: usize,
    pub content_type: String,
}

pub struct FakeS3 {
    pub log: Log,
    pub fail: AtomicBool,
    pub uploads: Mutex<Vec<Upload>>,
}

#[async_trait]
impl S3Ops for FakeS3 {
    async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        record(&self.log, "s3.upload_object");
        if self.fail.load(Ordering::SeqCst) {
            return Err(failure());
        }
        self.uploads.lock().unwrap().push(Upload {
            bucket: bucket.into(),
            key: key.into(),
            size: data.len(),
            content_type: content_type.into(),
        });
        Ok(())
    }
}

pub struct FakeFeed {
    pub log: Log,
    pub fail: AtomicBool,
    pub items: Mutex<Vec<FeedItem>>,
}

#[async_trait]
impl FeedSource for FakeFeed {
    async fn fetch(&self) -> Result<FeedResponse> {
        record(&self.log, "feed.fetch");
        if self.fail.load(Ordering::SeqCst) {
            return Err(failure());
        }
        Ok(FeedResponse {
            status: "ok".into(),
            feed: FeedMeta::default(),
            items: self.items.lock().unwrap().clone(),
        })
    }
}

pub struct Harness {
    pub log: Log,
    pub store: Arc<FakeStore>,
    pub contacts: Arc<FakeContacts>,
    pub records: Arc<FakeRecords>,
    pub s3: Arc<FakeS3>,
    pub feed: Arc<FakeFeed>,
    pub site: SiteOptions,
}

impl Harness {
    pub fn new() -> Self {
        let log: Log = Arc::default();
        Harness {
            store: Arc::new(FakeStore {
                log: log.clone(),
                fail: AtomicBool::new(false),
                companies: Mutex::default(),
                jobs: Mutex::default(),
                resources: Mutex::default(),
                saved_requests: Mutex::default(),
                saved_resources: Mutex::default(),
            }),
            contacts: Arc::new(FakeContacts {
                log: log.clone(),
                fail: AtomicBool::new(false),
                fail_find: AtomicBool::new(false),
                existing: Mutex::default(),
                sent: Mutex::default(),
            }),
            records: Arc::new(FakeRecords {
                log: log.clone(),
                fail: AtomicBool::new(false),
                records: Mutex::default(),
                created: Mutex::default(),
            }),
            s3: Arc::new(FakeS3 {
                log: log.clone(),
                fail: AtomicBool::new(false),
                uploads: Mutex::default(),
            }),
            feed: Arc::new(FakeFeed {
                log: log.clone(),
                fail: AtomicBool::new(false),
                items: Mutex::default(),
            }),
            site: SiteOptions {
                resume_bucket: "resumes".into(),
                checkout_url: "https://buy.stripe.com/test_abc".into(),
                roundup_title_filter: "weekly".into(),
                placeholder_image: PLACEHOLDER_IMAGE.into(),
                companies_table: "Companies".into(),
                companies_view: "Finalized".into(),
                leads_table: None,
            },
            log,
        }
    }

    pub fn state(&self) -> AppState {
        AppState {
            store: self.store.clone(),
            records: self.records.clone(),
            contacts: self.contacts.clone(),
            s3_client: self.s3.clone(),
            feed: self.feed.clone(),
            site: Arc::new(self.site.clone()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let res = build_routes(self.state()).oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

pub const BOUNDARY: &str = "----ignytus-test-boundary";

/// Hand-rolled multipart body: text parts plus an optional file part.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((field, filename, data)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, field, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::post(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn company(name: &str, causes: &[&str]) -> CompanyEntry {
    CompanyEntry {
        id: Uuid::new_v4(),
        name: name.into(),
        description: Some(format!("{} description", name)),
        website: Some(format!("https://{}.example.com", name.to_lowercase())),
        location: Some("Remote".into()),
        industry_tags: vec!["Software".into()],
        cause_tags: causes.iter().map(|c| c.to_string()).collect(),
        stage: Some("Seed".into()),
        founder_name: None,
        founder_linkedin: None,
        is_hiring: true,
        size: Some("11-50".into()),
        logo: None,
        linkedin: None,
        careers: None,
        hiring_as_of: None,
        last_funding_date: None,
        status: "Live".into(),
        created_at: Utc::now(),
    }
}

pub fn job(title: &str, company: &CompanyEntry, role_type: &str) -> JobListing {
    JobListing {
        id: Uuid::new_v4(),
        title: title.into(),
        description: Some(format!("{} at {}", title, company.name)),
        company_id: Some(company.id),
        location: Some("Remote".into()),
        employment_type: Some("Full-time".into()),
        role_type: Some(role_type.into()),
        apply_link: None,
        salary_range: None,
        experience_level: None,
        remote_work: Some(true),
        status: "Live".into(),
        created_at: Utc::now(),
        company_name: Some(company.name.clone()),
        company_website: company.website.clone(),
        company_logo: None,
    }
}

/// Serves `app` on an ephemeral local port and returns its base url.
pub async fn serve_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{}", addr)
}
