use std::path::Path;

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, Query, State},
};
use chrono::Utc;
use serde_json::{Value, json};
use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::search_requests::spec::CreateSearchRequestData,
            checkout::{CheckoutOutcome, CheckoutReturn, checkout_link},
            minio::{mime_type, resume_key},
        },
        server::state::AppState,
    },
    prelude::{AppError, Result},
};

const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;
const RESUME_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];

pub struct ResumeFile {
    pub file_name: String,
    pub extension: String,
    pub data: Bytes,
}

#[derive(Default, Validate)]
pub struct JobFinderForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Tell us which roles you're after"))]
    pub roles: String,
    pub industries: Vec<String>,
    pub employment_types: Vec<String>,
    pub work_setups: Vec<String>,
    pub location: String,
    pub causes: Vec<String>,
    pub impact_only: bool,
    pub linkedin: String,
    pub personal_links: Vec<String>,
    pub notes: String,
    pub resume_text: String,
    pub resume: Option<ResumeFile>,
}

/// Multi-select fields arrive as json arrays inside text parts.
fn json_list(field: &str, raw: &str) -> Result<Vec<String>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let items: Vec<String> = serde_json::from_str(raw)
        .map_err(|_| AppError::invalid(field, "must be a JSON array of strings"))?;
    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

fn multipart_error(e: impl ToString) -> AppError {
    tracing::debug!("multipart read failed: {}", e.to_string());
    AppError::invalid("body", "could not read form data")
}

impl JobFinderForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = JobFinderForm::default();
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let field_name = field.name().unwrap_or("").to_string();
            if field_name == "resumeFile" {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                if data.is_empty() {
                    continue;
                }
                form.resume = Some(validate_resume(&file_name, data)?);
                continue;
            }
            let text = field.text().await.map_err(multipart_error)?;
            match field_name.as_str() {
                "name" => form.name = text.trim().into(),
                "email" => form.email = text.trim().into(),
                "roles" => form.roles = text.trim().into(),
                "industries" => form.industries = json_list("industries", &text)?,
                "employmentTypes" => form.employment_types = json_list("employmentTypes", &text)?,
                "workSetups" => form.work_setups = json_list("workSetups", &text)?,
                "location" => form.location = text.trim().into(),
                "causes" => form.causes = json_list("causes", &text)?,
                "impactOnly" => form.impact_only = text.trim() == "true",
                "linkedin" => form.linkedin = text.trim().into(),
                "personalLinks" => form.personal_links = json_list("personalLinks", &text)?,
                "notes" => form.notes = text,
                "resumeText" => form.resume_text = text,
                _ => {}
            }
        }
        Ok(form)
    }

    pub fn combined_notes(&self) -> String {
        format!(
            "{}\n\nLinkedIn: {}\nPersonal Links: {}\nResume Text: {}",
            self.notes,
            self.linkedin,
            self.personal_links.join(", "),
            self.resume_text
        )
    }

    pub fn to_search_request(&self, resume_url: Option<String>) -> CreateSearchRequestData {
        CreateSearchRequestData {
            name: self.name.clone(),
            email: self.email.clone(),
            job_titles: self.roles.clone(),
            location: self.location.clone(),
            cause_tags: self.causes.join(", "),
            employment_type: self.employment_types.clone(),
            location_setup: self.work_setups.clone(),
            industries: self.industries.join(", "),
            impact_only: self.impact_only,
            notes: self.combined_notes(),
            resume_url,
        }
    }
}

fn validate_resume(file_name: &str, data: Bytes) -> Result<ResumeFile> {
    let base_name = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("resume")
        .to_string();
    let extension = Path::new(&base_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !RESUME_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::invalid(
            "resumeFile",
            "Only PDF, DOC, DOCX or TXT files are allowed",
        ));
    }
    if data.len() > MAX_RESUME_BYTES {
        return Err(AppError::invalid(
            "resumeFile",
            "File too large. Maximum size is 10MB",
        ));
    }
    Ok(ResumeFile {
        file_name: base_name,
        extension,
        data,
    })
}

/// Saves the request (upload first, then insert) and hands back the checkout link.
pub async fn create(State(state): State<AppState>, multipart: Multipart) -> Result<Json<Value>> {
    let form = JobFinderForm::from_multipart(multipart).await?;
    form.validate()?;
    tracing::debug!("job finder request from {} for {}", &form.email, &form.roles);
    let checkout_url = checkout_link(&state.site.checkout_url, &form.email)?;

    let mut resume_path = None;
    if let Some(resume) = &form.resume {
        let key = resume_key(&form.email, Utc::now().timestamp_millis(), &resume.file_name);
        state
            .s3_client
            .upload_object(
                &state.site.resume_bucket,
                &key,
                resume.data.to_vec(),
                mime_type(&resume.extension),
            )
            .await?;
        resume_path = Some(key);
    }

    let saved = state
        .store
        .create_search_request(form.to_search_request(resume_path))
        .await?;
    tracing::info!("saved job finder request {}", &saved.id);
    Ok(Json(json!({
        "success": true,
        "id": saved.id,
        "checkoutUrl": checkout_url,
    })))
}

pub async fn checkout_return(Query(q): Query<CheckoutReturn>) -> Json<Value> {
    let outcome = CheckoutOutcome::from_query(&q);
    Json(json!({
        "status": outcome,
        "message": outcome.message(),
    }))
}
