//! Predicates applied to already fetched listings, driven by query-string
//! filter state. Multi-valued parameters are comma separated.

use std::collections::BTreeSet;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    adaptors::{companies::spec::CompanyEntry, jobs::spec::JobListing, resources::spec::ResourceEntry},
    airtable::Startup,
};

pub const ACTIVELY_HIRING: &str = "Actively Hiring";
pub const NOT_HIRING: &str = "Not hiring";

const SIZE_ORDER: [&str; 7] = ["2-10", "11-50", "51-200", "201-500", "501-1K", "1K-5K", "5K+"];

pub fn parse_list(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Empty selection matches everything, otherwise any shared tag does.
pub fn intersects(tags: &[String], selected: &[String]) -> bool {
    selected.is_empty() || tags.iter().any(|t| selected.contains(t))
}

pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

pub fn unslugify(slug: &str) -> String {
    slug.replace('-', " ")
}

/// Funding counts as recent when it landed within the last six calendar months.
pub fn is_recently_raised(last_funding: Option<NaiveDate>, today: NaiveDate) -> bool {
    let Some(date) = last_funding else {
        return false;
    };
    match today.checked_sub_months(Months::new(6)) {
        Some(cutoff) => date >= cutoff,
        None => false,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyCard {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub location: String,
    pub company_url: String,
    pub image_url: String,
    pub impact_areas: Vec<String>,
    pub tags: Vec<String>,
    pub opportunity_type: String,
    pub size: Option<String>,
    pub stage: Option<String>,
    pub last_funding_date: Option<NaiveDate>,
    pub recently_raised: bool,
}

impl CompanyCard {
    pub fn from_entry(c: &CompanyEntry, placeholder_image: &str, today: NaiveDate) -> Self {
        let slug = slugify(&c.name);
        CompanyCard {
            id: c.id,
            name: c.name.clone(),
            description: c.description.clone().unwrap_or_default(),
            location: c.location.clone().unwrap_or_default(),
            company_url: c
                .website
                .clone()
                .filter(|w| !w.is_empty())
                .unwrap_or_else(|| format!("/companies/{}", &slug)),
            slug,
            image_url: c
                .logo
                .clone()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| placeholder_image.into()),
            impact_areas: c.cause_tags.clone(),
            tags: c.industry_tags.clone(),
            opportunity_type: if c.is_hiring { ACTIVELY_HIRING } else { NOT_HIRING }.into(),
            size: c.size.clone().filter(|s| !s.is_empty()),
            stage: c.stage.clone(),
            last_funding_date: c.last_funding_date,
            recently_raised: is_recently_raised(c.last_funding_date, today),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyQuery {
    pub search: Option<String>,
    pub impact: Option<String>,
    pub hiring: Option<String>,
    pub size: Option<String>,
    pub recently_raised: Option<String>,
}

/// Boolean query flag. Absent or empty leaves the listing alone; any value
/// other than `true`/`false` matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Toggle {
    #[default]
    Unset,
    On,
    Off,
    Unrecognised,
}

impl Toggle {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Toggle::Unset,
            Some("true") => Toggle::On,
            Some("false") => Toggle::Off,
            Some(_) => Toggle::Unrecognised,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyFilter {
    pub search: String,
    pub impact: Vec<String>,
    pub hiring: Toggle,
    pub sizes: Vec<String>,
    pub recently_raised: Toggle,
}

impl From<&CompanyQuery> for CompanyFilter {
    fn from(q: &CompanyQuery) -> Self {
        CompanyFilter {
            search: q.search.clone().unwrap_or_default().trim().to_lowercase(),
            impact: parse_list(q.impact.as_deref()),
            hiring: Toggle::parse(q.hiring.as_deref()),
            sizes: parse_list(q.size.as_deref()),
            recently_raised: Toggle::parse(q.recently_raised.as_deref()),
        }
    }
}

impl CompanyFilter {
    pub fn matches(&self, c: &CompanyCard, today: NaiveDate) -> bool {
        let s = &self.search;
        let matches_search = s.is_empty()
            || contains_ci(&c.name, s)
            || contains_ci(&c.description, s)
            || contains_ci(&c.location, s)
            || c.impact_areas.iter().any(|a| contains_ci(a, s))
            || c.tags.iter().any(|t| contains_ci(t, s));
        let matches_hiring = match self.hiring {
            Toggle::Unset => true,
            Toggle::On => c.opportunity_type == ACTIVELY_HIRING,
            Toggle::Off => c.opportunity_type == NOT_HIRING,
            Toggle::Unrecognised => false,
        };
        let matches_size = self.sizes.is_empty()
            || c.size.as_ref().is_some_and(|size| self.sizes.contains(size));
        // only `true` narrows by funding date; any other value matches nothing
        let matches_raised = match self.recently_raised {
            Toggle::Unset => true,
            Toggle::On => is_recently_raised(c.last_funding_date, today),
            Toggle::Off | Toggle::Unrecognised => false,
        };
        matches_search
            && intersects(&c.impact_areas, &self.impact)
            && matches_hiring
            && matches_size
            && matches_raised
    }

    pub fn apply(&self, cards: Vec<CompanyCard>, today: NaiveDate) -> Vec<CompanyCard> {
        cards.into_iter().filter(|c| self.matches(c, today)).collect()
    }
}

pub fn available_impact_areas(cards: &[CompanyCard]) -> Vec<String> {
    cards
        .iter()
        .flat_map(|c| c.impact_areas.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Known sizes smallest first, then anything unrecognised alphabetically.
pub fn sort_company_sizes(mut sizes: Vec<String>) -> Vec<String> {
    let rank = |s: &str| SIZE_ORDER.iter().position(|o| *o == s);
    sizes.sort_by(|a, b| match (rank(a), rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.cmp(b),
    });
    sizes
}

pub fn available_sizes(cards: &[CompanyCard]) -> Vec<String> {
    let sizes: BTreeSet<String> = cards.iter().filter_map(|c| c.size.clone()).collect();
    sort_company_sizes(sizes.into_iter().collect())
}

/// Up to `limit` other companies sharing at least one cause tag.
pub fn similar_companies<'a>(
    company: &CompanyEntry,
    others: &'a [CompanyEntry],
    limit: usize,
) -> Vec<&'a CompanyEntry> {
    if company.cause_tags.is_empty() {
        return Vec::new();
    }
    others
        .iter()
        .filter(|o| o.id != company.id)
        .filter(|o| o.cause_tags.iter().any(|t| company.cause_tags.contains(t)))
        .take(limit)
        .collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobQuery {
    pub search: Option<String>,
    pub role_type: Option<String>,
}

impl JobQuery {
    pub fn matches(&self, job: &JobListing) -> bool {
        let search = self.search.as_deref().unwrap_or_default().trim().to_lowercase();
        let matches_search = search.is_empty()
            || contains_ci(&job.title, &search)
            || job
                .description
                .as_deref()
                .is_some_and(|d| contains_ci(d, &search))
            || job
                .company_name
                .as_deref()
                .is_some_and(|n| contains_ci(n, &search));
        let matches_role = match self.role_type.as_deref().filter(|r| !r.is_empty()) {
            None => true,
            Some(role) => job.role_type.as_deref() == Some(role),
        };
        matches_search && matches_role
    }
}

pub fn available_role_types(jobs: &[JobListing]) -> Vec<String> {
    jobs.iter()
        .filter_map(|j| j.role_type.clone())
        .filter(|r| !r.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartupQuery {
    pub areas: Option<String>,
}

impl StartupQuery {
    pub fn apply(&self, startups: Vec<Startup>) -> Vec<Startup> {
        let selected = parse_list(self.areas.as_deref());
        startups
            .into_iter()
            .filter(|s| intersects(&s.impact_areas, &selected))
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl ResourceQuery {
    pub fn matches(&self, resource: &ResourceEntry) -> bool {
        match self.kind.as_deref().filter(|k| !k.is_empty()) {
            None => true,
            Some(kind) => resource.kind == kind,
        }
    }
}

pub fn available_resource_types(resources: &[ResourceEntry]) -> Vec<String> {
    resources
        .iter()
        .map(|r| r.kind.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
