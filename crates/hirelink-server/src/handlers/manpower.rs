//! Manpower search endpoints.

use crate::error::AppError;
use crate::state::AppState;
use crate::store::{self, ManpowerRow};
use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use hirelink_core::{categories, relevance, SearchQuery, StoredMedia};
use serde::{Deserialize, Serialize};
use tracing::info;

const STATUS_VALUES: &[&str] = &["available", "busy"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManpowerSearchRequest {
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub availability_status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManpowerProfile {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_number: Option<String>,
    pub whatsapp_number: Option<String>,
    pub location: String,
    pub job_title: Option<String>,
    pub availability_status: String,
    pub available_from: Option<NaiveDate>,
    pub rate: Option<String>,
    pub profile_description: Option<String>,
    pub profile_photo: Option<String>,
    pub cv_path: Option<String>,
    pub certificates: Vec<String>,
    pub relevance_score: i32,
    pub created_at: DateTime<Utc>,
}

impl ManpowerProfile {
    /// Shape a stored row for the response: decode the certificate list and
    /// score the row against the keyword (0 when none given).
    fn from_row(row: ManpowerRow, keyword: &str) -> Self {
        let certificates = StoredMedia::parse(row.certificates.as_deref()).into_urls(row.id);
        let relevance_score = relevance::relevance_score(
            keyword,
            row.job_title.as_deref(),
            row.profile_description.as_deref(),
        );
        Self {
            id: row.id,
            user_id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            mobile_number: row.mobile_number,
            whatsapp_number: row.whatsapp_number,
            location: row.location,
            job_title: row.job_title,
            availability_status: row.availability_status,
            available_from: row.available_from,
            rate: row.rate,
            profile_description: row.profile_description,
            profile_photo: row.profile_photo,
            cv_path: row.cv_path,
            certificates,
            relevance_score,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub availability_status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub manpower: Vec<ManpowerProfile>,
    pub total: usize,
    pub search_criteria: SearchCriteria,
}

/// Shape and order search results: keyword present → stable descending
/// relevance re-sort on top of the store's newest-first ordering; keyword
/// absent → store ordering preserved.
fn shape_results(rows: Vec<ManpowerRow>, keyword: &str) -> Vec<ManpowerProfile> {
    let mut profiles: Vec<ManpowerProfile> = rows
        .into_iter()
        .map(|row| ManpowerProfile::from_row(row, keyword))
        .collect();
    if !keyword.is_empty() {
        relevance::sort_by_relevance(&mut profiles, |profile| profile.relevance_score);
    }
    profiles
}

pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<ManpowerSearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    info!(
        job_title = request.job_title.as_deref(),
        location = request.location.as_deref(),
        availability_status = request.availability_status.as_deref(),
        "manpower search"
    );

    let mut query = SearchQuery::new();
    if let Some(term) = request.job_title.as_deref() {
        query.keyword(term, &["job_title", "profile_description"]);
    }
    let expansion = state
        .registry
        .expand(request.location.as_deref().unwrap_or(""));
    query.location(&expansion);

    let status = request
        .availability_status
        .as_deref()
        .map(str::trim)
        .filter(|value| STATUS_VALUES.contains(value));
    if let Some(value) = status {
        query.equals("availability_status", value);
    }

    let rows = store::search_manpower(&state.pool, &query).await?;
    let keyword = request.job_title.as_deref().map(str::trim).unwrap_or("");
    let manpower = shape_results(rows, keyword);
    let total = manpower.len();

    Ok(Json(SearchResponse {
        success: true,
        manpower,
        total,
        search_criteria: SearchCriteria {
            job_title: request.job_title,
            location: request.location,
            availability_status: request.availability_status,
        },
    }))
}

#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub success: bool,
    pub profile: ManpowerProfile,
}

pub async fn details(
    State(state): State<AppState>,
    Path(manpower_id): Path<i64>,
) -> Result<Json<DetailResponse>, AppError> {
    let row = store::manpower_by_id(&state.pool, manpower_id)
        .await?
        .ok_or(AppError::NotFound("Manpower profile not found"))?;
    Ok(Json(DetailResponse {
        success: true,
        profile: ManpowerProfile::from_row(row, ""),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManpowerStats {
    pub total_manpower: i64,
    pub manpower_with_cv: i64,
    pub available_manpower: i64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub statistics: ManpowerStats,
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let row = store::manpower_stats(&state.pool).await?;
    Ok(Json(StatsResponse {
        success: true,
        statistics: ManpowerStats {
            total_manpower: row.total_manpower,
            manpower_with_cv: row.manpower_with_cv,
            available_manpower: row.available_manpower,
        },
    }))
}

#[derive(Debug, Serialize)]
pub struct CategoryEntry {
    pub name: &'static str,
    pub count: usize,
    pub icon: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<CategoryEntry>,
    pub total_professionals: usize,
}

pub async fn professional_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let texts = store::manpower_profile_texts(&state.pool).await?;
    let total_professionals = texts.len();
    let counts = categories::tally(
        texts
            .iter()
            .map(|(title, description)| (title.as_str(), description.as_deref().unwrap_or(""))),
    );
    Ok(Json(CategoriesResponse {
        success: true,
        categories: counts
            .into_iter()
            .map(|c| CategoryEntry {
                name: c.name,
                count: c.count,
                icon: c.icon,
            })
            .collect(),
        total_professionals,
    }))
}

#[derive(Debug, Serialize)]
pub struct FeaturedResponse {
    pub success: bool,
    pub manpower: Vec<ManpowerProfile>,
    pub count: usize,
}

pub async fn featured(State(state): State<AppState>) -> Result<Json<FeaturedResponse>, AppError> {
    let rows = store::featured_manpower(&state.pool).await?;
    let manpower = shape_results(rows, "");
    let count = manpower.len();
    Ok(Json(FeaturedResponse {
        success: true,
        manpower,
        count,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(id: i64, job_title: &str, description: &str) -> ManpowerRow {
        ManpowerRow {
            id,
            user_id: 1,
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a@example.com".to_string(),
            mobile_number: None,
            whatsapp_number: None,
            location: "Chennai".to_string(),
            job_title: Some(job_title.to_string()),
            availability_status: "available".to_string(),
            available_from: None,
            rate: None,
            profile_description: Some(description.to_string()),
            profile_photo: None,
            cv_path: None,
            certificates: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn title_hits_rank_above_description_hits() {
        // Store ordering puts the description-only hit first; relevance
        // re-sorting must put the title hit on top.
        let rows = vec![
            row(1, "Helper", "worked with an electrician"),
            row(2, "Electrician", "industrial wiring"),
        ];
        let shaped = shape_results(rows, "electrician");
        assert_eq!(shaped[0].id, 2);
        assert_eq!(shaped[0].relevance_score, relevance::TITLE_WEIGHT);
        assert_eq!(shaped[1].relevance_score, relevance::DESCRIPTION_WEIGHT);
    }

    #[test]
    fn no_keyword_preserves_store_order() {
        let rows = vec![row(1, "Welder", ""), row(2, "Electrician", "")];
        let shaped = shape_results(rows, "");
        let ids: Vec<i64> = shaped.iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2]);
        assert!(shaped.iter().all(|p| p.relevance_score == 0));
    }

    #[test]
    fn equal_scores_keep_newest_first_order() {
        let rows = vec![
            row(1, "Electrician", ""),
            row(2, "Electrician", ""),
            row(3, "Helper", ""),
        ];
        let shaped = shape_results(rows, "electrician");
        let ids: Vec<i64> = shaped.iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn profile_serializes_camel_case() {
        let profile = ManpowerProfile::from_row(row(1, "Welder", ""), "");
        let value = serde_json::to_value(profile).unwrap();
        assert!(value.get("jobTitle").is_some());
        assert!(value.get("availabilityStatus").is_some());
        assert!(value.get("relevanceScore").is_some());
        assert!(value.get("job_title").is_none());
    }
}
