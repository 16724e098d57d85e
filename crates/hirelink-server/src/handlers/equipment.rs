//! Equipment search endpoints.

use crate::error::AppError;
use crate::state::AppState;
use crate::store::{self, EquipmentRow};
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use hirelink_core::{SearchQuery, StoredMedia};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Accepted values for the availability filter; anything else is ignored
/// rather than rejected, matching the permissive query contract.
const AVAILABILITY_VALUES: &[&str] = &["available", "on-hire"];

#[derive(Debug, Deserialize)]
pub struct EquipmentSearchParams {
    pub search: Option<String>,
    pub location: Option<String>,
    pub availability: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentListing {
    pub id: i64,
    pub user_id: i64,
    pub equipment_name: String,
    pub equipment_type: String,
    pub location: String,
    pub contact_person: Option<String>,
    pub contact_number: Option<String>,
    pub contact_email: Option<String>,
    pub availability: String,
    pub description: Option<String>,
    pub equipment_images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EquipmentRow> for EquipmentListing {
    fn from(row: EquipmentRow) -> Self {
        let images = StoredMedia::parse(row.equipment_images.as_deref()).into_urls(row.id);
        Self {
            id: row.id,
            user_id: row.user_id,
            equipment_name: row.equipment_name,
            equipment_type: row.equipment_type,
            location: row.location,
            contact_person: row.contact_person,
            contact_number: row.contact_number,
            contact_email: row.contact_email,
            availability: row.availability,
            description: row.description,
            equipment_images: images,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FilterEcho {
    pub search: Option<String>,
    pub location: Option<String>,
    pub availability: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub msg: String,
    pub data: Vec<EquipmentListing>,
    pub count: usize,
    pub filters: FilterEcho,
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<EquipmentSearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    info!(
        search = params.search.as_deref(),
        location = params.location.as_deref(),
        availability = params.availability.as_deref(),
        "equipment search"
    );

    let mut query = SearchQuery::new();
    if let Some(term) = params.search.as_deref() {
        query.keyword(term, &["equipment_name", "equipment_type", "description"]);
    }
    let expansion = state
        .registry
        .expand(params.location.as_deref().unwrap_or(""));
    query.location(&expansion);

    let availability = params
        .availability
        .as_deref()
        .map(str::trim)
        .filter(|value| AVAILABILITY_VALUES.contains(value));
    if let Some(value) = availability {
        query.equals("availability", value);
    }

    let rows = store::search_equipment(&state.pool, &query).await?;
    let data: Vec<EquipmentListing> = rows.into_iter().map(EquipmentListing::from).collect();
    let count = data.len();

    Ok(Json(SearchResponse {
        success: true,
        msg: format!("Found {count} equipment items"),
        data,
        count,
        filters: FilterEcho {
            search: params.search,
            location: params.location,
            availability: availability.unwrap_or("all").to_string(),
        },
    }))
}

#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub success: bool,
    pub msg: String,
    pub data: Vec<String>,
    pub count: usize,
}

pub async fn locations(
    State(state): State<AppState>,
) -> Result<Json<LocationsResponse>, AppError> {
    let data = store::distinct_locations(&state.pool).await?;
    let count = data.len();
    Ok(Json(LocationsResponse {
        success: true,
        msg: "Locations retrieved successfully".to_string(),
        data,
        count,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentStats {
    pub total: i64,
    pub available: i64,
    pub on_hire: i64,
    pub locations: i64,
    pub types: i64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub msg: String,
    pub data: EquipmentStats,
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let row = store::equipment_stats(&state.pool).await?;
    Ok(Json(StatsResponse {
        success: true,
        msg: "Equipment statistics retrieved successfully".to_string(),
        data: EquipmentStats {
            total: row.total,
            available: row.available,
            on_hire: row.on_hire,
            locations: row.locations,
            types: row.types,
        },
    }))
}

#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub success: bool,
    pub msg: String,
    pub data: EquipmentListing,
}

pub async fn by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DetailResponse>, AppError> {
    let row = store::equipment_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound("Equipment not found"))?;
    Ok(Json(DetailResponse {
        success: true,
        msg: "Equipment retrieved successfully".to_string(),
        data: row.into(),
    }))
}
