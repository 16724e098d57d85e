//! Postgres access: pool setup, row types, and the parameterized queries
//! behind each endpoint. SQL text is assembled from the shared
//! [`SearchQuery`] builder; every caller-supplied value is bound, never
//! concatenated.

use chrono::{DateTime, NaiveDate, Utc};
use hirelink_core::SearchQuery;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use std::time::Duration;
use tracing::{debug, info};

/// Initializes the connection pool and verifies it with a round trip.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    info!("connecting to Postgres");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(15))
        .connect(database_url)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;
    info!("database connection pool initialized");
    Ok(pool)
}

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

const EQUIPMENT_COLUMNS: &str = "id, user_id, equipment_name, equipment_type, location, \
     contact_person, contact_number, contact_email, availability, description, \
     equipment_images, created_at, updated_at";

#[derive(Debug, Clone, FromRow)]
pub struct EquipmentRow {
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
    pub equipment_images: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn equipment_search_sql(query: &SearchQuery) -> String {
    format!(
        "SELECT {EQUIPMENT_COLUMNS} FROM equipment WHERE is_active = TRUE{} \
         ORDER BY created_at DESC",
        query.and_where()
    )
}

pub async fn search_equipment(
    pool: &PgPool,
    query: &SearchQuery,
) -> Result<Vec<EquipmentRow>, sqlx::Error> {
    let sql = equipment_search_sql(query);
    debug!(%sql, params = ?query.params(), "executing equipment search");
    let mut stmt = sqlx::query_as::<_, EquipmentRow>(&sql);
    for param in query.params() {
        stmt = stmt.bind(param.as_str());
    }
    stmt.fetch_all(pool).await
}

pub async fn equipment_by_id(
    pool: &PgPool,
    id: i64,
) -> Result<Option<EquipmentRow>, sqlx::Error> {
    let sql =
        format!("SELECT {EQUIPMENT_COLUMNS} FROM equipment WHERE id = $1 AND is_active = TRUE");
    sqlx::query_as(&sql).bind(id).fetch_optional(pool).await
}

pub async fn distinct_locations(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT DISTINCT location FROM equipment \
         WHERE is_active = TRUE AND location IS NOT NULL AND location <> '' \
         ORDER BY location ASC",
    )
    .fetch_all(pool)
    .await
}

#[derive(Debug, Clone, Copy, FromRow)]
pub struct EquipmentStatsRow {
    pub total: i64,
    pub available: i64,
    pub on_hire: i64,
    pub locations: i64,
    pub types: i64,
}

pub async fn equipment_stats(pool: &PgPool) -> Result<EquipmentStatsRow, sqlx::Error> {
    sqlx::query_as(
        "SELECT COUNT(*) AS total, \
         COUNT(*) FILTER (WHERE availability = 'available') AS available, \
         COUNT(*) FILTER (WHERE availability = 'on-hire') AS on_hire, \
         COUNT(DISTINCT location) AS locations, \
         COUNT(DISTINCT equipment_type) AS types \
         FROM equipment WHERE is_active = TRUE",
    )
    .fetch_one(pool)
    .await
}

// ---------------------------------------------------------------------------
// Manpower
// ---------------------------------------------------------------------------

const MANPOWER_COLUMNS: &str = "id, user_id, first_name, last_name, email, mobile_number, \
     whatsapp_number, location, job_title, availability_status, available_from, rate, \
     profile_description, profile_photo, cv_path, certificates, created_at";

/// Search results are capped so an unfiltered search cannot dump the whole
/// table; detail lookups are unaffected.
const MANPOWER_SEARCH_LIMIT: u32 = 50;

#[derive(Debug, Clone, FromRow)]
pub struct ManpowerRow {
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
    pub certificates: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn manpower_search_sql(query: &SearchQuery) -> String {
    format!(
        "SELECT {MANPOWER_COLUMNS} FROM manpower_profiles WHERE TRUE{} \
         ORDER BY created_at DESC LIMIT {MANPOWER_SEARCH_LIMIT}",
        query.and_where()
    )
}

pub async fn search_manpower(
    pool: &PgPool,
    query: &SearchQuery,
) -> Result<Vec<ManpowerRow>, sqlx::Error> {
    let sql = manpower_search_sql(query);
    debug!(%sql, params = ?query.params(), "executing manpower search");
    let mut stmt = sqlx::query_as::<_, ManpowerRow>(&sql);
    for param in query.params() {
        stmt = stmt.bind(param.as_str());
    }
    stmt.fetch_all(pool).await
}

pub async fn manpower_by_id(pool: &PgPool, id: i64) -> Result<Option<ManpowerRow>, sqlx::Error> {
    let sql = format!("SELECT {MANPOWER_COLUMNS} FROM manpower_profiles WHERE id = $1");
    sqlx::query_as(&sql).bind(id).fetch_optional(pool).await
}

pub async fn featured_manpower(pool: &PgPool) -> Result<Vec<ManpowerRow>, sqlx::Error> {
    let sql = format!(
        "SELECT {MANPOWER_COLUMNS} FROM manpower_profiles \
         WHERE job_title IS NOT NULL AND job_title <> '' \
         AND availability_status = 'available' \
         ORDER BY created_at DESC LIMIT 3"
    );
    sqlx::query_as(&sql).fetch_all(pool).await
}

/// Job title + description pairs for category bucketing.
pub async fn manpower_profile_texts(
    pool: &PgPool,
) -> Result<Vec<(String, Option<String>)>, sqlx::Error> {
    sqlx::query_as(
        "SELECT job_title, profile_description FROM manpower_profiles \
         WHERE job_title IS NOT NULL AND job_title <> '' \
         ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}

#[derive(Debug, Clone, Copy, FromRow)]
pub struct ManpowerStatsRow {
    pub total_manpower: i64,
    pub manpower_with_cv: i64,
    pub available_manpower: i64,
}

pub async fn manpower_stats(pool: &PgPool) -> Result<ManpowerStatsRow, sqlx::Error> {
    sqlx::query_as(
        "SELECT COUNT(*) AS total_manpower, \
         COUNT(*) FILTER (WHERE cv_path IS NOT NULL) AS manpower_with_cv, \
         COUNT(*) FILTER (WHERE availability_status = 'available') AS available_manpower \
         FROM manpower_profiles",
    )
    .fetch_one(pool)
    .await
}
