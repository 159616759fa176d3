//! Row types that don't map one-to-one onto `foundit_types` models, plus the
//! column parsing shared by every query.

use chrono::{DateTime, NaiveDateTime, Utc};
use foundit_types::api::{ItemSummary, SeekerProfile};
use foundit_types::models::{Claim, Question};
use rusqlite::types::Type;
use uuid::Uuid;

pub struct CredentialRow {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

/// Editable item fields, shared by insert and update.
#[derive(Debug, Clone)]
pub struct ItemFields {
    pub title: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub questions: Vec<Question>,
}

/// A claim joined with the seeker's profile, for the founder dashboard.
pub struct ApplicantRow {
    pub claim: Claim,
    pub seeker_profile: Option<SeekerProfile>,
}

/// A claim joined with its item, for the seeker's claim list.
pub struct SeekerClaimRow {
    pub claim: Claim,
    pub item: ItemSummary,
}

pub(crate) fn conversion_error(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

pub(crate) fn uuid_col(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|e| conversion_error(idx, e))
}

pub(crate) fn opt_uuid_col(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Option<Uuid>> {
    row.get::<_, Option<String>>(idx)?
        .map(|raw| raw.parse().map_err(|e| conversion_error(idx, e)))
        .transpose()
}

pub(crate) fn json_col<T: serde::de::DeserializeOwned>(
    row: &rusqlite::Row<'_>,
    idx: usize,
) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw).map_err(|e| conversion_error(idx, e))
}

pub(crate) fn parsed_col<T>(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e: String| conversion_error(idx, std::io::Error::other(e)))
}

pub(crate) fn timestamp_col(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // Rows written by hand (sqlite3 shell) use datetime('now') without a zone.
            NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .map_err(|e| conversion_error(idx, e))
}
