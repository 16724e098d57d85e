//! Defensive decoding of stored media-URL lists.
//!
//! Listings keep their image / certificate URLs as a JSON-serialized array
//! in a text column. The column may be absent, empty, or corrupted; none of
//! those conditions may surface to the caller, so the decode result is an
//! explicit tagged union rather than a bare `Vec`.

use tracing::warn;

/// Decoded state of a stored media list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredMedia {
    /// Column missing or blank.
    Absent,
    /// Present but not a valid JSON array of strings.
    Malformed,
    /// Successfully decoded URL list (possibly empty).
    List(Vec<String>),
}

impl StoredMedia {
    /// Decode a raw column value. Never fails.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Absent,
            Some(s) if s.trim().is_empty() => Self::Absent,
            Some(s) => match serde_json::from_str::<Vec<String>>(s) {
                Ok(urls) => Self::List(urls),
                Err(_) => Self::Malformed,
            },
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed)
    }

    /// Collapse to a URL list, degrading `Absent` and `Malformed` to empty.
    /// Malformed input is logged with the given record context.
    pub fn into_urls(self, record: i64) -> Vec<String> {
        match self {
            Self::List(urls) => urls,
            Self::Absent => Vec::new(),
            Self::Malformed => {
                warn!(record, "stored media list is not a JSON string array, dropping");
                Vec::new()
            }
        }
    }
}
