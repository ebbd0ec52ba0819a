// Backend response types
//
// Wire shapes for the bulb backend. Every list-returning endpoint answers
// either `{ "bulbs": [...] }` or `{ "error": "..." }`; the envelope is
// decoded into an enum so the two cases never hide behind an
// optional field.

use serde::{Deserialize, Serialize};

// ── Bulb record ──────────────────────────────────────────────────────

/// A bulb as stored and reported by the backend.
///
/// `state` is a tri-state: negative = unreachable, zero = off,
/// positive = on. `scene_id`/`scene` are only meaningful while on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulbRecord {
    pub ip: String,
    #[serde(default)]
    pub name: Option<String>,
    pub state: i32,
    #[serde(default)]
    pub scene_id: Option<i32>,
    #[serde(default)]
    pub scene: Option<String>,
}

// ── Response envelope ────────────────────────────────────────────────

/// Envelope returned by load, scan, action, and rename endpoints.
///
/// ```json
/// { "bulbs": [ { "ip": "10.0.0.7", "name": "Desk", "state": 1, ... } ] }
/// { "error": "Cannot on 'all': timeout" }
/// ```
///
/// A non-empty `error` is a failure even when `bulbs` is present. A null
/// or empty `error` counts as absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawBulbsResponse")]
pub enum BulbsResponse {
    Error { error: String },
    Bulbs { bulbs: Vec<BulbRecord> },
}

#[derive(Deserialize)]
struct RawBulbsResponse {
    #[serde(default)]
    bulbs: Option<Vec<BulbRecord>>,
    #[serde(default)]
    error: Option<String>,
}

impl TryFrom<RawBulbsResponse> for BulbsResponse {
    type Error = String;

    fn try_from(raw: RawBulbsResponse) -> Result<Self, <Self as TryFrom<RawBulbsResponse>>::Error> {
        match (raw.error.filter(|e| !e.is_empty()), raw.bulbs) {
            (Some(error), _) => Ok(Self::Error { error }),
            (None, Some(bulbs)) => Ok(Self::Bulbs { bulbs }),
            (None, None) => Err("missing field `bulbs`".into()),
        }
    }
}

impl BulbsResponse {
    /// Collapse the envelope into the bulb list or an application error.
    pub fn into_result(self) -> Result<Vec<BulbRecord>, crate::Error> {
        match self {
            Self::Bulbs { bulbs } => Ok(bulbs),
            Self::Error { error } => Err(crate::Error::Application { message: error }),
        }
    }
}
