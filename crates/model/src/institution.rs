use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::geofence::GeoPolygon;

/// An institution and the geofenced catchment area children are monitored
/// against. Wire field names follow the backend schema.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Institution {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion")]
    pub address: String,
    pub area: GeoPolygon,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HasId for Institution {
    type IdType = i64;
}
