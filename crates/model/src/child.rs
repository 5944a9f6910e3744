use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{geofence::MapPoint, institution::Institution, user::User};

/// A monitored child and the latest location report of its device.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Child {
    #[serde(rename = "nombre")]
    pub name: String,
    pub device_id: String,
    #[serde(rename = "tutor")]
    pub guardian: Id<User>,
    #[serde(rename = "institucion")]
    pub institution: Id<Institution>,
    #[serde(rename = "activo")]
    pub active: bool,
    pub last_status: String,
    #[serde(rename = "ultima_ubicacion")]
    pub last_location: Option<MapPoint>,
    #[serde(rename = "ultima_actualizacion")]
    pub last_seen: DateTime<Utc>,
}

impl Child {
    pub fn latitude(&self) -> Option<f64> {
        self.last_location.map(|location| location.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.last_location.map(|location| location.longitude)
    }
}

impl HasId for Child {
    type IdType = i64;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::WithId;

    use super::*;

    #[test]
    fn decodes_a_backend_child() {
        let child: WithId<Child> = serde_json::from_value(json!({
            "id": 12,
            "nombre": "Luis",
            "device_id": "dev-0042",
            "tutor": 3,
            "institucion": 7,
            "activo": true,
            "last_status": "dentro",
            "ultima_ubicacion": { "lat": -17.785, "lng": -63.185 },
            "ultima_actualizacion": "2025-03-02T13:45:00Z",
        }))
        .unwrap();
        assert_eq!(child.id.raw(), 12);
        assert_eq!(child.content.guardian.raw(), 3);
        assert_eq!(child.content.latitude(), Some(-17.785));
    }

    #[test]
    fn location_may_be_missing() {
        let child: WithId<Child> = serde_json::from_value(json!({
            "id": 13,
            "nombre": "Ana",
            "device_id": "dev-0043",
            "tutor": 3,
            "institucion": 7,
            "activo": false,
            "last_status": "sin señal",
            "ultima_ubicacion": null,
            "ultima_actualizacion": "2025-03-02T13:45:00Z",
        }))
        .unwrap();
        assert_eq!(child.content.latitude(), None);
    }
}
