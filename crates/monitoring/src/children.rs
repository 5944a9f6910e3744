use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use model::{
    child::Child, geofence::MapPoint, institution::Institution, user::User,
    WithId,
};
use serde::{Deserialize, Serialize};
use utility::id::Id;

use crate::{client::ApiClient, session::TokenStore, ApiResult};

#[derive(Debug, Clone, Serialize)]
pub struct ChildDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    pub device_id: String,
    #[serde(rename = "tutor")]
    pub guardian: Id<User>,
    #[serde(rename = "institucion")]
    pub institution: Id<Institution>,
}

/// Partial update; absent fields are left untouched by the backend.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChildPatch {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    pub device_id: Option<String>,
    #[serde(rename = "tutor")]
    pub guardian: Option<Id<User>>,
    #[serde(rename = "institucion")]
    pub institution: Option<Id<Institution>>,
    #[serde(rename = "activo")]
    pub active: Option<bool>,
}

/// Pairing token for the child's tracking device.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceToken {
    pub child_id: Id<Child>,
    pub device_token: String,
    pub token_created_at: DateTime<Utc>,
    pub message: String,
}

/// Live status row for the guardian's children list.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildStatus {
    pub id: Id<Child>,
    #[serde(rename = "nombre")]
    pub name: String,
    pub device_id: String,
    #[serde(rename = "ultima_ubicacion")]
    pub last_location: MapPoint,
    pub last_status: String,
    #[serde(rename = "ultima_actualizacion")]
    pub last_seen: DateTime<Utc>,
}

/// Everything the guardian map view needs for one child. The institution
/// area arrives already in display point order.
#[derive(Debug, Clone, Deserialize)]
pub struct MapSnapshot {
    #[serde(rename = "nombre_nino")]
    pub child_name: String,
    #[serde(rename = "ultima_actualizacion")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "ubicacion_actual")]
    pub current_location: MapPoint,
    #[serde(rename = "poligono_kinder")]
    pub institution_area: Vec<MapPoint>,
    #[serde(rename = "nombre_kinder")]
    pub institution_name: String,
}

/// One sample from a day's location history.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationFix {
    #[serde(flatten)]
    pub position: MapPoint,
    #[serde(rename = "hora")]
    pub time: NaiveTime,
    #[serde(rename = "bateria")]
    pub battery_percent: u8,
}

/// Condensed per-child row for the unified admin dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardEntry {
    pub id: Id<Child>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "ubicacion_actual")]
    pub current_location: MapPoint,
    #[serde(rename = "ultima_actualizacion")]
    pub last_seen: DateTime<Utc>,
}

impl<S> ApiClient<S>
where
    S: TokenStore,
{
    pub async fn children(&self) -> ApiResult<Vec<WithId<Child>>> {
        self.get("/monitoreo/ninos/").await
    }

    pub async fn child(&self, id: Id<Child>) -> ApiResult<WithId<Child>> {
        self.get(&format!("/monitoreo/ninos/{}/", id)).await
    }

    pub async fn create_child(
        &self,
        draft: &ChildDraft,
    ) -> ApiResult<WithId<Child>> {
        self.post("/monitoreo/ninos/", draft).await
    }

    pub async fn update_child(
        &self,
        id: Id<Child>,
        patch: &ChildPatch,
    ) -> ApiResult<WithId<Child>> {
        self.patch(&format!("/monitoreo/ninos/{}/", id), patch).await
    }

    pub async fn delete_child(&self, id: Id<Child>) -> ApiResult<()> {
        self.delete(&format!("/monitoreo/ninos/{}/", id)).await
    }

    pub async fn device_token(&self, id: Id<Child>) -> ApiResult<DeviceToken> {
        self.get(&format!("/monitoreo/ninos/{}/token/", id)).await
    }

    /// Children of the logged-in guardian, with their latest location.
    pub async fn my_children(&self) -> ApiResult<Vec<ChildStatus>> {
        self.get("/monitoreo/mis-hijos/").await
    }

    pub async fn map_snapshot(&self, device_id: &str) -> ApiResult<MapSnapshot> {
        self.get(&format!("/monitoreo/mapa-padre/?device_id={}", device_id))
            .await
    }

    /// Location history of a device, optionally restricted to one day.
    pub async fn location_history(
        &self,
        device_id: &str,
        date: Option<NaiveDate>,
    ) -> ApiResult<Vec<LocationFix>> {
        let path = match date {
            Some(date) => format!(
                "/monitoreo/historial/{}/?fecha={}",
                device_id,
                date.format("%Y-%m-%d")
            ),
            None => format!("/monitoreo/historial/{}/", device_id),
        };
        self.get(&path).await
    }

    pub async fn dashboard(&self) -> ApiResult<Vec<DashboardEntry>> {
        self.get("/monitoreo/dashboard-unificado/").await
    }
}
