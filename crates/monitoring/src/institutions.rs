use chrono::{DateTime, Utc};
use model::{
    child::Child, geofence::GeoPolygon, institution::Institution, WithId,
};
use serde::{Deserialize, Serialize};
use utility::id::Id;

use crate::{client::ApiClient, session::TokenStore, ApiResult};

/// Payload for creating an institution. The drawn area should already be a
/// closed ring with at least 3 distinct points, see
/// [`GeoPolygon::has_valid_area`].
#[derive(Debug, Clone, Serialize)]
pub struct InstitutionDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion")]
    pub address: String,
    pub area: GeoPolygon,
}

/// Partial update; absent fields are left untouched by the backend.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstitutionPatch {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "direccion")]
    pub address: Option<String>,
    pub area: Option<GeoPolygon>,
}

/// The list endpoint answers either with a plain array or, depending on the
/// backend's geographic serializer, with a GeoJSON FeatureCollection.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstitutionsReply {
    Features(FeatureCollection),
    Plain(Vec<WithId<Institution>>),
}

impl InstitutionsReply {
    fn into_institutions(self) -> Vec<WithId<Institution>> {
        match self {
            InstitutionsReply::Features(collection) => collection
                .features
                .into_iter()
                .map(Into::into)
                .collect(),
            InstitutionsReply::Plain(institutions) => institutions,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    id: i64,
    geometry: GeoPolygon,
    properties: FeatureProperties,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    nombre: String,
    direccion: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<Feature> for WithId<Institution> {
    fn from(feature: Feature) -> Self {
        // Feature properties do not always carry timestamps.
        let now = Utc::now();
        WithId::new(
            Id::new(feature.id),
            Institution {
                name: feature.properties.nombre,
                address: feature.properties.direccion,
                area: feature.geometry,
                created_at: feature.properties.created_at.unwrap_or(now),
                updated_at: feature.properties.updated_at.unwrap_or(now),
            },
        )
    }
}

impl<S> ApiClient<S>
where
    S: TokenStore,
{
    pub async fn institutions(&self) -> ApiResult<Vec<WithId<Institution>>> {
        let reply: InstitutionsReply =
            self.get("/monitoreo/instituciones/").await?;
        Ok(reply.into_institutions())
    }

    pub async fn institution(
        &self,
        id: Id<Institution>,
    ) -> ApiResult<WithId<Institution>> {
        self.get(&format!("/monitoreo/instituciones/{}/", id)).await
    }

    pub async fn create_institution(
        &self,
        draft: &InstitutionDraft,
    ) -> ApiResult<WithId<Institution>> {
        self.post("/monitoreo/instituciones/", draft).await
    }

    pub async fn update_institution(
        &self,
        id: Id<Institution>,
        patch: &InstitutionPatch,
    ) -> ApiResult<WithId<Institution>> {
        self.put(&format!("/monitoreo/instituciones/{}/", id), patch)
            .await
    }

    pub async fn delete_institution(&self, id: Id<Institution>) -> ApiResult<()> {
        self.delete(&format!("/monitoreo/instituciones/{}/", id))
            .await
    }

    pub async fn institution_children(
        &self,
        id: Id<Institution>,
    ) -> ApiResult<Vec<WithId<Child>>> {
        self.get(&format!("/monitoreo/instituciones/{}/ninos/", id))
            .await
    }
}
