use std::fmt::Debug;

use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
pub use serde_with;
use utility::id::{HasId, Id};

pub mod child;
pub mod geofence;
pub mod institution;
pub mod user;

/// An entity together with the id the backend assigned to it. Responses
/// carry the id inline, hence the flatten.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WithId<V>
where
    V: HasId,
    V::IdType: Serialize + DeserializeOwned + Debug + Clone,
{
    pub id: Id<V>,
    #[serde(flatten)]
    pub content: V,
}

impl<V> WithId<V>
where
    V: HasId,
    V::IdType: Serialize + DeserializeOwned + Debug + Clone,
{
    pub fn new(id: Id<V>, content: V) -> Self {
        Self { id, content }
    }
}
