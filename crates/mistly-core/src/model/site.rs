use serde::{Deserialize, Serialize};

/// A site as listed by `GET /orgs/{org_id}/sites`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Site {
    pub id: String,
    #[serde(deserialize_with = "super::cell")]
    pub name: String,
}
