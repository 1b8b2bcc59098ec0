use serde::{Deserialize, Serialize};

use super::cell;

/// Envelope returned by the client session search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSearch {
    pub results: Vec<ClientSession>,
}

/// A single wireless client session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientSession {
    #[serde(deserialize_with = "cell")]
    pub client_manufacture: String,
    #[serde(deserialize_with = "cell")]
    pub client_family: String,
    #[serde(deserialize_with = "cell")]
    pub client_model: String,
    #[serde(deserialize_with = "cell")]
    pub client_os: String,
    pub mac: String,
    #[serde(deserialize_with = "cell")]
    pub band: String,
}
