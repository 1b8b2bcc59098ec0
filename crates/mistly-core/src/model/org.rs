use serde::{Deserialize, Serialize};

use super::cell;

/// `GET /orgs/{org_id}/stats`, trimmed to what `org summary` prints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrgStats {
    #[serde(deserialize_with = "cell")]
    pub name: String,
    pub num_inventory: u64,
    pub num_devices: u64,
    pub num_devices_connected: u64,
    pub num_devices_disconnected: u64,
    pub num_sites: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Wlan {
    #[serde(deserialize_with = "cell")]
    pub ssid: String,
}

/// The account behind the token (`GET /self`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelfInfo {
    #[serde(deserialize_with = "cell")]
    pub first_name: String,
    #[serde(deserialize_with = "cell")]
    pub last_name: String,
    #[serde(deserialize_with = "cell")]
    pub email: String,
}
