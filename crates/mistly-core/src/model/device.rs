use serde::{Deserialize, Serialize};

use super::cell;

/// An inventory or site device.
///
/// Unassigned inventory entries carry `site_id: null` or omit it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Device {
    #[serde(deserialize_with = "cell")]
    pub name: String,
    #[serde(deserialize_with = "cell")]
    pub model: String,
    #[serde(rename = "type", deserialize_with = "cell")]
    pub device_type: String,
    #[serde(deserialize_with = "cell")]
    pub serial: String,
    #[serde(default)]
    pub site_id: Option<String>,
}

impl Device {
    pub const AP: &'static str = "ap";

    pub fn is_ap(&self) -> bool {
        self.device_type == Self::AP
    }
}
