// ── Typed views over Mist payloads ──
//
// Only the fields a report or command reads are modelled; everything else
// in the payload is ignored. Fields copied into report cells go through
// `cell`, which requires the key to be present but renders `null` as an
// empty cell and numbers or booleans as their JSON text.

mod client;
mod device;
mod org;
mod site;
mod token;

pub use client::{ClientSession, SessionSearch};
pub use device::Device;
pub use org::{OrgStats, SelfInfo, Wlan};
pub use site::Site;
pub use token::ApiToken;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::CoreError;

/// Decode a raw facade result into a typed view.
///
/// `what` names the payload in the error message, e.g. `"inventory"`.
pub fn decode<T: DeserializeOwned>(what: &'static str, value: Value) -> Result<T, CoreError> {
    serde_json::from_value(value).map_err(|e| CoreError::Decode {
        what,
        message: e.to_string(),
    })
}

pub(crate) fn cell<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn decode_names_the_payload() {
        let err = decode::<Vec<Site>>("site list", json!({ "oops": true })).unwrap_err();
        assert!(
            err.to_string().starts_with("Unexpected site list payload"),
            "{err}"
        );
    }

    #[test]
    fn cell_renders_scalars() {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(deserialize_with = "cell")]
            v: String,
        }
        let render = |v: Value| decode::<Probe>("probe", json!({ "v": v })).unwrap().v;

        assert_eq!(render(json!("x")), "x");
        assert_eq!(render(Value::Null), "");
        assert_eq!(render(json!(5)), "5");
        assert_eq!(render(json!(true)), "true");
    }

    #[test]
    fn cell_field_must_be_present() {
        #[derive(Debug, Deserialize)]
        struct Probe {
            #[serde(deserialize_with = "cell")]
            #[allow(dead_code)]
            v: String,
        }
        let err = decode::<Probe>("probe", json!({})).unwrap_err();
        assert!(err.to_string().contains("missing field `v`"), "{err}");
    }
}
