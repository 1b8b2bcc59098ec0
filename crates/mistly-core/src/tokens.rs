// ── API token management ──
//
// Listings only expose masked keys, so the token in use is found by masking
// our own key the same way and comparing.

use mistly_api::{Access, Endpoint, MistClient, ReadWrite};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::model::{ApiToken, decode};

const MASK_EDGE: usize = 4;

/// Mask a key as `first4...last4`, the way token listings display it.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let head: String = chars.iter().take(MASK_EDGE).collect();
    let tail: String = chars
        .iter()
        .skip(chars.len().saturating_sub(MASK_EDGE))
        .collect();
    format!("{head}...{tail}")
}

/// Which tokens a tidy would keep and delete.
#[derive(Debug, Clone, PartialEq)]
pub struct TidyPlan {
    pub keep: Option<ApiToken>,
    pub delete: Vec<ApiToken>,
}

impl TidyPlan {
    pub fn is_noop(&self) -> bool {
        self.delete.is_empty()
    }
}

/// Decide which tokens to delete, keeping the one in use.
///
/// Zero or one token is a no-op. With more, exactly one listing must match
/// the masked current key; otherwise nothing is planned and
/// [`CoreError::UnidentifiedToken`] is returned.
pub fn plan_tidy(mut tokens: Vec<ApiToken>, current: &SecretString) -> Result<TidyPlan, CoreError> {
    if tokens.len() <= 1 {
        return Ok(TidyPlan {
            keep: tokens.pop(),
            delete: Vec::new(),
        });
    }

    let masked = mask_key(current.expose_secret());
    let mut matches = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.key == masked)
        .map(|(i, _)| i);

    match (matches.next(), matches.next()) {
        (Some(idx), None) => {
            let keep = tokens.remove(idx);
            Ok(TidyPlan {
                keep: Some(keep),
                delete: tokens,
            })
        }
        (first, _) => {
            if first.is_some() {
                warn!(%masked, "several tokens share the masked key");
            }
            Err(CoreError::UnidentifiedToken {
                masked,
                count: tokens.len(),
            })
        }
    }
}

// ── API calls ───────────────────────────────────────────────────────

pub async fn list_tokens<A: Access>(client: &MistClient<A>) -> Result<Vec<ApiToken>, CoreError> {
    let url = client.url(Endpoint::ApiTokens)?;
    decode("token list", client.read(url).await?)
}

/// Create a token. The response carries the full key, shown only once.
pub async fn create_token(client: &MistClient<ReadWrite>) -> Result<ApiToken, CoreError> {
    let url = client.url(Endpoint::ApiTokens)?;
    let token: ApiToken = decode("token", client.create(url, None).await?)?;
    info!(id = %token.id, "token created");
    Ok(token)
}

pub async fn delete_token(client: &MistClient<ReadWrite>, id: &str) -> Result<Value, CoreError> {
    let url = client.url(Endpoint::ApiToken(id))?;
    let value = client.delete(url).await?;
    info!(id, "token deleted");
    Ok(value)
}

/// Delete every token in the plan, one at a time. Stops at the first failure.
///
/// Returns the ids deleted.
pub async fn execute_tidy(
    client: &MistClient<ReadWrite>,
    plan: &TidyPlan,
) -> Result<Vec<String>, CoreError> {
    let mut deleted = Vec::with_capacity(plan.delete.len());
    for token in &plan.delete {
        delete_token(client, &token.id).await?;
        deleted.push(token.id.clone());
    }
    Ok(deleted)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tok(id: &str, key: &str) -> ApiToken {
        ApiToken {
            id: id.into(),
            key: key.into(),
            name: None,
            created_time: None,
            last_used: None,
        }
    }

    fn current() -> SecretString {
        SecretString::from("abcd1234567890wxyz")
    }

    #[test]
    fn mask_uses_four_chars_each_side() {
        assert_eq!(mask_key("abcd1234567890wxyz"), "abcd...wxyz");
        assert_eq!(mask_key("abc"), "abc...abc");
        assert_eq!(mask_key(""), "...");
    }

    #[test]
    fn single_token_is_noop() {
        let plan = plan_tidy(vec![tok("t1", "zzzz...zzzz")], &current()).unwrap();
        assert!(plan.is_noop());
        assert_eq!(plan.keep.unwrap().id, "t1");

        let plan = plan_tidy(Vec::new(), &current()).unwrap();
        assert_eq!(plan.keep, None);
    }

    #[test]
    fn keeps_current_and_deletes_rest() {
        let plan = plan_tidy(
            vec![
                tok("t1", "aaaa...aaaa"),
                tok("t2", "abcd...wxyz"),
                tok("t3", "bbbb...bbbb"),
            ],
            &current(),
        )
        .unwrap();

        assert_eq!(plan.keep.unwrap().id, "t2");
        let ids: Vec<&str> = plan.delete.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t3"]);
    }

    #[test]
    fn refuses_when_current_not_listed() {
        let err = plan_tidy(
            vec![tok("t1", "aaaa...aaaa"), tok("t2", "bbbb...bbbb")],
            &current(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::UnidentifiedToken { count: 2, .. }));
    }

    #[test]
    fn refuses_when_mask_is_ambiguous() {
        let err = plan_tidy(
            vec![tok("t1", "abcd...wxyz"), tok("t2", "abcd...wxyz")],
            &current(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::UnidentifiedToken { .. }));
    }
}
