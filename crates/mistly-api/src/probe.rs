// Connectivity probes for `mistly check`.
//
// These run before a token is known to work, so they use short fixed
// timeouts and plain, unauthenticated clients.

use std::net::IpAddr;
use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Resolve the API host name. Returns at least one address on success.
pub async fn resolve_host(host: &str) -> Result<Vec<IpAddr>, Error> {
    debug!(host, "resolving");
    let addrs = tokio::net::lookup_host((host, 443))
        .await
        .map_err(|source| Error::Dns {
            host: host.to_owned(),
            source,
        })?;
    Ok(addrs.map(|a| a.ip()).collect())
}

/// GET the base URL and report whatever status comes back.
///
/// Any HTTP answer counts as reachable; only transport failures are errors.
pub async fn reachable(base_url: &Url, timeout: Duration) -> Result<StatusCode, Error> {
    let http = TransportConfig::default()
        .with_timeout(timeout)
        .build_client()?;
    debug!(%base_url, ?timeout, "probing");
    let resp = http.get(base_url.clone()).send().await?;
    Ok(resp.status())
}
