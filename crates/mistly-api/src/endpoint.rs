// REST endpoints used by mistly, relative to `{base}/api/v1/`.

/// A Mist API v1 resource path.
///
/// Identifiers are pushed as individual path segments, so they are
/// percent-encoded and cannot escape their position in the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `self`: the identity behind the token.
    SelfInfo,
    /// `self/apitokens`
    ApiTokens,
    /// `self/apitokens/{token_id}`
    ApiToken(&'a str),
    /// `orgs/{org_id}/sites`
    OrgSites(&'a str),
    /// `orgs/{org_id}/inventory`
    OrgInventory(&'a str),
    /// `orgs/{org_id}/wlans`
    OrgWlans(&'a str),
    /// `orgs/{org_id}/stats`
    OrgStats(&'a str),
    /// `sites/{site_id}/devices`
    SiteDevices(&'a str),
    /// `sites/{site_id}/clients/sessions/search`
    SiteClientSessionSearch(&'a str),
}

impl<'a> Endpoint<'a> {
    /// Path segments below `api/v1`.
    pub fn segments(&self) -> Vec<&'a str> {
        match *self {
            Self::SelfInfo => vec!["self"],
            Self::ApiTokens => vec!["self", "apitokens"],
            Self::ApiToken(id) => vec!["self", "apitokens", id],
            Self::OrgSites(org) => vec!["orgs", org, "sites"],
            Self::OrgInventory(org) => vec!["orgs", org, "inventory"],
            Self::OrgWlans(org) => vec!["orgs", org, "wlans"],
            Self::OrgStats(org) => vec!["orgs", org, "stats"],
            Self::SiteDevices(site) => vec!["sites", site, "devices"],
            Self::SiteClientSessionSearch(site) => {
                vec!["sites", site, "clients", "sessions", "search"]
            }
        }
    }
}
