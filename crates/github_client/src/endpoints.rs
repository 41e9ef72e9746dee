//! API endpoint resolution for github.com and GitHub Enterprise Server hosts.

use url::Url;

use crate::Error;

#[cfg(test)]
#[path = "endpoints_tests.rs"]
mod tests;

/// The public GitHub hostname.
pub const GITHUB_COM_HOST: &str = "github.com";

const GITHUB_COM_API_URI: &str = "https://api.github.com";
const ENTERPRISE_REST_PREFIX: &str = "/api/v3";
const ENTERPRISE_GRAPHQL_PATH: &str = "/api/graphql";

/// Where the REST and GraphQL APIs live for a given host.
///
/// github.com serves REST from the root of `api.github.com` and GraphQL at `/graphql`.
/// GitHub Enterprise Server serves both from the instance host, REST under `/api/v3`
/// and GraphQL at `/api/graphql`.
///
/// # Examples
///
/// ```rust
/// use github_client::ApiEndpoints;
///
/// let endpoints = ApiEndpoints::for_host("github.example.com").unwrap();
/// assert_eq!(endpoints.base_uri(), "https://github.example.com");
/// assert_eq!(endpoints.rest_path("/orgs/acme/hooks"), "/api/v3/orgs/acme/hooks");
/// assert_eq!(endpoints.graphql_path(), "/api/graphql");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base_uri: String,
    rest_prefix: String,
    graphql_path: String,
}

impl ApiEndpoints {
    /// Resolves the endpoints for a hostname such as `github.com` or `ghes.example.com`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidHost` if the hostname is empty or cannot form a URL.
    pub fn for_host(hostname: &str) -> Result<Self, Error> {
        let host = hostname.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(Error::InvalidHost(hostname.to_string()));
        }

        if host.eq_ignore_ascii_case(GITHUB_COM_HOST) || host.eq_ignore_ascii_case("api.github.com")
        {
            return Ok(Self::with_base_uri(GITHUB_COM_API_URI));
        }

        let base = Url::parse(&format!("https://{}", host))
            .map_err(|_| Error::InvalidHost(hostname.to_string()))?;
        if base.host_str().is_none() || base.path() != "/" {
            return Err(Error::InvalidHost(hostname.to_string()));
        }

        Ok(Self {
            base_uri: base.as_str().trim_end_matches('/').to_string(),
            rest_prefix: ENTERPRISE_REST_PREFIX.to_string(),
            graphql_path: ENTERPRISE_GRAPHQL_PATH.to_string(),
        })
    }

    /// Builds github.com shaped endpoints (REST at the root, GraphQL at `/graphql`)
    /// against an arbitrary base URI.
    pub fn with_base_uri(base_uri: &str) -> Self {
        Self {
            base_uri: base_uri.trim_end_matches('/').to_string(),
            rest_prefix: String::new(),
            graphql_path: "/graphql".to_string(),
        }
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Prefixes a REST route (starting with `/`) with the host's REST root.
    pub fn rest_path(&self, route: &str) -> String {
        format!("{}{}", self.rest_prefix, route)
    }

    pub fn graphql_path(&self) -> &str {
        &self.graphql_path
    }
}
