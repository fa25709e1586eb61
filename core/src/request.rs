//! Inbound request context.
//!
//! Strategies and URL generators read the current request for base-URI and
//! route-match context. The generator passes it through untouched.

use crate::Params;
use std::collections::HashMap;

/// Result of routing the inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMatch {
    name: String,
    params: Params,
}

impl RouteMatch {
    /// Create a route match.
    pub fn new(name: impl Into<String>, params: Params) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// Name of the matched route.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameters captured by the route.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }
}

/// HTTP request context.
#[derive(Debug, Clone, Default)]
pub struct Request {
    method: String,
    scheme: String,
    authority: String,
    path: String,
    headers: HashMap<String, String>,
    query_params: HashMap<String, String>,
    route_match: Option<RouteMatch>,
}

impl Request {
    /// Create a builder for `Request`.
    #[must_use]
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    /// Get the HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Get the URI scheme (empty when unknown).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Get the authority, `host[:port]` (empty when unknown).
    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Get the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// `scheme://authority`, or an empty string when either part is unknown.
    #[must_use]
    pub fn base_uri(&self) -> String {
        if self.scheme.is_empty() || self.authority.is_empty() {
            String::new()
        } else {
            format!("{}://{}", self.scheme, self.authority)
        }
    }

    /// Get a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Get a query parameter by name.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
    }

    /// The route match, if the request has been routed.
    #[must_use]
    pub fn route_match(&self) -> Option<&RouteMatch> {
        self.route_match.as_ref()
    }
}

/// Builder for `Request`.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    /// Set the HTTP method.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.request.method = method.into();
        self
    }

    /// Set the URI scheme.
    #[must_use]
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.request.scheme = scheme.into();
        self
    }

    /// Set the authority.
    #[must_use]
    pub fn authority(mut self, authority: impl Into<String>) -> Self {
        self.request.authority = authority.into();
        self
    }

    /// Set the request path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.request.path = path.into();
        self
    }

    /// Add a header (name is lowercased for case-insensitive lookup).
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request
            .headers
            .insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Add a query parameter.
    #[must_use]
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query_params.insert(name.into(), value.into());
        self
    }

    /// Record the route the request matched.
    #[must_use]
    pub fn route_match(mut self, name: impl Into<String>, params: Params) -> Self {
        self.request.route_match = Some(RouteMatch::new(name, params));
        self
    }

    /// Build the `Request`.
    #[must_use]
    pub fn build(self) -> Request {
        self.request
    }
}
