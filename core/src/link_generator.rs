//! Route-aware link construction.
//!
//! [`UrlGenerator`] is the host application's router seam: route name +
//! parameters → URI. [`LinkGenerator`] wraps it into [`Link`] values.

use crate::{HalError, Link, Params, Request};
use std::fmt::Debug;
use std::sync::Arc;

/// Generates URIs from named routes.
pub trait UrlGenerator: Send + Sync + Debug {
    /// Generate the URI of `route`.
    ///
    /// `request` carries the current route match and base URI for
    /// implementations that reuse matched parameters or emit absolute URIs.
    ///
    /// # Errors
    ///
    /// Implementations return [`HalError::UrlGeneration`] for unknown routes
    /// or missing route parameters.
    fn generate(
        &self,
        request: &Request,
        route: &str,
        route_params: &Params,
        query_params: &Params,
    ) -> Result<String, HalError>;
}

/// Builds links from named routes.
#[derive(Debug, Clone)]
pub struct LinkGenerator {
    urls: Arc<dyn UrlGenerator>,
}

impl LinkGenerator {
    /// Wrap a URL generator.
    pub fn new(urls: impl UrlGenerator + 'static) -> Self {
        Self {
            urls: Arc::new(urls),
        }
    }

    /// Wrap a shared URL generator.
    #[must_use]
    pub fn from_arc(urls: Arc<dyn UrlGenerator>) -> Self {
        Self { urls }
    }

    /// Build a link with relation `rel` to `route`.
    ///
    /// # Errors
    ///
    /// Propagates URL generator errors, and [`HalError::InvalidLink`] for an
    /// empty relation.
    pub fn from_route(
        &self,
        rel: &str,
        request: &Request,
        route: &str,
        route_params: &Params,
        query_params: &Params,
    ) -> Result<Link, HalError> {
        let href = self
            .urls
            .generate(request, route, route_params, query_params)?;
        Link::new(rel, href)
    }

    /// Like [`from_route`](Self::from_route), but marks the link as templated.
    ///
    /// # Errors
    ///
    /// Same as [`from_route`](Self::from_route).
    pub fn templated_from_route(
        &self,
        rel: &str,
        request: &Request,
        route: &str,
        route_params: &Params,
        query_params: &Params,
    ) -> Result<Link, HalError> {
        Ok(self
            .from_route(rel, request, route, route_params, query_params)?
            .templated(true))
    }
}
