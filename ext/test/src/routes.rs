//! Template route table: a small [`UrlGenerator`] for tests and the CLI.
//!
//! Routes are path templates with `{name}` placeholders. Placeholder and
//! query values are percent-encoded:
//!
//! ```
//! use halogen::prelude::*;
//! use halogen_test::RouteTable;
//!
//! let routes = RouteTable::new().route("book", "/books/{id}");
//! let params = Params::from([("id".to_owned(), "7".to_owned())]);
//! let uri = routes.generate(&Request::default(), "book", &params, &Params::new()).unwrap();
//! assert_eq!(uri, "/books/7");
//! ```

use halogen::{HalError, Params, Request, UrlGenerator};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

fn placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

fn parse_template(template: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in placeholder().captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Literal(template[last..whole.start()].to_owned()));
        }
        segments.push(Segment::Param(name.as_str().to_owned()));
        last = whole.end();
    }
    if last < template.len() {
        segments.push(Segment::Literal(template[last..].to_owned()));
    }
    segments
}

/// Named route templates.
///
/// Placeholder values come from the route params, then from the request's
/// route match when it matched the same route. Query params are appended in
/// key order. With [`absolute`](Self::absolute), URIs are prefixed with the
/// request's base URI.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, Vec<Segment>>,
    absolute: bool,
}

impl RouteTable {
    /// Create an empty route table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route (builder pattern).
    #[must_use]
    pub fn route(mut self, name: impl Into<String>, template: &str) -> Self {
        self.routes.insert(name.into(), parse_template(template));
        self
    }

    /// Prefix generated URIs with `scheme://authority` from the request.
    #[must_use]
    pub fn absolute(mut self) -> Self {
        self.absolute = true;
        self
    }

    /// Returns `true` if `name` is a known route.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }
}

impl FromIterator<(String, String)> for RouteTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |table, (name, template)| table.route(name, &template))
    }
}

impl UrlGenerator for RouteTable {
    fn generate(
        &self,
        request: &Request,
        route: &str,
        route_params: &Params,
        query_params: &Params,
    ) -> Result<String, HalError> {
        let segments = self
            .routes
            .get(route)
            .ok_or_else(|| HalError::UrlGeneration {
                route: route.to_owned(),
                reason: "unknown route".into(),
            })?;
        let matched = request
            .route_match()
            .filter(|m| m.name() == route)
            .map(|m| m.params());

        let mut uri = if self.absolute {
            request.base_uri()
        } else {
            String::new()
        };
        for segment in segments {
            match segment {
                Segment::Literal(text) => uri.push_str(text),
                Segment::Param(name) => {
                    let value = route_params
                        .get(name)
                        .or_else(|| matched.and_then(|p| p.get(name)))
                        .ok_or_else(|| HalError::UrlGeneration {
                            route: route.to_owned(),
                            reason: format!("missing route parameter \"{name}\""),
                        })?;
                    uri.push_str(&urlencoding::encode(value));
                }
            }
        }

        let query: Vec<String> = query_params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        if !query.is_empty() {
            uri.push('?');
            uri.push_str(&query.join("&"));
        }
        Ok(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_parse_template() {
        assert_eq!(
            parse_template("/shelves/{shelf}/books/{id}.json"),
            vec![
                Segment::Literal("/shelves/".into()),
                Segment::Param("shelf".into()),
                Segment::Literal("/books/".into()),
                Segment::Param("id".into()),
                Segment::Literal(".json".into()),
            ]
        );
        assert_eq!(parse_template("/static"), vec![Segment::Literal("/static".into())]);
    }

    #[test]
    fn test_generate_with_query() {
        let routes = RouteTable::new().route("books", "/books");
        let uri = routes
            .generate(
                &Request::default(),
                "books",
                &Params::new(),
                &params(&[("page", "2"), ("limit", "10")]),
            )
            .unwrap();
        assert_eq!(uri, "/books?limit=10&page=2");
    }

    #[test]
    fn test_generate_encodes_values() {
        let routes = RouteTable::new().route("tag", "/tags/{name}");
        let uri = routes
            .generate(
                &Request::default(),
                "tag",
                &params(&[("name", "a b")]),
                &params(&[("q", "x&y"), ("sort by", "title")]),
            )
            .unwrap();
        assert_eq!(uri, "/tags/a%20b?q=x%26y&sort%20by=title");
    }

    #[test]
    fn test_unknown_route() {
        let err = RouteTable::new()
            .generate(&Request::default(), "nope", &Params::new(), &Params::new())
            .unwrap_err();
        assert_eq!(
            err,
            HalError::UrlGeneration {
                route: "nope".into(),
                reason: "unknown route".into()
            }
        );
    }

    #[test]
    fn test_missing_param() {
        let routes = RouteTable::new().route("book", "/books/{id}");
        let err = routes
            .generate(&Request::default(), "book", &Params::new(), &Params::new())
            .unwrap_err();
        assert!(err.to_string().contains("missing route parameter \"id\""));
    }

    #[test]
    fn test_reuses_matched_params_for_same_route() {
        let routes = RouteTable::new().route("book", "/shelves/{shelf}/books/{id}");
        let request = Request::builder()
            .route_match("book", params(&[("shelf", "sci-fi"), ("id", "1")]))
            .build();

        let uri = routes
            .generate(&request, "book", &params(&[("id", "9")]), &Params::new())
            .unwrap();
        assert_eq!(uri, "/shelves/sci-fi/books/9");

        let other = Request::builder()
            .route_match("shelf", params(&[("shelf", "sci-fi")]))
            .build();
        assert!(routes
            .generate(&other, "book", &params(&[("id", "9")]), &Params::new())
            .is_err());
    }

    #[test]
    fn test_absolute() {
        let routes = RouteTable::new().route("book", "/books/{id}").absolute();
        let request = Request::builder()
            .scheme("https")
            .authority("api.example.com")
            .build();
        let uri = routes
            .generate(&request, "book", &params(&[("id", "1")]), &Params::new())
            .unwrap();
        assert_eq!(uri, "https://api.example.com/books/1");
    }
}
