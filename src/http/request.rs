use super::Method;
use crate::error::Error;

use std::collections::HashMap;

use ::http::Uri;

/// An HTTP request descriptor.
///
/// Holds the parts of a request that routing looks at: the method, the path
/// broken into segments, and the parsed query string. The body, headers, and
/// everything else stay with the hosting server. A `Request` is immutable
/// once constructed and is only ever read during a match.
#[derive(Debug, Default, PartialEq)]
pub struct Request {
    method: Method,
    segments: Vec<String>,
    query: HashMap<String, String>,
}

impl Request {
    /// Parse a request descriptor from a method and a request target such as
    /// `/discussions/recent?after=1`.
    ///
    /// Empty path segments are dropped, so `/discussions/` and `/discussions`
    /// describe the same path. Fails if the target is not a valid URI or the
    /// query string cannot be parsed.
    pub fn new(method: Method, target: &str) -> Result<Self, Error> {
        let uri: Uri = target.parse()?;

        let segments = uri
            .path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect();

        let query = match uri.query() {
            Some(query) => serde_urlencoded::from_str(query)?,
            None => HashMap::new(),
        };

        Ok(Self {
            method,
            segments,
            query,
        })
    }

    /// The request's method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The request's path segments, in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The request's query parameters.
    pub fn query(&self) -> &HashMap<String, String> {
        &self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments() {
        let req = Request::new(Method::Get, "/discussions/123/help").unwrap();
        assert_eq!(req.segments(), ["discussions", "123", "help"]);
        assert!(req.query().is_empty());
    }

    #[test]
    fn empty_segments_dropped() {
        let req = Request::new(Method::Get, "/discussions//123/").unwrap();
        assert_eq!(req.segments(), ["discussions", "123"]);

        let root = Request::new(Method::Get, "/").unwrap();
        assert!(root.segments().is_empty());
    }

    #[test]
    fn query() {
        let req = Request::new(Method::Get, "/discussions/recent?after=1&tag=rust").unwrap();
        assert_eq!(req.query().get("after").map(String::as_str), Some("1"));
        assert_eq!(req.query().get("tag").map(String::as_str), Some("rust"));
    }

    #[test]
    fn invalid_target() {
        assert!(Request::new(Method::Get, "").is_err());
    }
}
