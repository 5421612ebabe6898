use std::fmt;

/// An error raised while building a router.
///
/// Matching itself cannot fail; a request that resolves to nothing is a
/// normal [`None`](crate::Router::route) outcome. `Error` is reserved for
/// broken configuration: a name template without a placeholder, metadata
/// that could never be bound, or a request target that is not a URI.
pub struct Error {
    kind: ErrorKind,
}

pub(crate) enum ErrorKind {
    Template(String),
    Target(http::uri::InvalidUri),
    Query(serde_urlencoded::de::Error),
    EmptyMethodName,
    DuplicateMethod(&'static str),
    DuplicateParam(&'static str, &'static str),
    VariadicNotLast(&'static str, &'static str),
    DuplicateController(String),
}

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    pub(crate) fn template(template: &str) -> Self {
        Self::new(ErrorKind::Template(template.to_owned()))
    }

    pub(crate) fn duplicate_controller(name: &str) -> Self {
        Self::new(ErrorKind::DuplicateController(name.to_owned()))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Template(template) => {
                write!(f, "controller name template '{}' has no '{{}}'", template)
            }
            ErrorKind::Target(err) => write!(f, "invalid request target: {}", err),
            ErrorKind::Query(err) => write!(f, "failed to parse query string: {}", err),
            ErrorKind::EmptyMethodName => write!(f, "method name is empty"),
            ErrorKind::DuplicateMethod(name) => write!(f, "duplicate method '{}'", name),
            ErrorKind::DuplicateParam(method, param) => {
                write!(f, "duplicate parameter '{}' on method '{}'", param, method)
            }
            ErrorKind::VariadicNotLast(method, param) => write!(
                f,
                "variadic parameter '{}' on method '{}' must be last",
                param, method
            ),
            ErrorKind::DuplicateController(name) => {
                write!(f, "controller '{}' is already registered", name)
            }
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl std::error::Error for Error {}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::new(ErrorKind::Target(err))
    }
}

impl From<serde_urlencoded::de::Error> for Error {
    fn from(err: serde_urlencoded::de::Error) -> Self {
        Self::new(ErrorKind::Query(err))
    }
}
