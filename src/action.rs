use crate::controller::Controller;
use crate::http::Request;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A successfully matched route.
///
/// Pairs the controller instance constructed for the match with the resolved
/// method name and its fully bound arguments. The router never invokes the
/// method itself; a dispatcher takes the action apart and performs the call.
pub struct Action<'req> {
    controller: Arc<dyn Controller>,
    method: &'static str,
    args: Args<'req>,
}

impl<'req> Action<'req> {
    pub(crate) fn new(
        controller: Arc<dyn Controller>,
        method: &'static str,
        args: Args<'req>,
    ) -> Self {
        Self {
            controller,
            method,
            args,
        }
    }

    /// The controller instance the method is called on.
    pub fn controller(&self) -> &Arc<dyn Controller> {
        &self.controller
    }

    /// The resolved method name.
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// The bound arguments, in parameter declaration order.
    pub fn args(&self) -> &Args<'req> {
        &self.args
    }

    /// Take the action apart for dispatch.
    pub fn into_parts(self) -> (Arc<dyn Controller>, &'static str, Args<'req>) {
        (self.controller, self.method, self.args)
    }
}

/// Bound handler arguments, keyed by parameter name.
///
/// Iteration order is parameter declaration order.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct Args<'req>(Vec<(&'static str, Value<'req>)>);

impl<'req> Args<'req> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub(crate) fn push(&mut self, name: &'static str, value: Value<'req>) {
        self.0.push((name, value));
    }

    /// Look up an argument by parameter name.
    pub fn get(&self, name: &str) -> Option<&Value<'req>> {
        self.0
            .iter()
            .find(|(param, _)| *param == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value<'req>)> {
        self.0.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single bound argument.
#[derive(Clone)]
pub enum Value<'req> {
    /// A path segment, or the empty string for an optional parameter the
    /// path did not fill.
    Segment(&'req str),
    /// The remaining path segments captured by a variadic parameter.
    Tail(Vec<&'req str>),
    /// The request's query-parameter map.
    Query(&'req HashMap<String, String>),
    /// The request descriptor itself.
    Request(&'req Request),
    /// The controller instance handling the match.
    Controller(Arc<dyn Controller>),
}

impl<'req> Value<'req> {
    /// The segment value, if this argument was bound from the path.
    pub fn as_str(&self) -> Option<&'req str> {
        match self {
            Value::Segment(segment) => Some(segment),
            _ => None,
        }
    }
}

// Arguments from two matches over equivalent requests compare equal, so
// segment, tail, and query values compare structurally. The injected request
// and controller compare by identity within one match.
impl<'req> PartialEq for Value<'req> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Segment(a), Value::Segment(b)) => a == b,
            (Value::Tail(a), Value::Tail(b)) => a == b,
            (Value::Query(a), Value::Query(b)) => a == b,
            (Value::Request(a), Value::Request(b)) => a == b,
            (Value::Controller(a), Value::Controller(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<'req> fmt::Debug for Value<'req> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Segment(segment) => f.debug_tuple("Segment").field(segment).finish(),
            Value::Tail(segments) => f.debug_tuple("Tail").field(segments).finish(),
            Value::Query(query) => f.debug_tuple("Query").field(query).finish(),
            Value::Request(_) => f.write_str("Request(..)"),
            Value::Controller(_) => f.write_str("Controller(..)"),
        }
    }
}
