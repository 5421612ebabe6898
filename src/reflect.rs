//! Controller metadata, built once at registration time.
//!
//! Rust has no runtime reflection, so a controller describes its routable
//! surface up front: every handler method's name and parameter list, plus
//! the names that are explicitly protected. The accessor rules that keep
//! plain `get*`/`set*` methods off the routing table are applied here,
//! once, when the [`Reflection`] is built.

use crate::error::{Error, ErrorKind};

use std::collections::HashSet;

use once_cell::sync::OnceCell;

/// The parameter name that binds the whole query-parameter map.
const QUERY_PARAM: &str = "query";

/// Metadata describing the routable surface of one controller type.
#[derive(Debug)]
pub struct Reflection {
    methods: Vec<Signature>,
    protected: HashSet<&'static str>,
    routable: HashSet<&'static str>,
}

impl Reflection {
    /// Start describing a controller's methods.
    pub fn build() -> ReflectionBuilder {
        ReflectionBuilder {
            methods: Vec::new(),
            protected: HashSet::new(),
        }
    }

    /// Look up a method eligible for routing.
    ///
    /// Protected methods and plain accessors are invisible here, so a
    /// request can never reach them no matter what path it carries.
    pub(crate) fn routable(&self, name: &str) -> Option<&Signature> {
        if !self.routable.contains(name) {
            return None;
        }
        self.methods.iter().find(|sig| sig.name == name)
    }

    /// Whether a method was explicitly marked protected.
    pub fn is_protected(&self, name: &str) -> bool {
        self.protected.contains(name)
    }
}

/// Builds and validates a [`Reflection`].
pub struct ReflectionBuilder {
    methods: Vec<Signature>,
    protected: HashSet<&'static str>,
}

impl ReflectionBuilder {
    /// Add a method signature.
    pub fn method(mut self, signature: Signature) -> Self {
        self.methods.push(signature);
        self
    }

    /// Mark a method as protected. Protected methods are never routable.
    pub fn protect(mut self, name: &'static str) -> Self {
        self.protected.insert(name);
        self
    }

    /// Validate the collected metadata.
    ///
    /// Rejects empty or duplicate method names, duplicate parameter names,
    /// and variadic parameters anywhere but the last position. Anything this
    /// accepts can be bound by the router.
    pub fn finish(self) -> Result<Reflection, Error> {
        let mut seen = HashSet::new();

        for sig in &self.methods {
            if sig.name.is_empty() {
                return Err(Error::new(ErrorKind::EmptyMethodName));
            }
            if !seen.insert(sig.name) {
                return Err(Error::new(ErrorKind::DuplicateMethod(sig.name)));
            }
            sig.validate()?;
        }

        let routable = self
            .methods
            .iter()
            .map(|sig| sig.name)
            .filter(|name| routable_name(name) && !self.protected.contains(name))
            .collect();

        Ok(Reflection {
            methods: self.methods,
            protected: self.protected,
            routable,
        })
    }
}

/// A handler method's name and formal parameter list.
///
/// ```
/// use muster::Signature;
///
/// // fn help(&self, id: &str, parts: &[&str])
/// let sig = Signature::new("help").param("id").rest("parts");
/// # let _ = sig;
/// ```
#[derive(Debug)]
pub struct Signature {
    name: &'static str,
    params: Vec<Param>,
    plan: OnceCell<Box<[Bind]>>,
}

impl Signature {
    /// A method with the given name and no parameters.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            params: Vec::new(),
            plan: OnceCell::new(),
        }
    }

    /// A required positional parameter, bound from the next path segment.
    ///
    /// A parameter named `query` instead binds the whole query-parameter
    /// map.
    pub fn param(self, name: &'static str) -> Self {
        self.push(Param {
            name,
            hint: None,
            variadic: false,
            required: true,
        })
    }

    /// An optional positional parameter: bound from the next path segment,
    /// or to the empty string when the path is exhausted.
    pub fn opt(self, name: &'static str) -> Self {
        self.push(Param {
            name,
            hint: None,
            variadic: false,
            required: false,
        })
    }

    /// A variadic parameter capturing every remaining path segment. Must be
    /// the last parameter.
    pub fn rest(self, name: &'static str) -> Self {
        self.push(Param {
            name,
            hint: None,
            variadic: true,
            required: false,
        })
    }

    /// A parameter declared with the request type; the live request
    /// descriptor is injected.
    pub fn request(self, name: &'static str) -> Self {
        self.push(Param {
            name,
            hint: Some(Hint::Request),
            variadic: false,
            required: false,
        })
    }

    /// A parameter declared with the controller's own type; the controller
    /// instance handling the match is injected.
    pub fn receiver(self, name: &'static str) -> Self {
        self.push(Param {
            name,
            hint: Some(Hint::SelfRef),
            variadic: false,
            required: false,
        })
    }

    fn push(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn params(&self) -> &[Param] {
        &self.params
    }

    /// The binding plan: one [`Bind`] per parameter, computed on first use
    /// and cached for every match after that.
    pub(crate) fn plan(&self) -> &[Bind] {
        self.plan
            .get_or_init(|| self.params.iter().map(Bind::classify).collect())
    }

    fn validate(&self) -> Result<(), Error> {
        let mut names = HashSet::new();
        for (i, param) in self.params.iter().enumerate() {
            if !names.insert(param.name) {
                return Err(Error::new(ErrorKind::DuplicateParam(self.name, param.name)));
            }
            if param.variadic && i != self.params.len() - 1 {
                return Err(Error::new(ErrorKind::VariadicNotLast(self.name, param.name)));
            }
        }
        Ok(())
    }
}

/// A formal parameter: its name, declared-type hint, and shape.
#[derive(Debug)]
pub(crate) struct Param {
    name: &'static str,
    hint: Option<Hint>,
    variadic: bool,
    required: bool,
}

impl Param {
    pub(crate) fn name(&self) -> &'static str {
        self.name
    }
}

/// A declared parameter type the binder recognizes for injection.
#[derive(Debug)]
enum Hint {
    Request,
    SelfRef,
}

/// How one parameter is filled in, decided once per signature.
#[derive(Debug)]
pub(crate) enum Bind {
    /// Inject the live request descriptor.
    Request,
    /// Inject the controller instance handling the match.
    Receiver,
    /// Bind the whole query-parameter map.
    Query,
    /// Capture every remaining path segment.
    Tail,
    /// Consume the next path segment.
    Segment { required: bool },
}

impl Bind {
    fn classify(param: &Param) -> Bind {
        match param.hint {
            Some(Hint::Request) => Bind::Request,
            Some(Hint::SelfRef) => Bind::Receiver,
            None if param.variadic => Bind::Tail,
            None if param.name == QUERY_PARAM => Bind::Query,
            None => Bind::Segment {
                required: param.required,
            },
        }
    }
}

/// Whether `name` is a lowercased HTTP verb.
pub(crate) fn is_verb(name: &str) -> bool {
    matches!(
        name,
        "get" | "put" | "post" | "delete" | "options" | "head" | "trace" | "connect" | "patch"
    )
}

/// Whether `name` has the `{verb}_{word}` shape of a verb-prefixed action,
/// e.g. `get_recent`.
pub(crate) fn is_verb_action(name: &str) -> bool {
    match name.split_once('_') {
        Some((verb, rest)) => is_verb(verb) && !rest.is_empty(),
        None => false,
    }
}

/// The accessor rule: a name beginning with `get` or `set` is only routable
/// when it is a verb action (`get`, `get_recent`), never when it is a plain
/// accessor (`getsomething`, `setSomething`).
fn routable_name(name: &str) -> bool {
    let prefix = name.get(..3).map(str::to_ascii_lowercase);
    match prefix.as_deref() {
        Some("get") | Some("set") => is_verb(name) || is_verb_action(name),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routable(reflect: &Reflection, name: &str) -> bool {
        reflect.routable(name).is_some()
    }

    #[test]
    fn accessors_are_not_routable() {
        let reflect = Reflection::build()
            .method(Signature::new("get"))
            .method(Signature::new("get_recent"))
            .method(Signature::new("getsomething"))
            .method(Signature::new("GetSomething"))
            .method(Signature::new("setsomething"))
            .method(Signature::new("index"))
            .finish()
            .unwrap();

        assert!(routable(&reflect, "get"));
        assert!(routable(&reflect, "get_recent"));
        assert!(routable(&reflect, "index"));
        assert!(!routable(&reflect, "getsomething"));
        assert!(!routable(&reflect, "GetSomething"));
        assert!(!routable(&reflect, "setsomething"));
    }

    #[test]
    fn protected_methods_are_not_routable() {
        let reflect = Reflection::build()
            .method(Signature::new("index"))
            .method(Signature::new("secret"))
            .protect("secret")
            .finish()
            .unwrap();

        assert!(routable(&reflect, "index"));
        assert!(!routable(&reflect, "secret"));
        assert!(reflect.is_protected("secret"));
        assert!(!reflect.is_protected("index"));
    }

    #[test]
    fn unknown_methods_are_not_routable() {
        let reflect = Reflection::build()
            .method(Signature::new("index"))
            .finish()
            .unwrap();

        assert!(!routable(&reflect, "missing"));
    }

    #[test]
    fn duplicate_method_rejected() {
        let err = Reflection::build()
            .method(Signature::new("index"))
            .method(Signature::new("index"))
            .finish()
            .unwrap_err();

        assert_eq!(err.to_string(), "duplicate method 'index'");
    }

    #[test]
    fn duplicate_param_rejected() {
        let err = Reflection::build()
            .method(Signature::new("get").param("id").param("id"))
            .finish()
            .unwrap_err();

        assert_eq!(err.to_string(), "duplicate parameter 'id' on method 'get'");
    }

    #[test]
    fn variadic_must_be_last() {
        let err = Reflection::build()
            .method(Signature::new("help").rest("parts").param("id"))
            .finish()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "variadic parameter 'parts' on method 'help' must be last"
        );
    }

    #[test]
    fn empty_method_name_rejected() {
        let err = Reflection::build()
            .method(Signature::new(""))
            .finish()
            .unwrap_err();

        assert_eq!(err.to_string(), "method name is empty");
    }

    #[test]
    fn plan_is_cached() {
        let sig = Signature::new("me")
            .request("req")
            .receiver("this")
            .param("query")
            .param("id")
            .rest("parts");

        let first = sig.plan().as_ptr();
        assert_eq!(sig.plan().as_ptr(), first);
        assert_eq!(sig.plan().len(), 5);

        assert!(matches!(sig.plan()[0], Bind::Request));
        assert!(matches!(sig.plan()[1], Bind::Receiver));
        assert!(matches!(sig.plan()[2], Bind::Query));
        assert!(matches!(sig.plan()[3], Bind::Segment { required: true }));
        assert!(matches!(sig.plan()[4], Bind::Tail));
    }
}
