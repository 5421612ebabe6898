use crate::action::Action;
use crate::config::Config;
use crate::controller::{Controller, Registry};
use crate::http::Request;
use crate::reflect::Reflection;
use crate::router::Router;

use std::sync::Arc;

/// A convention-routed application: a [`Router`] over a [`Registry`].
///
/// ```
/// use std::any::Any;
/// use std::sync::Arc;
/// use muster::{Config, Controller, Method, Muster, Reflection, Request, Signature};
///
/// struct Discussions;
///
/// impl Controller for Discussions {
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// let app = Muster::new(Config::default()).controller(
///     "Discussions",
///     Reflection::build()
///         .method(Signature::new("get").param("id"))
///         .finish()
///         .unwrap(),
///     || Arc::new(Discussions),
/// );
///
/// let req = Request::new(Method::Get, "/discussions/123").unwrap();
/// let action = app.route(&req).unwrap();
/// assert_eq!(action.method(), "get");
/// ```
pub struct Muster {
    router: Router<Registry>,
}

impl Muster {
    pub fn new(config: Config) -> Self {
        Self {
            router: Router::new(config, Registry::new()),
        }
    }

    /// Register a controller type.
    pub fn controller<F>(mut self, name: impl Into<String>, reflect: Reflection, make: F) -> Self
    where
        F: Fn() -> Arc<dyn Controller> + Send + Sync + 'static,
    {
        self.router
            .provider_mut()
            .controller(name, reflect, make)
            .expect("failed to register controller");
        self
    }

    /// Match a request to a controller action.
    pub fn route<'req>(&self, req: &'req Request) -> Option<Action<'req>> {
        self.router.route(req)
    }
}
