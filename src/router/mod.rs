mod bind;
mod resolve;

use crate::action::Action;
use crate::config::Config;
use crate::controller::{Located, Provide};
use crate::http::Request;

use tracing::debug;

/// Resolves requests to controller actions.
///
/// A router owns its configuration and a controller provider, and nothing
/// else; matching keeps no state between calls, so a shared router can
/// serve any number of requests concurrently.
pub struct Router<P> {
    config: Config,
    provider: P,
}

impl<P> Router<P>
where
    P: Provide,
{
    pub fn new(config: Config, provider: P) -> Self {
        Self { config, provider }
    }

    pub(crate) fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Match a request to a controller action.
    ///
    /// Locates a controller from the path, resolves the handler method, and
    /// binds its arguments. Every miss along the way (no controller, no
    /// eligible method, arguments that do not fit the path) is the same
    /// `None` outcome; matching never fails.
    pub fn route<'req>(&self, req: &'req Request) -> Option<Action<'req>> {
        let rest = self.config.strip(req.segments())?;
        let (resource, rest) = rest.split_first()?;

        let type_name = self.config.type_name(resource);
        let located = match self.provider.provide(&type_name) {
            Some(located) => located,
            None => {
                debug!(controller = %type_name, "no such controller");
                return None;
            }
        };
        let Located {
            reflect,
            controller,
        } = located;

        let resolved = match resolve::resolve(&reflect, req.method(), rest) {
            Some(resolved) => resolved,
            None => {
                debug!(
                    controller = %type_name,
                    method = %req.method(),
                    segments = ?rest,
                    "no action resolved"
                );
                return None;
            }
        };

        let name = resolved.signature.name();
        let args = match bind::bind(resolved.signature, resolved.rest, req, &controller) {
            Some(args) => args,
            None => {
                debug!(controller = %type_name, action = name, "arguments did not bind");
                return None;
            }
        };

        debug!(controller = %type_name, action = name, "matched");
        Some(Action::new(controller, name, args))
    }
}
