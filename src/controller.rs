use crate::error::Error;
use crate::reflect::Reflection;

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// A resource controller: a type grouping the handler methods for one named
/// resource.
///
/// The router only ever treats controllers as opaque instances to construct,
/// inject, and hand to a dispatcher. `as_any` lets the dispatcher recover
/// the concrete type to perform the call.
pub trait Controller: Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

/// A located controller: its metadata and a freshly constructed instance.
///
/// The instance is built once per match attempt and simply dropped if no
/// action resolves for it.
pub struct Located {
    pub reflect: Arc<Reflection>,
    pub controller: Arc<dyn Controller>,
}

/// Constructs controllers by type name.
///
/// This is the seam between the router and whatever owns controller
/// construction; a dependency-injection layer can implement it directly.
/// `None` means the type does not exist, which is a normal "no route"
/// outcome, never an error.
pub trait Provide: Send + Sync {
    fn provide(&self, type_name: &str) -> Option<Located>;
}

/// The default [`Provide`] implementation: an explicit table mapping type
/// names to controller metadata and factories.
#[derive(Default)]
pub struct Registry {
    entries: HashMap<String, Entry>,
}

struct Entry {
    reflect: Arc<Reflection>,
    make: Box<dyn Fn() -> Arc<dyn Controller> + Send + Sync>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller type under `name`, with its reflection metadata
    /// and a factory producing fresh instances.
    pub fn controller<F>(
        &mut self,
        name: impl Into<String>,
        reflect: Reflection,
        make: F,
    ) -> Result<(), Error>
    where
        F: Fn() -> Arc<dyn Controller> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(Error::duplicate_controller(&name));
        }

        self.entries.insert(
            name,
            Entry {
                reflect: Arc::new(reflect),
                make: Box::new(make),
            },
        );

        Ok(())
    }

    /// The registered controller type names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Provide for Registry {
    fn provide(&self, type_name: &str) -> Option<Located> {
        let entry = self.entries.get(type_name)?;
        Some(Located {
            reflect: Arc::clone(&entry.reflect),
            controller: (entry.make)(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Signature;

    struct Answers;

    impl Controller for Answers {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn reflect() -> Reflection {
        Reflection::build()
            .method(Signature::new("index"))
            .finish()
            .unwrap()
    }

    #[test]
    fn provides_fresh_instances() {
        let mut registry = Registry::new();
        registry
            .controller("Answers", reflect(), || Arc::new(Answers))
            .unwrap();

        let first = registry.provide("Answers").unwrap();
        let second = registry.provide("Answers").unwrap();
        assert!(!Arc::ptr_eq(&first.controller, &second.controller));
        assert!(Arc::ptr_eq(&first.reflect, &second.reflect));
    }

    #[test]
    fn unknown_name() {
        let registry = Registry::new();
        assert!(registry.provide("Answers").is_none());
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut registry = Registry::new();
        registry
            .controller("Answers", reflect(), || Arc::new(Answers))
            .unwrap();

        let err = registry
            .controller("Answers", reflect(), || Arc::new(Answers))
            .unwrap_err();
        assert_eq!(err.to_string(), "controller 'Answers' is already registered");
    }
}
