//! Convention-driven controller routing.
//!
//! Resolves an HTTP request (method, path, and query) to a handler method
//! on a resource controller, and binds that method's arguments from the
//! request without per-route glue code. `/discussions/123` finds the
//! `Discussions` controller and its `get` method with `id = "123"`;
//! `GET /discussions/recent` finds `get_recent`; plain accessors and
//! protected methods are never reachable. A request that fits nothing is a
//! `None`, never an error.

mod action;
mod config;
mod controller;
mod error;
mod http;
mod muster;
mod reflect;
mod router;

pub use action::{Action, Args, Value};
pub use config::Config;
pub use controller::{Controller, Located, Provide, Registry};
pub use error::Error;
pub use http::{Method, Request};
pub use muster::Muster;
pub use reflect::{Reflection, ReflectionBuilder, Signature};
pub use router::Router;
