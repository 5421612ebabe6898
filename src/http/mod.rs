mod method;
mod request;

pub use method::Method;
pub use request::Request;
