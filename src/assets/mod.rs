//! External inputs: decoded images, path definitions, resource loading and the path cache.

pub mod cache;
pub mod decode;
pub mod path;
pub mod source;
