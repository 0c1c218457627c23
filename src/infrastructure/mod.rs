//! Infrastructure layer: filesystem, process, prompt and environment access
//!
//! Real implementations of the boundary traits live in `traits`; `di` builds
//! services from them.

pub mod di;
pub mod error;
pub mod traits;

pub use error::InfraError;
