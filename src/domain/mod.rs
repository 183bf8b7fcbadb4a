//! Domain layer: content rules that do not depend on I/O.

pub mod portfolio;
pub mod posts;
