//! Application services: page loaders, listing pipeline and view assembly.

pub mod blog;
pub mod chrome;
pub mod error;
pub mod feed;
pub mod listing;
pub mod metadata;
pub mod page;
pub mod source;
