//! Folio: a portfolio site with a blog rendered from a headless content API.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
pub mod util;
