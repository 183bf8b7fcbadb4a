//! Template-facing view models and rendering helpers.

pub mod views;
