//! Form authoring output and request intake workflows.

pub mod requests;
