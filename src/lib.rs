//! Storyloom — the document core of a branching visual-novel editor.
//!
//! A project is a named graph of scenes connected by labeled choice
//! buttons. This crate owns the in-memory scene graph, its JSON
//! persistence format, and the editing session that keeps the two in
//! sync after every structural change. Rendering, theming and the
//! desktop shell live outside this crate and consume it read-only.

pub mod core;
pub mod schema;
