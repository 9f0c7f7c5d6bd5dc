//! Pandoc Gateway - Markdown to DOCX over HTTP
//!
//! This crate exposes a single conversion endpoint that stages Markdown in a
//! temporary workspace, runs Pandoc on it and returns the produced document
//! as a download.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
