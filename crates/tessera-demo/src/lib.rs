#![forbid(unsafe_code)]

//! Tessera demo: two anchored menu windows and a status bar.

pub mod app;
pub mod cli;
