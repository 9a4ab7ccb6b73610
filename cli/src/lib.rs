//! Terminal front-end for Prompt Hub.

pub mod cli;
pub mod clipboard;
pub mod input;
pub mod render;
