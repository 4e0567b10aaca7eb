//! Command handlers.
//!
//! Each submodule exposes a single `execute` function that receives its
//! parsed arguments plus whatever context it needs (config, output).

pub mod completions;
pub mod provision;
pub mod sites;
