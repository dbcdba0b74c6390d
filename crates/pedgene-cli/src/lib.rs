//! CLI library components for pedgene.

pub mod cli;
pub mod commands;
pub mod io;
pub mod logging;
pub mod summary;
