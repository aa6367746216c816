#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod assets;
pub mod comments;
pub mod config;
pub mod cpu;
pub mod notation;
pub mod profile;
pub mod resolver;
pub mod scanner;
