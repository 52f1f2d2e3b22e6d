//! Library surface of pdpkg, split out so tests can drive the staging
//! and packaging flow without spawning the binary.

#![cfg_attr(test, allow(clippy::expect_used))]

pub mod cli;
pub mod commands;
pub mod error;
pub mod fpm;
pub mod layout;
pub mod output;
pub mod plan;
pub mod stager;
