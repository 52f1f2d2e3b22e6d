//! The two execution paths: a real packaging run and its dry-run.

pub mod package;
pub mod plan;
