//! Wire formats for patch operations.

pub mod json;
