//! CLI command handlers
//!
//! Each handler works on the project in the current directory and prints its
//! own status lines.

pub mod inspect;
pub mod make;
