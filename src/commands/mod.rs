//! Command implementations for ivyfetch CLI

pub mod cache;
pub mod fetch;
pub mod helpers;
pub mod list;
pub mod resolve;
pub mod version;
