//! Common test utilities for figma-assets-sync integration tests

#[allow(dead_code)]
pub mod config;
#[allow(dead_code)]
pub mod figma;
#[allow(dead_code)]
pub mod fixtures;

#[allow(unused_imports)]
pub use config::*;
#[allow(unused_imports)]
pub use figma::*;
#[allow(unused_imports)]
pub use fixtures::*;
