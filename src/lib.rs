pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod ui;

pub use domain::{find_latest, Version, Versions};
pub use error::{GitReleaseError, Result};
