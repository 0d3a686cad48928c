pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::TomlConfig;
pub use core::{directory::Directory, session::Session, shell::Shell};
pub use domain::model::{ContactFields, Criterion, Entry, EntryId};
pub use utils::error::{PhonebookError, Result};
