pub mod directory;
pub mod session;
pub mod shell;

pub use crate::domain::model::{ContactFields, Criterion, Entry, EntryId};
pub use crate::domain::ports::ConfigProvider;
pub use crate::utils::error::Result;
