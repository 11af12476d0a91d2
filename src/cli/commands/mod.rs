//! Command implementations.

mod check;
mod entries;
mod export;
mod init;
mod scan;
mod serve;

pub use check::cmd_check;
pub use entries::cmd_entries;
pub use export::cmd_export;
pub use init::cmd_init;
pub use scan::cmd_scan;
pub use serve::cmd_serve;

use crate::config::Settings;
use crate::store::{EntryStore, FileStorage};

/// Open the entry store for the configured data directory.
pub(crate) fn open_store(settings: &Settings) -> anyhow::Result<EntryStore> {
    let storage = FileStorage::new(settings.data_dir());
    Ok(EntryStore::open(Box::new(storage))?)
}
