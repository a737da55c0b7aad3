//! Write events to the fixed-width events file.

use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use super::EventStore;
use crate::error::DaybookResult;

impl EventStore {
    /// Save every event to `path`, replacing its previous contents.
    ///
    /// The events are written to a temporary file next to `path` which is then
    /// renamed over it, so a failed save never truncates the existing file.
    /// An existing file keeps its permissions.
    pub fn save(&self, path: &Path) -> DaybookResult<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            self.save_to(&mut writer)?;
            writer.flush()?;
        }
        if let Ok(existing) = std::fs::metadata(path) {
            if existing.is_file() {
                tmp.as_file().set_permissions(existing.permissions())?;
            }
        }
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;

        info!(path = %path.display(), events = self.len(), "events saved");
        Ok(())
    }

    /// Write one rendered line per event, in [`EventStore::render_all`] order.
    pub fn save_to<W: Write>(&self, mut writer: W) -> DaybookResult<()> {
        for line in self.render_all() {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }
}
