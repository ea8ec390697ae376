use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

pub struct LocalStorage;

impl LocalStorage {
    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents).map_err(|e| Error::io(&tmp_path, e))?;
        fs::rename(&tmp_path, path).map_err(|e| Error::io(path, e))?;
        Ok(())
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        fs::read_to_string(path).map_err(|e| Error::io(path, e))
    }
}
