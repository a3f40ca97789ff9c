use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

/// Removes the debug-response directories. A directory that is already gone
/// is not an error.
pub fn clean_folders(folder_paths: &[&Path]) -> io::Result<()> {
    for folder_path in folder_paths {
        match fs::remove_dir_all(folder_path) {
            Ok(()) => info!("Folder '{}' deleted successfully.", folder_path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Folder '{}' does not exist, nothing to delete.", folder_path.display())
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
