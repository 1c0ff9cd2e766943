//! Hands the data file to an external Parquet viewer so the user can inspect it
//! by hand. Launching is fire-and-forget; nothing comes back into the app.

use std::io;
use std::path::{Path, PathBuf};

use log::{error, info};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("data file {} not found", .0.display())]
    DataFileMissing(PathBuf),
    #[error("viewer {} not found", .0.display())]
    ViewerMissing(PathBuf),
    #[error("failed to launch viewer")]
    Launch(#[source] io::Error),
}

/// Which program ended up opening the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launched {
    Viewer(PathBuf),
    SystemDefault,
}

/// Open `data_file` in `viewer`, or in the platform's default handler for
/// Parquet files when no viewer is configured.
pub fn launch_viewer(data_file: &Path, viewer: Option<&Path>) -> Result<Launched, ViewerError> {
    if !data_file.exists() {
        return Err(ViewerError::DataFileMissing(data_file.to_path_buf()));
    }

    let launched = match viewer {
        Some(viewer) => {
            if !viewer.exists() {
                return Err(ViewerError::ViewerMissing(viewer.to_path_buf()));
            }
            open::with_detached(data_file, viewer.to_string_lossy())
                .map(|()| Launched::Viewer(viewer.to_path_buf()))
        }
        None => open::that_detached(data_file).map(|()| Launched::SystemDefault),
    };

    match launched {
        Ok(launched) => {
            info!(
                "event=viewer_launch module=viewer status=ok path={} via={launched:?}",
                data_file.display()
            );
            Ok(launched)
        }
        Err(err) => {
            error!(
                "event=viewer_launch module=viewer status=error path={} error={err}",
                data_file.display()
            );
            Err(ViewerError::Launch(err))
        }
    }
}
