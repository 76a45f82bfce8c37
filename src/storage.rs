use crate::errors::AppError;
use crate::models::AppData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/state.json")
}

/// Loads the record set, starting empty only when the file does not exist
/// yet. An unreadable or corrupt file is an error: starting empty in that
/// case would serve "no habits" for data that exists and then overwrite the
/// file on the next write.
pub async fn load_data(path: &Path) -> Result<AppData, std::io::Error> {
    match fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|err| {
            error!("failed to parse habit data file: {err}");
            std::io::Error::new(std::io::ErrorKind::InvalidData, err)
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(AppData::default()),
        Err(err) => {
            error!("failed to read habit data file: {err}");
            Err(err)
        }
    }
}

/// Persists the full record set. Writes to a sibling temp file and renames
/// over the target, so a crash mid-write cannot leave a torn file behind.
pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, payload).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}
