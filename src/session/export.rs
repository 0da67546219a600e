use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::{error::FukuwaraiResult, math::CivilTime},
    snapshot::raster::Snapshot,
};

/// `<prefix>-YYYYMMDDHHMMSS.png` for a UTC Unix timestamp.
pub fn export_filename(prefix: &str, unix_secs: i64) -> String {
    format!(
        "{prefix}-{}.png",
        CivilTime::from_unix_secs(unix_secs).compact_digits()
    )
}

/// Seconds since the Unix epoch, or 0 if the clock is before it.
pub fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Resolve an output target: directories get a timestamped filename inside them.
pub fn resolve_export_path(out: &Path, prefix: &str, unix_secs: i64) -> PathBuf {
    if out.is_dir() {
        out.join(export_filename(prefix, unix_secs))
    } else {
        out.to_path_buf()
    }
}

/// Write the PNG bytes of `snapshot` to `path`, creating parent directories.
pub fn write_png(path: &Path, snapshot: &Snapshot) -> FukuwaraiResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, &snapshot.png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = snapshot.png.len(), "wrote snapshot");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/session/export.rs"]
mod tests;
