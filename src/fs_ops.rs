use anyhow::{Context, Result};
use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
    time::Duration,
};

fn retry<F>(mut op: F, attempts: usize) -> Result<()>
where
    F: FnMut() -> Result<()>,
{
    let mut delay = Duration::from_millis(200);
    for i in 0..attempts {
        match op() {
            Ok(()) => return Ok(()),
            Err(err) => {
                if i + 1 == attempts {
                    return Err(err);
                }
            }
        }
        std::thread::sleep(delay);
        delay = std::cmp::min(delay * 2, Duration::from_secs(2));
    }
    Ok(())
}

fn temp_path_for(dest: &Path) -> Result<PathBuf> {
    let parent = dest.parent().context("dest has no parent")?;
    let name = dest
        .file_name()
        .context("dest has no filename")?
        .to_string_lossy();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or(Duration::from_millis(0))
        .as_nanos();
    Ok(parent.join(format!("{name}.tmp-{nonce}")))
}

fn copy_file_atomic(src: &Path, dest: &Path) -> Result<()> {
    let tmp = temp_path_for(dest)?;
    fs::copy(src, &tmp).with_context(|| format!("copy {} -> {}", src.display(), tmp.display()))?;
    if dest.exists() {
        fs::remove_file(dest).with_context(|| format!("remove {}", dest.display()))?;
    }
    fs::rename(&tmp, dest)
        .with_context(|| format!("rename {} -> {}", tmp.display(), dest.display()))?;
    Ok(())
}

fn write_bytes_atomic(dest: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = temp_path_for(dest)?;
    fs::write(&tmp, bytes).with_context(|| format!("write {}", tmp.display()))?;
    if dest.exists() {
        fs::remove_file(dest).with_context(|| format!("remove {}", dest.display()))?;
    }
    fs::rename(&tmp, dest)
        .with_context(|| format!("rename {} -> {}", tmp.display(), dest.display()))?;
    Ok(())
}

pub fn copy_file_with_retry(src: &Path, dest: &Path, attempts: usize) -> Result<()> {
    retry(|| copy_file_atomic(src, dest), attempts)
}

pub fn write_bytes_with_retry(dest: &Path, bytes: &[u8], attempts: usize) -> Result<()> {
    retry(|| write_bytes_atomic(dest, bytes), attempts)
}

pub fn set_executable(path: &Path) -> Result<()> {
    let meta = fs::metadata(path).with_context(|| format!("metadata {}", path.display()))?;
    let mut perms = meta.permissions();
    perms.set_mode(perms.mode() | 0o755);
    fs::set_permissions(path, perms)
        .with_context(|| format!("set permissions on {}", path.display()))?;
    Ok(())
}
