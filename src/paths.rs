use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

pub fn home_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME not set")?;
    if home.trim().is_empty() {
        bail!("HOME is empty");
    }
    Ok(PathBuf::from(home))
}

/// Every path the installer touches, resolved once up front. All later steps
/// take this record instead of reading the environment again.
#[derive(Debug, Clone)]
pub struct InstallPaths {
    pub source_image: PathBuf,
    pub install_dir: PathBuf,
    pub installed_image: PathBuf,
    pub applications_dir: PathBuf,
    pub desktop_file: PathBuf,
    pub uninstall_script: PathBuf,
    pub log_dir: PathBuf,
}

impl InstallPaths {
    pub fn resolve(home: &Path, work_dir: &Path, app_name: &str) -> Result<Self> {
        if app_name.trim().is_empty() {
            bail!("app name is empty");
        }
        let image_name = format!("{app_name}.AppImage");
        let install_dir = home.join(".local").join("bin");
        let applications_dir = home.join(".local").join("share").join("applications");
        Ok(Self {
            source_image: work_dir.join(&image_name),
            installed_image: install_dir.join(&image_name),
            install_dir,
            desktop_file: applications_dir.join(format!("{app_name}.desktop")),
            applications_dir,
            uninstall_script: work_dir.join(format!("uninstall_{app_name}.sh")),
            log_dir: home.join(".local").join("state").join(app_name),
        })
    }

    /// File name of the desktop entry, as passed to `xdg-mime default`.
    pub fn desktop_file_name(&self) -> &str {
        self.desktop_file
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn home_dir_reads_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let prior = std::env::var("HOME").ok();

        std::env::set_var("HOME", "/home/someone");
        let home = home_dir().unwrap();
        assert_eq!(home, PathBuf::from("/home/someone"));

        if let Some(v) = prior {
            std::env::set_var("HOME", v);
        } else {
            std::env::remove_var("HOME");
        }
    }

    #[test]
    fn resolve_lays_out_xdg_paths() {
        let home = PathBuf::from("/home/u");
        let work = PathBuf::from("/tmp/work");
        let paths = InstallPaths::resolve(&home, &work, "viewer").unwrap();

        assert_eq!(paths.source_image, work.join("viewer.AppImage"));
        assert_eq!(paths.install_dir, home.join(".local/bin"));
        assert_eq!(
            paths.installed_image,
            home.join(".local/bin/viewer.AppImage")
        );
        assert_eq!(
            paths.applications_dir,
            home.join(".local/share/applications")
        );
        assert_eq!(
            paths.desktop_file,
            home.join(".local/share/applications/viewer.desktop")
        );
        assert_eq!(paths.uninstall_script, work.join("uninstall_viewer.sh"));
        assert_eq!(paths.desktop_file_name(), "viewer.desktop");
    }

    #[test]
    fn resolve_rejects_empty_app_name() {
        let err = InstallPaths::resolve(Path::new("/home/u"), Path::new("/tmp"), "").unwrap_err();
        assert!(err.to_string().contains("app name is empty"));
    }
}
