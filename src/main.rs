mod config;
mod desktop_entry;
mod fs_ops;
mod installer;
mod logging;
mod paths;
mod uninstaller;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let home = paths::home_dir()?;
    let work_dir = std::env::current_dir().context("resolve working directory")?;
    let install_paths = paths::InstallPaths::resolve(&home, &work_dir, config::NAME)?;
    installer::run(&install_paths)
}
