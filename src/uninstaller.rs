use anyhow::Result;

use crate::{fs_ops, paths::InstallPaths};

/// Renders the uninstall script. Paths computed at install time are embedded
/// as literals so the script never has to recompute them; both removals are
/// guarded by existence checks, which makes the script safe to run twice.
pub fn render_script(paths: &InstallPaths, product_name: &str) -> String {
    let app_bin = sh_quote(&paths.installed_image.display().to_string());
    let desktop_file = sh_quote(&paths.desktop_file.display().to_string());
    let applications_dir = sh_quote(&paths.applications_dir.display().to_string());
    format!(
        "#!/bin/sh\n\
         # Generated by qiv-installer; removes the files it installed.\n\
         \n\
         app_bin={app_bin}\n\
         desktop_file={desktop_file}\n\
         applications_dir={applications_dir}\n\
         \n\
         if [ -f \"$app_bin\" ]; then\n\
         \x20   rm \"$app_bin\"\n\
         \x20   echo \"Removed $app_bin\"\n\
         fi\n\
         \n\
         if [ -f \"$desktop_file\" ]; then\n\
         \x20   rm \"$desktop_file\"\n\
         \x20   echo \"Removed $desktop_file\"\n\
         fi\n\
         \n\
         update-desktop-database \"$applications_dir\" >/dev/null 2>&1 || true\n\
         \n\
         echo \"{product_name} uninstalled.\"\n\
         exit 0\n"
    )
}

/// Writes the rendered script to its install-time path and marks it executable.
pub fn write(paths: &InstallPaths, product_name: &str) -> Result<()> {
    let script = render_script(paths, product_name);
    fs_ops::write_bytes_with_retry(&paths.uninstall_script, script.as_bytes(), 3)?;
    fs_ops::set_executable(&paths.uninstall_script)?;
    Ok(())
}

fn sh_quote(value: &str) -> String {
    let escaped = value.replace('\'', "'\\''");
    format!("'{}'", escaped)
}
