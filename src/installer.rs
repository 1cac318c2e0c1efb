use anyhow::{bail, Context, Result};
use std::{
    fs,
    path::Path,
    process::{Command, ExitStatus, Stdio},
};

use crate::{config, desktop_entry, fs_ops, logging, paths::InstallPaths, uninstaller};

/// Failure policy for an external command. `Required` aborts the install;
/// `BestEffort` reports a warning and the pipeline continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Required,
    BestEffort,
}

pub fn run(paths: &InstallPaths) -> Result<()> {
    // Precondition gate: nothing may be created on disk before this check.
    ensure_source_image(paths)?;

    let log_path = match logging::init(&paths.log_dir) {
        Ok(path) => Some(path),
        Err(err) => {
            eprintln!("warning: failed to open install log: {err}");
            None
        }
    };
    run_with_deps(paths, exec_status, log_path.as_deref())
}

pub fn run_with_deps(
    paths: &InstallPaths,
    mut exec: impl FnMut(&mut Command) -> Result<ExitStatus>,
    log_path: Option<&Path>,
) -> Result<()> {
    ensure_source_image(paths)?;
    progress(
        log_path,
        &format!("Installing {} {}", config::PRODUCT_NAME, config::VERSION),
    );

    fs::create_dir_all(&paths.install_dir)
        .with_context(|| format!("create {}", paths.install_dir.display()))?;
    fs_ops::copy_file_with_retry(&paths.source_image, &paths.installed_image, 3)?;
    fs_ops::set_executable(&paths.installed_image)?;
    progress(
        log_path,
        &format!("Installed binary: {}", paths.installed_image.display()),
    );

    fs::create_dir_all(&paths.applications_dir)
        .with_context(|| format!("create {}", paths.applications_dir.display()))?;
    let entry = desktop_entry::LauncherEntry {
        name: config::PRODUCT_NAME,
        comment: config::DESCRIPTION,
        exec_path: &paths.installed_image,
        icon: config::ICON,
        categories: config::CATEGORIES,
        mime_types: desktop_entry::IMAGE_MIME_TYPES,
    };
    fs_ops::write_bytes_with_retry(
        &paths.desktop_file,
        desktop_entry::render(&entry).as_bytes(),
        3,
    )?;
    progress(
        log_path,
        &format!("Desktop entry written: {}", paths.desktop_file.display()),
    );

    let mut refresh = Command::new("update-desktop-database");
    refresh.arg(&paths.applications_dir);
    run_step(
        &mut exec,
        &mut refresh,
        Policy::BestEffort,
        "update desktop database",
        log_path,
    )?;

    for mime in desktop_entry::IMAGE_MIME_TYPES {
        let mut register = Command::new("xdg-mime");
        register
            .arg("default")
            .arg(paths.desktop_file_name())
            .arg(mime);
        run_step(
            &mut exec,
            &mut register,
            Policy::Required,
            &format!("register default handler for {mime}"),
            log_path,
        )?;
    }
    progress(
        log_path,
        &format!(
            "Registered as default handler for {} image types",
            desktop_entry::IMAGE_MIME_TYPES.len()
        ),
    );

    uninstaller::write(paths, config::PRODUCT_NAME)?;
    progress(
        log_path,
        &format!(
            "{} installed. To remove it, run {}",
            config::PRODUCT_NAME,
            paths.uninstall_script.display()
        ),
    );
    Ok(())
}

fn ensure_source_image(paths: &InstallPaths) -> Result<()> {
    if !paths.source_image.exists() {
        bail!(
            "application image not found at {} (run the installer from the directory containing it)",
            paths.source_image.display()
        );
    }
    Ok(())
}

fn run_step(
    exec: &mut impl FnMut(&mut Command) -> Result<ExitStatus>,
    cmd: &mut Command,
    policy: Policy,
    label: &str,
    log_path: Option<&Path>,
) -> Result<()> {
    let _ = logging::log_line(log_path, &format!("> {}", format_command(cmd)));
    match exec(cmd) {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => match policy {
            Policy::Required => bail!("{label} failed (exit {:?})", status.code()),
            Policy::BestEffort => {
                warn(
                    log_path,
                    &format!("{label} failed (exit {:?}), continuing", status.code()),
                );
                Ok(())
            }
        },
        Err(err) => match policy {
            Policy::Required => Err(err.context(label.to_string())),
            Policy::BestEffort => {
                warn(log_path, &format!("{label} unavailable ({err}), continuing"));
                Ok(())
            }
        },
    }
}

fn exec_status(cmd: &mut Command) -> Result<ExitStatus> {
    cmd.stdin(Stdio::null())
        .status()
        .with_context(|| format!("spawn {}", format_command(cmd)))
}

fn format_command(cmd: &Command) -> String {
    let program = cmd.get_program().to_string_lossy();
    let args = cmd
        .get_args()
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ");
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {args}")
    }
}

fn progress(log_path: Option<&Path>, line: &str) {
    println!("{line}");
    let _ = logging::log_line(log_path, line);
}

fn warn(log_path: Option<&Path>, line: &str) {
    eprintln!("warning: {line}");
    let _ = logging::log_line(log_path, &format!("warning: {line}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;

    fn status(code: i32) -> ExitStatus {
        ExitStatus::from_raw(code << 8)
    }

    #[test]
    fn run_step_best_effort_swallows_failure() {
        let mut exec = |_: &mut Command| Ok(status(1));
        let mut cmd = Command::new("nope");
        run_step(&mut exec, &mut cmd, Policy::BestEffort, "step", None).unwrap();
    }

    #[test]
    fn run_step_best_effort_swallows_spawn_error() {
        let mut exec = |_: &mut Command| anyhow::bail!("no such program");
        let mut cmd = Command::new("nope");
        run_step(&mut exec, &mut cmd, Policy::BestEffort, "step", None).unwrap();
    }

    #[test]
    fn run_step_required_propagates_failure() {
        let mut exec = |_: &mut Command| Ok(status(2));
        let mut cmd = Command::new("nope");
        let err = run_step(&mut exec, &mut cmd, Policy::Required, "step", None).unwrap_err();
        assert!(err.to_string().contains("step failed"));
    }

    #[test]
    fn format_command_joins_args() {
        let mut cmd = Command::new("xdg-mime");
        cmd.arg("default").arg("qiv.desktop").arg("image/png");
        assert_eq!(format_command(&cmd), "xdg-mime default qiv.desktop image/png");
    }
}
