use std::path::Path;

/// MIME types the viewer is registered as the default handler for.
pub const IMAGE_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
    "image/bmp",
];

#[derive(Debug, Clone)]
pub struct LauncherEntry<'a> {
    pub name: &'a str,
    pub comment: &'a str,
    pub exec_path: &'a Path,
    pub icon: &'a str,
    pub categories: &'a str,
    pub mime_types: &'a [&'a str],
}

/// Renders the desktop-entry text. The `Exec` line carries the absolute path
/// of the installed image so the launcher works from any working directory.
pub fn render(entry: &LauncherEntry) -> String {
    let mut mime_list = entry.mime_types.join(";");
    if !mime_list.is_empty() {
        mime_list.push(';');
    }
    format!(
        "[Desktop Entry]\n\
         Name={name}\n\
         Comment={comment}\n\
         Exec={exec} %f\n\
         Terminal=false\n\
         Type=Application\n\
         MimeType={mime}\n\
         Categories={categories}\n\
         Icon={icon}\n\
         StartupNotify=true\n",
        name = entry.name,
        comment = entry.comment,
        exec = entry.exec_path.display(),
        mime = mime_list,
        categories = entry.categories,
        icon = entry.icon,
    )
}
