use std::path::{Path, PathBuf};

const MEDIA_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "mkv", "avi", "webm", "m4v", "mpg", "mpeg", "wmv", "flv", "mxf", "mts",
];

fn dialog(title: &str, start_dir: Option<&Path>) -> rfd::FileDialog {
    let dialog = rfd::FileDialog::new().set_title(title);
    match start_dir {
        Some(dir) => dialog.set_directory(dir),
        None => dialog,
    }
}

pub fn pick_input(start_dir: Option<&Path>) -> Option<PathBuf> {
    dialog("Select Input File", start_dir)
        .add_filter("Media Files", MEDIA_EXTENSIONS)
        .add_filter("All Files", &["*"])
        .pick_file()
}

pub fn pick_output(start_dir: Option<&Path>, suggested_name: Option<&str>) -> Option<PathBuf> {
    let dialog = dialog("Select Output File", start_dir);
    match suggested_name {
        Some(name) => dialog.set_file_name(name),
        None => dialog,
    }
    .save_file()
}
