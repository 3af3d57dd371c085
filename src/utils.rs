use std::ffi::OsStr;
use std::path::Path;

pub fn shell_quote(arg: &OsStr) -> String {
    let arg = arg.to_string_lossy();
    if arg.is_empty() {
        return "\"\"".to_string();
    }
    if arg.contains(' ') || arg.contains('"') || arg.contains('\'') {
        let escaped = arg.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\"", escaped)
    } else {
        arg.into_owned()
    }
}

/// Renders a command line for logs. Never executed through a shell.
pub fn render_command<I, S>(program: &Path, args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut line = shell_quote(program.as_os_str());
    for arg in args {
        line.push(' ');
        line.push_str(&shell_quote(arg.as_ref()));
    }
    line
}

pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let b = bytes as f64;
    if b < KB {
        format!("{:.0} B", b)
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else if b < GB {
        format!("{:.1} MB", b / MB)
    } else {
        format!("{:.2} GB", b / GB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_only_when_needed() {
        assert_eq!(shell_quote(OsStr::new("plain.mp4")), "plain.mp4");
        assert_eq!(shell_quote(OsStr::new("my clip.mp4")), "\"my clip.mp4\"");
        assert_eq!(shell_quote(OsStr::new("say \"hi\"")), "\"say \\\"hi\\\"\"");
        assert_eq!(shell_quote(OsStr::new("")), "\"\"");
    }

    #[test]
    fn renders_program_and_args() {
        let line = render_command(Path::new("ffmpeg"), ["-y", "-i", "a b.mp4", "out.mov"]);
        assert_eq!(line, "ffmpeg -y -i \"a b.mp4\" out.mov");
    }

    #[test]
    fn sizes_pick_a_unit() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }
}
