use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// conversion preset, each variant is a fixed ffmpeg flag template
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversionMode {
    ReEncode,
    Passthrough,
}

impl Default for ConversionMode {
    fn default() -> Self {
        ConversionMode::ReEncode
    }
}

#[rustfmt::skip]
const RE_ENCODE_FLAGS: &[&str] = &[
    "-vcodec", "mjpeg",
    "-q:v", "2",
    "-acodec", "pcm_s16be",
    "-q:a", "0",
    "-f", "mov",
];

impl ConversionMode {
    pub const ALL: [ConversionMode; 2] = [ConversionMode::ReEncode, ConversionMode::Passthrough];

    // placed between `-i <input>` and the output path
    pub fn flags(&self) -> &'static [&'static str] {
        match self {
            ConversionMode::ReEncode => RE_ENCODE_FLAGS,
            ConversionMode::Passthrough => &[],
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ConversionMode::ReEncode => {
                "MJPEG video + 16-bit PCM audio in a MOV container (edit-friendly intermediate)"
            }
            ConversionMode::Passthrough => "Let ffmpeg pick codecs from the output file extension",
        }
    }

    /// `None` keeps the input's own extension.
    pub fn output_extension(&self) -> Option<&'static str> {
        match self {
            ConversionMode::ReEncode => Some("mov"),
            ConversionMode::Passthrough => None,
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            ConversionMode::ReEncode => "re_encode",
            ConversionMode::Passthrough => "passthrough",
        }
    }

    /// Output file name for `input` under this preset. Never the input's own name.
    pub fn suggested_output_name(&self, input: &Path) -> Option<String> {
        let stem = input.file_stem()?.to_string_lossy();
        let ext = match self.output_extension() {
            Some(ext) => ext.to_string(),
            None => input.extension()?.to_string_lossy().into_owned(),
        };

        let name = format!("{stem}.{ext}");
        if input.file_name() == Some(OsStr::new(&name)) {
            return Some(format!("{stem}_{}.{ext}", self.slug()));
        }
        Some(name)
    }
}

impl std::fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionMode::ReEncode => write!(f, "Re-encode (MJPEG/PCM MOV)"),
            ConversionMode::Passthrough => write!(f, "Passthrough"),
        }
    }
}

// window theme, persisted in the config
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    System,
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::System
    }
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::System, Theme::Light, Theme::Dark];
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::System => write!(f, "System Theme"),
            Theme::Light => write!(f, "Light Theme"),
            Theme::Dark => write!(f, "Dark Theme"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: ConversionMode,
}

impl ConversionJob {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        mode: ConversionMode,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            mode,
        }
    }

    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(4 + self.mode.flags().len());
        args.push("-y".into());
        args.push("-i".into());
        args.push(self.input.clone().into_os_string());
        args.extend(self.mode.flags().iter().map(OsString::from));
        args.push(self.output.clone().into_os_string());
        args
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[rustfmt::skip]
    #[test]
    fn re_encode_uses_mjpeg_pcm_template() {
        let job = ConversionJob::new("/tmp/a.mp4", "/tmp/b.mov", ConversionMode::ReEncode);
        assert_eq!(
            strings(&job.args()),
            [
                "-y", "-i", "/tmp/a.mp4",
                "-vcodec", "mjpeg", "-q:v", "2",
                "-acodec", "pcm_s16be", "-q:a", "0",
                "-f", "mov",
                "/tmp/b.mov",
            ]
        );
    }

    #[test]
    fn passthrough_has_no_codec_flags() {
        let job = ConversionJob::new("/tmp/a.mov", "/tmp/b.mp4", ConversionMode::Passthrough);
        let args = strings(&job.args());
        assert_eq!(args, ["-y", "-i", "/tmp/a.mov", "/tmp/b.mp4"]);
        assert!(!args.iter().any(|a| a == "-vcodec" || a == "-acodec"));
    }

    #[test]
    fn output_is_last_and_input_follows_overwrite_flag() {
        for mode in ConversionMode::ALL {
            let job = ConversionJob::new("in file.mkv", "out dir/out file.mov", mode);
            let args = strings(&job.args());
            assert_eq!(args.last().map(String::as_str), Some("out dir/out file.mov"));
            assert_eq!(&args[..3], ["-y", "-i", "in file.mkv"]);
        }
    }

    #[test]
    fn template_depends_only_on_mode() {
        for mode in ConversionMode::ALL {
            let a = ConversionJob::new("/x/1.mp4", "/x/2.mov", mode).args();
            let b = ConversionJob::new("/other/path.avi", "/else/out.mkv", mode).args();
            assert_eq!(a.len(), b.len());
            assert_eq!(strings(&a[3..a.len() - 1]), strings(&b[3..b.len() - 1]));
            assert_eq!(strings(&a[3..a.len() - 1]), mode.flags());
        }
    }

    #[test]
    fn re_encode_suggests_mov_next_to_input_name() {
        let name = ConversionMode::ReEncode.suggested_output_name(Path::new("/clips/take 1.mp4"));
        assert_eq!(name.as_deref(), Some("take 1.mov"));
    }

    #[test]
    fn suggestion_never_reuses_the_input_name() {
        let name = ConversionMode::ReEncode.suggested_output_name(Path::new("/clips/take1.mov"));
        assert_eq!(name.as_deref(), Some("take1_re_encode.mov"));

        let name = ConversionMode::Passthrough.suggested_output_name(Path::new("/clips/take1.mkv"));
        assert_eq!(name.as_deref(), Some("take1_passthrough.mkv"));
    }

    #[test]
    fn passthrough_needs_an_input_extension() {
        let name = ConversionMode::Passthrough.suggested_output_name(Path::new("/clips/raw"));
        assert!(name.is_none());
    }

    #[test]
    fn default_mode_is_re_encode() {
        assert_eq!(ConversionMode::default(), ConversionMode::ReEncode);
    }
}
