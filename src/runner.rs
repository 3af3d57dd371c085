use std::path::{Path, PathBuf};
use std::process::Stdio;

use eframe::egui;
use tokio::process::Command;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::ConvertError;
use crate::types::{ConversionJob, Notification};
use crate::utils::{format_size, render_command};

pub const RUNNING_STATUS: &str = "Running ffmpeg... please wait.";

/// Resolves the configured tool against `PATH`, or checks it directly when it is a path.
pub fn locate_tool(tool: &Path) -> Option<PathBuf> {
    match which::which(tool) {
        Ok(path) => {
            info!(tool = %tool.display(), resolved = %path.display(), "found ffmpeg");
            Some(path)
        }
        Err(err) => {
            warn!(tool = %tool.display(), error = %err, "ffmpeg not found");
            None
        }
    }
}

// called from the background task, never the UI thread
pub trait Reporter: Send + Sync + 'static {
    fn status(&self, text: String);
    fn notify(&self, notification: Notification);
    fn done(&self, outcome: Result<PathBuf, ConvertError>);
}

#[derive(Debug)]
pub enum ShellEvent {
    Status(String),
    Notify(Notification),
    Finished(Result<PathBuf, ConvertError>),
}

pub struct ChannelReporter {
    tx: UnboundedSender<ShellEvent>,
    repaint: Option<egui::Context>,
}

impl ChannelReporter {
    pub fn new(tx: UnboundedSender<ShellEvent>, repaint: Option<egui::Context>) -> Self {
        Self { tx, repaint }
    }

    fn send(&self, event: ShellEvent) {
        // receiver only goes away when the window is closing
        if self.tx.send(event).is_err() {
            return;
        }
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
    }
}

impl Reporter for ChannelReporter {
    fn status(&self, text: String) {
        self.send(ShellEvent::Status(text));
    }

    fn notify(&self, notification: Notification) {
        self.send(ShellEvent::Notify(notification));
    }

    fn done(&self, outcome: Result<PathBuf, ConvertError>) {
        self.send(ShellEvent::Finished(outcome));
    }
}

// ffmpeg console output goes straight to ours, nothing is captured
pub fn build_command(tool: &Path, job: &ConversionJob) -> Command {
    let mut cmd = Command::new(tool);
    cmd.args(job.args())
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    cmd
}

async fn execute(tool: &Path, job: &ConversionJob) -> Result<(), ConvertError> {
    let mut cmd = build_command(tool, job);
    info!(command = %render_command(tool, job.args()), mode = ?job.mode, "starting conversion");

    let status = cmd.status().await.map_err(|source| ConvertError::Launch {
        tool: tool.to_path_buf(),
        source,
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(ConvertError::Exit {
            tool: tool.to_path_buf(),
            status,
        })
    }
}

/// Runs `job` to completion and reports exactly one status, one
/// notification and one outcome.
pub async fn run<R: Reporter>(tool: PathBuf, job: ConversionJob, reporter: R) {
    match execute(&tool, &job).await {
        Ok(()) => {
            let size = tokio::fs::metadata(&job.output).await.ok().map(|m| m.len());
            info!(output = %job.output.display(), bytes = ?size, "conversion complete");

            let mut text = format!("Conversion complete: saved to {}", job.output.display());
            if let Some(bytes) = size {
                text.push_str(&format!(" ({})", format_size(bytes)));
            }
            reporter.status(text);
            reporter.notify(Notification::new(
                "Conversion Complete",
                format!("Saved to {}", job.output.display()),
            ));
            reporter.done(Ok(job.output));
        }
        Err(err) => {
            warn!(input = %job.input.display(), error = %err, "conversion failed");
            reporter.status(format!("Error: {err}"));
            reporter.notify(Notification::new("FFmpeg Error", err.to_string()));
            reporter.done(Err(err));
        }
    }
}

// no cancellation, no timeout, no limit on overlapping jobs
pub fn spawn<R: Reporter>(
    handle: &Handle,
    tool: PathBuf,
    job: ConversionJob,
    reporter: R,
) -> JoinHandle<()> {
    handle.spawn(run(tool, job, reporter))
}
