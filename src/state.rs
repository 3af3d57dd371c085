use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::runner::{RUNNING_STATUS, ShellEvent};
use crate::types::{ConversionJob, ConversionMode, Notification};

pub const INITIAL_STATUS: &str = "Select input and output files to begin.";
pub const CANCELED_STATUS: &str = "Conversion canceled.";
pub const TOOL_MISSING_STATUS: &str = "FFmpeg not detected, conversion disabled";

// older toasts are dropped past this
pub const MAX_NOTIFICATIONS: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    MissingFiles,
    ConfirmOverwrite(ConversionJob),
    ToolMissing(PathBuf),
}

#[derive(Debug)]
pub struct ShellState {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    pub mode: ConversionMode,
    pub status: String,
    prompt: Option<Prompt>,
    notifications: Vec<Notification>,
    running: usize,
    last_output: Option<PathBuf>,
    missing_tool: Option<PathBuf>,
}

fn non_empty(path: PathBuf) -> Option<PathBuf> {
    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    }
}

impl ShellState {
    pub fn new(mode: ConversionMode) -> Self {
        Self {
            input: None,
            output: None,
            mode,
            status: INITIAL_STATUS.to_string(),
            prompt: None,
            notifications: Vec::new(),
            running: 0,
            last_output: None,
            missing_tool: None,
        }
    }

    pub fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn running(&self) -> usize {
        self.running
    }

    pub fn last_output(&self) -> Option<&Path> {
        self.last_output.as_deref()
    }

    pub fn can_convert(&self) -> bool {
        self.missing_tool.is_none()
    }

    pub fn mark_tool_missing(&mut self, tool: PathBuf) {
        self.status = TOOL_MISSING_STATUS.to_string();
        self.prompt = Some(Prompt::ToolMissing(tool.clone()));
        self.missing_tool = Some(tool);
    }

    pub fn set_input(&mut self, path: PathBuf) {
        self.input = non_empty(path);
        if let Some(input) = &self.input {
            self.status = format!("Input selected: {}", input.display());
        }
    }

    pub fn set_output(&mut self, path: PathBuf) {
        self.output = non_empty(path);
        if let Some(output) = &self.output {
            self.status = format!("Output file: {}", output.display());
        }
    }

    // Some(job) launches now, None leaves a prompt to answer
    pub fn request_convert(&mut self) -> Option<ConversionJob> {
        if let Some(tool) = &self.missing_tool {
            self.prompt = Some(Prompt::ToolMissing(tool.clone()));
            return None;
        }

        let (Some(input), Some(output)) = (&self.input, &self.output) else {
            debug!("convert pressed without both paths");
            self.prompt = Some(Prompt::MissingFiles);
            return None;
        };

        let job = ConversionJob::new(input.clone(), output.clone(), self.mode);
        if job.output.exists() {
            debug!(output = %job.output.display(), "asking before overwrite");
            self.prompt = Some(Prompt::ConfirmOverwrite(job));
            return None;
        }
        Some(job)
    }

    pub fn answer_overwrite(&mut self, confirmed: bool) -> Option<ConversionJob> {
        match self.prompt.take() {
            Some(Prompt::ConfirmOverwrite(job)) => {
                info!(output = %job.output.display(), confirmed, "overwrite answered");
                if confirmed {
                    Some(job)
                } else {
                    self.status = CANCELED_STATUS.to_string();
                    None
                }
            }
            other => {
                self.prompt = other;
                None
            }
        }
    }

    pub fn dismiss_prompt(&mut self) {
        self.prompt = None;
    }

    pub fn mark_started(&mut self) {
        self.running += 1;
        self.status = RUNNING_STATUS.to_string();
    }

    pub fn apply(&mut self, event: ShellEvent) {
        match event {
            ShellEvent::Status(text) => self.status = text,
            ShellEvent::Notify(notification) => {
                info!(title = %notification.title, body = %notification.body, "notification");
                self.notifications.push(notification);
                if self.notifications.len() > MAX_NOTIFICATIONS {
                    let excess = self.notifications.len() - MAX_NOTIFICATIONS;
                    self.notifications.drain(..excess);
                }
            }
            ShellEvent::Finished(outcome) => {
                self.running = self.running.saturating_sub(1);
                match outcome {
                    Ok(output) => self.last_output = Some(output),
                    Err(err) => warn!(error = %err, "job finished with an error"),
                }
            }
        }
    }

    pub fn dismiss_notification(&mut self, index: usize) {
        if index < self.notifications.len() {
            self.notifications.remove(index);
        }
    }
}
