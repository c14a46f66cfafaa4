//! Link sharing.
//!
//! A comparison is shared as a link whose `tools=` query lists the selected
//! ids. Sharing is best-effort: the platform share command is tried first,
//! then the clipboard, and failures are logged rather than returned.

use std::io::Write;
use std::process::{Command, Stdio};

use log::{debug, info, warn};
use url::Url;

use crate::catalog::ToolDescriptor;
use crate::error::{MatrixError, Result};

/// Title attached to every share
pub const SHARE_TITLE: &str = "AI Tools Comparison";

const TOOLS_PARAM: &str = "tools";

/// What gets handed to a share target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    /// Payload for the given tools, linking back under `base_url`
    pub fn for_tools(base_url: &str, tools: &[&ToolDescriptor]) -> Result<Self> {
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        Ok(Self {
            title: SHARE_TITLE.to_string(),
            text: format!("Comparing {}", names.join(", ")),
            url: share_url(base_url, tools.iter().map(|t| t.id.as_str()))?,
        })
    }
}

/// Build a link encoding the selected ids. Any fragment on the base is dropped.
pub fn share_url<'a>(base_url: &str, ids: impl IntoIterator<Item = &'a str>) -> Result<String> {
    let ids: Vec<&str> = ids.into_iter().collect();
    let mut url = Url::parse(base_url)?;
    url.set_fragment(None);
    url.query_pairs_mut().append_pair(TOOLS_PARAM, &ids.join(","));
    Ok(url.into())
}

/// Extract the selected ids from a shared link. Unknown params are ignored.
pub fn parse_share_url(link: &str) -> Result<Vec<String>> {
    let url = Url::parse(link)?;
    let ids = url
        .query_pairs()
        .filter(|(key, _)| key == TOOLS_PARAM)
        .flat_map(|(_, value)| {
            value
                .split(',')
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect::<Vec<_>>()
        })
        .collect();
    Ok(ids)
}

/// Something that can share a payload
pub trait ShareTarget {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Share the payload
    fn share(&self, payload: &SharePayload) -> Result<()>;
}

/// Runs an external command to share.
///
/// The command line may reference `{title}`, `{text}`, and `{url}`.
#[derive(Debug, Clone)]
pub struct CommandShare {
    command: String,
}

impl CommandShare {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl ShareTarget for CommandShare {
    fn name(&self) -> &str {
        &self.command
    }

    fn share(&self, payload: &SharePayload) -> Result<()> {
        let mut parts = self.command.split_whitespace().map(|part| {
            part.replace("{title}", &payload.title)
                .replace("{text}", &payload.text)
                .replace("{url}", &payload.url)
        });
        let program = parts
            .next()
            .ok_or_else(|| MatrixError::Share("empty share command".to_string()))?;

        debug!("Running share command: {}", program);
        let status = Command::new(&program)
            .args(parts)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| MatrixError::Share(format!("{}: {}", program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(MatrixError::Share(format!("{} exited with {}", program, status)))
        }
    }
}

/// Copies the link to the clipboard via the first clipboard command that works
#[derive(Debug, Clone)]
pub struct ClipboardShare {
    commands: Vec<String>,
}

impl ClipboardShare {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }

    fn copy_with(command: &str, text: &str) -> Result<()> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| MatrixError::Share("empty clipboard command".to_string()))?;

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| MatrixError::Share(format!("{}: {}", program, e)))?;

        // Reap the child even when the write fails
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        let status = child.wait()?;
        written?;
        if status.success() {
            Ok(())
        } else {
            Err(MatrixError::Share(format!("{} exited with {}", program, status)))
        }
    }
}

impl ShareTarget for ClipboardShare {
    fn name(&self) -> &str {
        "clipboard"
    }

    fn share(&self, payload: &SharePayload) -> Result<()> {
        for command in &self.commands {
            match Self::copy_with(command, &payload.url) {
                Ok(()) => {
                    debug!("Copied link with {}", command);
                    return Ok(());
                }
                Err(e) => debug!("Clipboard command '{}' failed: {}", command, e),
            }
        }
        Err(MatrixError::Share("no clipboard command available".to_string()))
    }
}

/// How a best-effort share ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The platform share target accepted the payload
    Shared,
    /// The link was copied to the clipboard
    Copied,
    /// Nothing worked; the caller should show the link
    Unavailable(String),
}

impl ShareOutcome {
    /// Status text for the user
    pub fn message(&self) -> String {
        match self {
            ShareOutcome::Shared => "Comparison shared".to_string(),
            ShareOutcome::Copied => "Link copied to clipboard!".to_string(),
            ShareOutcome::Unavailable(url) => format!("Share this link: {}", url),
        }
    }
}

/// Share via `primary` if given, falling back to `fallback`. Never fails.
pub fn share_best_effort(
    primary: Option<&dyn ShareTarget>,
    fallback: &dyn ShareTarget,
    payload: &SharePayload,
) -> ShareOutcome {
    if let Some(target) = primary {
        match target.share(payload) {
            Ok(()) => {
                info!("Shared comparison via {}", target.name());
                return ShareOutcome::Shared;
            }
            Err(e) => warn!("Error sharing via {}: {}", target.name(), e),
        }
    }

    match fallback.share(payload) {
        Ok(()) => {
            info!("Copied comparison link via {}", fallback.name());
            ShareOutcome::Copied
        }
        Err(e) => {
            warn!("Error sharing via {}: {}", fallback.name(), e);
            ShareOutcome::Unavailable(payload.url.clone())
        }
    }
}
