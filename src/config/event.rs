//! Base pull request discovery from a triggering event payload.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;

use crate::error::RunError;

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<EventPullRequest>,
}

#[derive(Debug, Deserialize)]
struct EventPullRequest {
    html_url: Option<String>,
}

/// Reads `pull_request.html_url` from the JSON event payload at `path`.
///
/// # Errors
///
/// Returns [`RunError::Io`] when the file cannot be opened or read, and
/// [`RunError::Configuration`] when it is not JSON or names no pull request.
pub fn read_pull_request_url(path: &Utf8Path) -> Result<String, RunError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| RunError::Io {
        message: format!("invalid event path '{path}': no file name"),
    })?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| RunError::Io {
        message: format!("failed to open event directory '{parent}': {error}"),
    })?;
    let content = dir.read_to_string(file_name).map_err(|error| RunError::Io {
        message: format!("failed to read event payload '{path}': {error}"),
    })?;

    let payload: EventPayload = serde_json::from_str(&content).map_err(|error| {
        RunError::configuration(format!("failed to parse event payload '{path}': {error}"))
    })?;

    payload
        .pull_request
        .and_then(|pull_request| pull_request.html_url)
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            RunError::configuration(format!(
                "event payload '{path}' does not reference a pull request"
            ))
        })
}
