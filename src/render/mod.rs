//! Response rendering — payload to structured projection plus markdown.
//!
//! ```text
//!   payload ──decode──► typed response ──project──► structured Value
//!                                           │
//!                                           └──────► markdown (from the same view)
//! ```
//! The caller's `response_format` only selects which of the two becomes the
//! tool text; the [`limit`] module then enforces the character budget.

pub mod format;
pub mod limit;
pub mod meetings;
pub mod recordings;
pub mod teams;

use crate::tools::catalog::ToolInput;
use crate::tools::enums::ToolKind;
use crate::types::{Error, OutputConfig, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

pub use format::{duration_minutes, format_duration, DisplayZone};
pub use limit::{enforce_character_limit, GuardedOutput, SizeLimit, TRUNCATION_MESSAGE};
pub use meetings::{DetailFlags, MeetingView};

/// How the size guard may shrink a rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageShape {
    /// `structured[key]` is an array of entries; truncation halves it.
    Entries(&'static str),
    /// `structured[key]` is one long text; truncation clips it.
    Text(&'static str),
}

/// Rendered candidate for one invocation, before the size guard.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub structured: Value,
    pub markdown: String,
    pub shape: PageShape,
}

impl RenderedPage {
    pub fn entries(structured: Value, markdown: String, key: &'static str) -> Self {
        Self {
            structured,
            markdown,
            shape: PageShape::Entries(key),
        }
    }

    pub fn text(structured: Value, markdown: String, key: &'static str) -> Self {
        Self {
            structured,
            markdown,
            shape: PageShape::Text(key),
        }
    }

    pub fn entries_key(&self) -> Option<&'static str> {
        match self.shape {
            PageShape::Entries(key) => Some(key),
            PageShape::Text(_) => None,
        }
    }
}

/// Per-process rendering settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub zone: DisplayZone,
}

impl From<&OutputConfig> for RenderOptions {
    fn from(output: &OutputConfig) -> Self {
        Self {
            zone: DisplayZone::from_offset_minutes(output.display_utc_offset_minutes),
        }
    }
}

/// Decode `payload` for the given tool and render it.
pub fn render(
    kind: ToolKind,
    payload: Value,
    input: &ToolInput,
    options: &RenderOptions,
) -> Result<RenderedPage> {
    match kind {
        ToolKind::ListMeetings => meetings::render_meetings(
            decode(payload, "meetings")?,
            DetailFlags::from_input(input),
            &options.zone,
        ),
        ToolKind::ListTeams => teams::render_teams(decode(payload, "teams")?, &options.zone),
        ToolKind::ListTeamMembers => {
            teams::render_team_members(decode(payload, "team members")?, &options.zone)
        }
        ToolKind::GetSummary => {
            recordings::render_summary(recording_id(input)?, decode(payload, "summary")?)
        }
        ToolKind::GetTranscript => {
            recordings::render_transcript(recording_id(input)?, decode(payload, "transcript")?)
        }
    }
}

fn decode<T: DeserializeOwned>(payload: Value, what: &str) -> Result<T> {
    serde_json::from_value(payload)
        .map_err(|e| Error::render(format!("unexpected {what} payload: {e}")))
}

fn recording_id(input: &ToolInput) -> Result<u64> {
    input
        .get("recording_id")
        .and_then(Value::as_u64)
        .ok_or_else(|| Error::internal("recording_id missing after validation"))
}

/// Structured page object: `{count, <key>: [...], next_cursor?, has_more}`.
pub(crate) fn page_object<T: Serialize>(
    key: &str,
    items: &[T],
    next_cursor: Option<&str>,
) -> Result<Value> {
    let mut page = json!({
        "count": items.len(),
        key: serde_json::to_value(items)?,
        "has_more": next_cursor.is_some(),
    });
    if let (Some(cursor), Value::Object(map)) = (next_cursor, &mut page) {
        map.insert("next_cursor".to_string(), Value::String(cursor.to_string()));
    }
    Ok(page)
}

/// Continuation hint appended to paginated markdown. Empty on the last page.
pub(crate) fn page_footer(next_cursor: Option<&str>) -> String {
    match next_cursor {
        Some(cursor) => format!(
            "\n\n---\nMore results are available. To fetch the next page, call this tool again with cursor: \"{cursor}\""
        ),
        None => String::new(),
    }
}
