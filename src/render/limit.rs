//! Size guard — keeps tool text within the character budget.
//!
//! One halving-and-clip pass, never repeated. Lengths are counted in Unicode
//! scalar values.

use crate::render::{PageShape, RenderedPage};
use crate::tools::enums::ResponseFormat;
use crate::types::{OutputConfig, Result, CHARACTER_LIMIT, TRUNCATION_MARGIN};
use serde_json::{Map, Value};

/// Advisory attached to every truncated output.
pub const TRUNCATION_MESSAGE: &str = "Response truncated to fit the size limit. \
    Use the cursor parameter to fetch the next page, or add filters (dates, teams, recorders) \
    or disable detail flags to narrow the results.";

/// Character budget and the clip margin below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimit {
    pub character_limit: usize,
    pub margin: usize,
}

impl Default for SizeLimit {
    fn default() -> Self {
        Self {
            character_limit: CHARACTER_LIMIT,
            margin: TRUNCATION_MARGIN,
        }
    }
}

impl From<&OutputConfig> for SizeLimit {
    fn from(output: &OutputConfig) -> Self {
        Self {
            character_limit: output.character_limit,
            margin: output.truncation_margin,
        }
    }
}

impl SizeLimit {
    fn clip_length(&self) -> usize {
        self.character_limit.saturating_sub(self.margin)
    }
}

/// Final text and structured content after the guard.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardedOutput {
    pub text: String,
    pub structured: Value,
    pub truncated: bool,
}

/// Select the text for `format` and enforce the budget.
pub fn enforce_character_limit(
    page: RenderedPage,
    format: ResponseFormat,
    limit: &SizeLimit,
) -> Result<GuardedOutput> {
    let text = match format {
        ResponseFormat::Json => serde_json::to_string_pretty(&page.structured)?,
        ResponseFormat::Markdown => page.markdown,
    };

    let original_chars = text.chars().count();
    if original_chars <= limit.character_limit {
        return Ok(GuardedOutput {
            text,
            structured: page.structured,
            truncated: false,
        });
    }

    let structured = truncate_structured(page.structured, page.shape, limit);
    let text = match format {
        ResponseFormat::Json => serde_json::to_string_pretty(&structured)?,
        ResponseFormat::Markdown => {
            let mut clipped = format!("**Note:** {TRUNCATION_MESSAGE}\n\n{text}");
            clip_chars(&mut clipped, limit.clip_length());
            clipped
        }
    };

    let final_chars = text.chars().count();
    tracing::warn!(
        original_chars,
        final_chars,
        limit = limit.character_limit,
        format = format.as_str(),
        "Tool output truncated"
    );
    if final_chars > limit.character_limit {
        tracing::warn!(final_chars, "Output still exceeds the limit after one truncation pass");
    }

    Ok(GuardedOutput {
        text,
        structured,
        truncated: true,
    })
}

/// Keep the first `ceil(n/2)` entries (or clip the text field), then mark the
/// object truncated.
fn truncate_structured(structured: Value, shape: PageShape, limit: &SizeLimit) -> Value {
    let mut map = match structured {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };

    match shape {
        PageShape::Entries(key) => {
            if let Some(Value::Array(entries)) = map.get_mut(key) {
                let kept = entries.len().div_ceil(2);
                entries.truncate(kept);
                map.insert("count".to_string(), Value::from(kept));
            }
        }
        PageShape::Text(key) => {
            if let Some(Value::String(body)) = map.get_mut(key) {
                clip_chars(body, limit.clip_length() / 2);
            }
        }
    }

    map.insert("truncated".to_string(), Value::Bool(true));
    map.insert(
        "truncation_message".to_string(),
        Value::String(TRUNCATION_MESSAGE.to_string()),
    );
    Value::Object(map)
}

/// Truncate `text` to at most `max_chars` characters on a char boundary.
pub fn clip_chars(text: &mut String, max_chars: usize) {
    if let Some((byte_index, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_index);
    }
}
