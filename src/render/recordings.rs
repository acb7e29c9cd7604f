//! Single-recording payloads: summary and transcript.

use crate::api::types::{RecordingSummary, RecordingTranscript};
use crate::render::meetings::transcript_line;
use crate::render::RenderedPage;
use crate::types::Result;
use serde_json::json;

pub const TRANSCRIPT_KEY: &str = "transcript";
pub const SUMMARY_KEY: &str = "summary";

pub fn render_summary(recording_id: u64, payload: RecordingSummary) -> Result<RenderedPage> {
    let summary = payload.summary;
    let template = summary.as_ref().and_then(|s| s.template_name.clone());
    let text = summary
        .and_then(|s| s.markdown_formatted)
        .filter(|t| !t.trim().is_empty());

    let markdown = match &text {
        Some(body) => {
            let mut doc = format!("# Meeting Summary (recording {recording_id})\n");
            if let Some(template) = &template {
                doc.push_str(&format!("*Template: {template}*\n"));
            }
            doc.push('\n');
            doc.push_str(body.trim_end());
            doc
        }
        None => format!("No summary is available for recording {recording_id}."),
    };

    let structured = json!({
        "recording_id": recording_id,
        "template_name": template,
        SUMMARY_KEY: text,
    });
    Ok(RenderedPage::text(structured, markdown, SUMMARY_KEY))
}

pub fn render_transcript(recording_id: u64, payload: RecordingTranscript) -> Result<RenderedPage> {
    let entries = payload.transcript;

    let markdown = if entries.is_empty() {
        format!("No transcript is available for recording {recording_id}.")
    } else {
        let mut lines = vec![
            format!("# Meeting Transcript (recording {recording_id})"),
            String::new(),
        ];
        lines.extend(entries.iter().map(transcript_line));
        lines.join("\n")
    };

    let structured = json!({
        "recording_id": recording_id,
        "count": entries.len(),
        TRANSCRIPT_KEY: serde_json::to_value(&entries)?,
    });
    Ok(RenderedPage::entries(structured, markdown, TRANSCRIPT_KEY))
}
