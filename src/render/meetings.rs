//! Meeting projection and markdown layout.
//!
//! The structured view is built first; markdown is computed from the view, so
//! both formats always agree on which entries and detail sections exist.

use crate::api::types::{
    ActionItem, CalendarInvitee, CrmMatches, Meeting, MeetingsResponse, RecordedBy,
    TranscriptEntry,
};
use crate::render::format::{duration_minutes, format_duration, DisplayZone};
use crate::render::{page_footer, page_object, RenderedPage};
use crate::tools::catalog::ToolInput;
use crate::types::Result;
use serde::Serialize;

pub const ENTRIES_KEY: &str = "meetings";

/// Which detail sections the caller asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailFlags {
    pub summary: bool,
    pub transcript: bool,
    pub action_items: bool,
    pub crm_matches: bool,
}

impl DetailFlags {
    pub fn from_input(input: &ToolInput) -> Self {
        Self {
            summary: input.flag("include_summary"),
            transcript: input.flag("include_transcript"),
            action_items: input.flag("include_action_items"),
            crm_matches: input.flag("include_crm_matches"),
        }
    }
}

/// Reduced, model-facing projection of one meeting.
#[derive(Debug, Clone, Serialize)]
pub struct MeetingView {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_title: Option<String>,
    pub recording_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_url: Option<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    pub external: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_language: Option<String>,
    pub recorded_by: RecordedBy,
    pub calendar_invitees: Vec<CalendarInvitee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Vec<TranscriptEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_items: Option<Vec<ActionItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crm_matches: Option<CrmMatches>,
}

impl MeetingView {
    /// Project a meeting. Detail sections survive only when requested and
    /// actually present on the record.
    pub fn project(meeting: Meeting, flags: DetailFlags) -> Self {
        let duration = duration_minutes(
            meeting.recording_start_time.as_deref(),
            meeting.recording_end_time.as_deref(),
        );
        let meeting_title = meeting
            .meeting_title
            .filter(|alias| !alias.is_empty() && *alias != meeting.title);
        let external =
            meeting.calendar_invitees_domains_type.as_deref() == Some("one_or_more_external");

        let summary = meeting
            .default_summary
            .and_then(|s| s.markdown_formatted)
            .filter(|text| flags.summary && !text.trim().is_empty());
        let transcript = meeting
            .transcript
            .filter(|entries| flags.transcript && !entries.is_empty());
        let action_items = meeting
            .action_items
            .filter(|items| flags.action_items && !items.is_empty());
        let crm_matches = meeting
            .crm_matches
            .filter(|crm| flags.crm_matches && crm_has_content(crm));

        Self {
            title: meeting.title,
            meeting_title,
            recording_id: meeting.recording_id,
            url: meeting.url,
            share_url: meeting.share_url,
            created_at: meeting.created_at,
            scheduled_start_time: meeting.scheduled_start_time,
            scheduled_end_time: meeting.scheduled_end_time,
            recording_start_time: meeting.recording_start_time,
            recording_end_time: meeting.recording_end_time,
            duration_minutes: duration,
            external,
            transcript_language: meeting.transcript_language,
            recorded_by: meeting.recorded_by,
            calendar_invitees: meeting.calendar_invitees,
            summary,
            transcript,
            action_items,
            crm_matches,
        }
    }

    pub fn to_markdown(&self, zone: &DisplayZone) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("## {}", self.title));
        if let Some(alias) = &self.meeting_title {
            lines.push(format!("*Meeting title: {alias}*"));
        }
        lines.push(String::new());

        lines.push(format!("- **Recording ID:** {}", self.recording_id));
        lines.push(format!("- **Date:** {}", zone.format(&self.created_at)));
        if let Some(minutes) = self.duration_minutes {
            lines.push(format!("- **Meeting duration:** {}", format_duration(minutes)));
        }
        let meeting_type = if self.external { "External" } else { "Internal" };
        lines.push(format!("- **Meeting type:** {meeting_type}"));
        lines.push(format!(
            "- **Recorded by:** {} ({})",
            self.recorded_by.name, self.recorded_by.email
        ));
        if let Some(team) = self.recorded_by.team.as_deref().filter(|t| !t.is_empty()) {
            lines.push(format!("- **Team:** {team}"));
        }
        if let Some(url) = &self.url {
            lines.push(format!("- **Fathom URL:** {url}"));
        }
        lines.push(String::new());

        if !self.calendar_invitees.is_empty() {
            lines.push("### Participants".to_string());
            for invitee in &self.calendar_invitees {
                lines.push(participant_line(invitee));
            }
            lines.push(String::new());
        }

        if let Some(summary) = &self.summary {
            lines.push("### Meeting Summary".to_string());
            lines.push(summary.trim_end().to_string());
            lines.push(String::new());
        }

        if let Some(transcript) = &self.transcript {
            lines.push("### Transcript".to_string());
            lines.extend(transcript.iter().map(transcript_line));
            lines.push(String::new());
        }

        if let Some(items) = &self.action_items {
            lines.push("### Action Items".to_string());
            lines.extend(items.iter().map(action_item_line));
            lines.push(String::new());
        }

        if let Some(crm) = &self.crm_matches {
            push_crm(&mut lines, crm);
        }

        lines.join("\n")
    }
}

fn crm_has_content(crm: &CrmMatches) -> bool {
    crm.error.as_deref().is_some_and(|e| !e.is_empty())
        || crm.contacts.as_ref().is_some_and(|c| !c.is_empty())
        || crm.companies.as_ref().is_some_and(|c| !c.is_empty())
        || crm.deals.as_ref().is_some_and(|d| !d.is_empty())
}

fn participant_line(invitee: &CalendarInvitee) -> String {
    let external = if invitee.is_external { " (external)" } else { "" };
    match invitee.name.as_deref().filter(|n| !n.is_empty()) {
        Some(name) => format!("- {name} ({}){external}", invitee.email),
        None => format!("- {}{external}", invitee.email),
    }
}

pub(crate) fn transcript_line(entry: &TranscriptEntry) -> String {
    format!(
        "- **[{}] {}:** {}",
        entry.timestamp, entry.speaker.display_name, entry.text
    )
}

fn action_item_line(item: &ActionItem) -> String {
    let mut line = String::from(if item.completed { "[X] " } else { "[ ] " });
    line.push_str(&item.description);
    if let Some(assignee) = &item.assignee {
        line.push_str(&format!(" @{}", assignee.name));
    }
    if let Some(timestamp) = item.recording_timestamp.as_deref().filter(|t| !t.is_empty()) {
        line.push_str(&format!(" ({timestamp})"));
    }
    line
}

fn push_crm(lines: &mut Vec<String>, crm: &CrmMatches) {
    if let Some(error) = crm.error.as_deref().filter(|e| !e.is_empty()) {
        lines.push(format!("*CRM: {error}*"));
        lines.push(String::new());
        return;
    }

    lines.push("### CRM Matches".to_string());
    lines.push(String::new());

    if let Some(contacts) = crm.contacts.as_ref().filter(|c| !c.is_empty()) {
        lines.push("*Contacts*".to_string());
        for contact in contacts {
            match contact.email.as_deref().filter(|e| !e.is_empty()) {
                Some(email) => lines.push(format!(
                    "- {} ({email}) [{}]",
                    contact.name, contact.record_url
                )),
                None => lines.push(format!("- {} [{}]", contact.name, contact.record_url)),
            }
        }
        lines.push(String::new());
    }

    if let Some(companies) = crm.companies.as_ref().filter(|c| !c.is_empty()) {
        lines.push("*Companies*".to_string());
        for company in companies {
            lines.push(format!("- {} [{}]", company.name, company.record_url));
        }
        lines.push(String::new());
    }

    if let Some(deals) = crm.deals.as_ref().filter(|d| !d.is_empty()) {
        lines.push("*Deals*".to_string());
        for deal in deals {
            match deal.amount {
                Some(amount) => lines.push(format!(
                    "- {} (${amount}) [{}]",
                    deal.name, deal.record_url
                )),
                None => lines.push(format!("- {} [{}]", deal.name, deal.record_url)),
            }
        }
        lines.push(String::new());
    }
}

/// Render a `/meetings` page.
pub fn render_meetings(
    response: MeetingsResponse,
    flags: DetailFlags,
    zone: &DisplayZone,
) -> Result<RenderedPage> {
    let next_cursor = response.next_cursor;
    let views: Vec<MeetingView> = response
        .items
        .into_iter()
        .map(|meeting| MeetingView::project(meeting, flags))
        .collect();

    let markdown = if views.is_empty() {
        "No meetings found.".to_string()
    } else {
        let mut doc = format!("# Fathom Meetings\n\nShowing {} meeting(s).\n\n", views.len());
        let blocks: Vec<String> = views.iter().map(|v| v.to_markdown(zone)).collect();
        doc.push_str(blocks.join("\n").trim_end());
        doc.push_str(&page_footer(next_cursor.as_deref()));
        doc
    };

    let structured = page_object(ENTRIES_KEY, &views, next_cursor.as_deref())?;
    Ok(RenderedPage::entries(structured, markdown, ENTRIES_KEY))
}
