//! Fathom API payload types.
//!
//! Only the fields the renderers touch are modeled. Core record fields are
//! required; everything the API may omit is `Option` or defaults to empty so a
//! missing section degrades to "not rendered" rather than a decode failure.

use serde::{Deserialize, Serialize};

/// Paginated list response shared by every list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    pub items: Vec<T>,
}

/// Meeting record returned by `/meetings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub title: String,
    #[serde(default)]
    pub meeting_title: Option<String>,
    pub recording_id: u64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub share_url: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub scheduled_start_time: Option<String>,
    #[serde(default)]
    pub scheduled_end_time: Option<String>,
    #[serde(default)]
    pub recording_start_time: Option<String>,
    #[serde(default)]
    pub recording_end_time: Option<String>,
    #[serde(default)]
    pub calendar_invitees_domains_type: Option<String>,
    #[serde(default)]
    pub transcript_language: Option<String>,
    #[serde(default)]
    pub calendar_invitees: Vec<CalendarInvitee>,
    pub recorded_by: RecordedBy,
    #[serde(default)]
    pub transcript: Option<Vec<TranscriptEntry>>,
    #[serde(default)]
    pub default_summary: Option<Summary>,
    #[serde(default)]
    pub action_items: Option<Vec<ActionItem>>,
    #[serde(default)]
    pub crm_matches: Option<CrmMatches>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarInvitee {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub email_domain: Option<String>,
    #[serde(default)]
    pub is_external: bool,
    #[serde(default)]
    pub matched_speaker_display_name: Option<String>,
}

/// Owner of a recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedBy {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub email_domain: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Speaker {
    pub display_name: String,
    #[serde(default)]
    pub matched_calendar_invitee_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub template_name: Option<String>,
    #[serde(default)]
    pub markdown_formatted: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub description: String,
    #[serde(default)]
    pub user_generated: bool,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub recording_timestamp: Option<String>,
    #[serde(default)]
    pub recording_playback_url: Option<String>,
    #[serde(default)]
    pub assignee: Option<Assignee>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignee {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
}

/// CRM matches. `error` is set when the CRM provider could not be queried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmMatches {
    #[serde(default)]
    pub contacts: Option<Vec<CrmContact>>,
    #[serde(default)]
    pub companies: Option<Vec<CrmCompany>>,
    #[serde(default)]
    pub deals: Option<Vec<CrmDeal>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmContact {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub record_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmCompany {
    pub name: String,
    pub record_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmDeal {
    pub name: String,
    #[serde(default)]
    pub amount: Option<f64>,
    pub record_url: String,
}

/// Team returned by `/teams`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Member returned by `/team_members`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `/recordings/{id}/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSummary {
    #[serde(default)]
    pub summary: Option<Summary>,
}

/// Body of `/recordings/{id}/transcript`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingTranscript {
    #[serde(default)]
    pub transcript: Vec<TranscriptEntry>,
}

pub type MeetingsResponse = PaginatedResponse<Meeting>;
pub type TeamsResponse = PaginatedResponse<Team>;
pub type TeamMembersResponse = PaginatedResponse<TeamMember>;
