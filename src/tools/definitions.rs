//! Field contracts for every Fathom tool.
//!
//! These are fixed data: names, types, defaults and descriptions mirror the
//! Fathom external API's query parameters.

use crate::tools::catalog::{Constraints, ParamDef, ParamLocation, ParamType, ToolCatalog, ToolEntry};
use crate::tools::enums::{CalendarInviteesDomainType, ResponseFormat, ToolAnnotations, ToolKind};
use crate::types::Result;
use serde_json::json;

pub const LIST_MEETINGS: &str = "fathom_list_meetings";
pub const LIST_TEAMS: &str = "fathom_list_teams";
pub const LIST_TEAM_MEMBERS: &str = "fathom_list_team_members";
pub const GET_SUMMARY: &str = "fathom_get_summary";
pub const GET_TRANSCRIPT: &str = "fathom_get_transcript";

const CURSOR_DESCRIPTION: &str =
    "Cursor for pagination. Pass the next_cursor value from a previous response to fetch the next page.";

/// Catalog with every Fathom tool registered.
pub fn fathom_catalog() -> Result<ToolCatalog> {
    let mut catalog = ToolCatalog::new();
    catalog.register(list_meetings())?;
    catalog.register(list_teams())?;
    catalog.register(list_team_members())?;
    catalog.register(get_summary())?;
    catalog.register(get_transcript())?;
    Ok(catalog)
}

fn optional(inner: ParamType) -> ParamType {
    ParamType::Optional(Box::new(inner))
}

fn string_list() -> ParamType {
    optional(ParamType::List(Box::new(ParamType::String)))
}

fn cursor() -> ParamDef {
    ParamDef::new("cursor", optional(ParamType::String), CURSOR_DESCRIPTION)
}

fn response_format() -> ParamDef {
    ParamDef::new(
        "response_format",
        ParamType::Enum(
            ResponseFormat::ALL
                .iter()
                .map(|f| f.as_str().to_string())
                .collect(),
        ),
        "Output format: 'markdown' for human-readable or 'json' for structured data.",
    )
    .with_default(json!(ResponseFormat::Markdown.as_str()))
    .at(ParamLocation::Local)
}

fn detail_flag(name: &str, description: &str) -> ParamDef {
    ParamDef::new(name, ParamType::Bool, description).with_default(json!(false))
}

fn recording_id(description: &str) -> ParamDef {
    ParamDef::new("recording_id", ParamType::Int, description)
        .at(ParamLocation::Path)
        .with_constraints(Constraints {
            minimum: Some(1),
            ..Constraints::default()
        })
}

fn list_meetings() -> ToolEntry {
    ToolEntry {
        id: LIST_MEETINGS.to_string(),
        title: "List Fathom meetings".to_string(),
        description: "List recorded Fathom meetings, newest first, with optional filters by \
            date, team, recorder and invitee domain. Can include summaries, transcripts, action \
            items and CRM matches. Results are paginated: pass next_cursor back as cursor to \
            continue."
            .to_string(),
        endpoint: "/meetings".to_string(),
        kind: ToolKind::ListMeetings,
        parameters: vec![
            ParamDef::new(
                "calendar_invitees_domains",
                string_list(),
                "Return meetings where any of the given company domains appear. Example: ['acme.com', 'client.com']",
            ),
            ParamDef::new(
                "calendar_invitees_domains_type",
                ParamType::Enum(
                    CalendarInviteesDomainType::ALL
                        .iter()
                        .map(|t| t.as_str().to_string())
                        .collect(),
                ),
                "Filter by whether the invitee list includes external email domains: all, only_internal, one_or_more_external.",
            )
            .with_default(json!(CalendarInviteesDomainType::All.as_str())),
            ParamDef::new(
                "created_after",
                optional(ParamType::String),
                "Only meetings created after this ISO 8601 timestamp, e.g. 2026-01-01T00:00:00Z.",
            ),
            ParamDef::new(
                "created_before",
                optional(ParamType::String),
                "Only meetings created before this ISO 8601 timestamp, e.g. 2026-01-01T00:00:00Z.",
            ),
            cursor(),
            detail_flag("include_action_items", "Include the action items for each meeting."),
            detail_flag(
                "include_crm_matches",
                "Include CRM matches for each meeting. Only returns data from your or your team's linked CRM.",
            ),
            detail_flag("include_summary", "Include the summary for each meeting."),
            detail_flag("include_transcript", "Include the transcript for each meeting."),
            ParamDef::new(
                "recorded_by",
                optional(ParamType::List(Box::new(ParamType::Email))),
                "Email addresses of users who recorded meetings. Returns meetings recorded by any of them.",
            ),
            ParamDef::new(
                "teams",
                string_list(),
                "Team names to filter by. Returns meetings that belong to any of the given teams.",
            ),
            response_format(),
        ],
        annotations: ToolAnnotations::read_only(),
    }
}

fn list_teams() -> ToolEntry {
    ToolEntry {
        id: LIST_TEAMS.to_string(),
        title: "List Fathom teams".to_string(),
        description: "List the teams in the Fathom workspace. Results are paginated.".to_string(),
        endpoint: "/teams".to_string(),
        kind: ToolKind::ListTeams,
        parameters: vec![cursor(), response_format()],
        annotations: ToolAnnotations::read_only(),
    }
}

fn list_team_members() -> ToolEntry {
    ToolEntry {
        id: LIST_TEAM_MEMBERS.to_string(),
        title: "List Fathom team members".to_string(),
        description: "List members of the Fathom workspace, optionally for a single team. \
            Results are paginated."
            .to_string(),
        endpoint: "/team_members".to_string(),
        kind: ToolKind::ListTeamMembers,
        parameters: vec![
            ParamDef::new("team", optional(ParamType::String), "Filter by team name."),
            cursor(),
            response_format(),
        ],
        annotations: ToolAnnotations::read_only(),
    }
}

fn get_summary() -> ToolEntry {
    ToolEntry {
        id: GET_SUMMARY.to_string(),
        title: "Get Fathom meeting summary".to_string(),
        description: "Fetch the AI-generated summary of one recorded meeting.".to_string(),
        endpoint: "/recordings/{recording_id}/summary".to_string(),
        kind: ToolKind::GetSummary,
        parameters: vec![
            recording_id("The ID of the meeting recording to fetch the summary for."),
            response_format(),
        ],
        annotations: ToolAnnotations::read_only(),
    }
}

fn get_transcript() -> ToolEntry {
    ToolEntry {
        id: GET_TRANSCRIPT.to_string(),
        title: "Get Fathom meeting transcript".to_string(),
        description: "Fetch the speaker-attributed transcript of one recorded meeting.".to_string(),
        endpoint: "/recordings/{recording_id}/transcript".to_string(),
        kind: ToolKind::GetTranscript,
        parameters: vec![
            recording_id("The ID of the meeting recording to fetch the transcript for."),
            response_format(),
        ],
        annotations: ToolAnnotations::read_only(),
    }
}
