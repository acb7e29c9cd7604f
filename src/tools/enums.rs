//! Core enumerations shared by tool contracts and renderers.

use serde::{Deserialize, Serialize};

/// Output format selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    #[default]
    Markdown,
    Json,
}

impl ResponseFormat {
    pub const ALL: [ResponseFormat; 2] = [ResponseFormat::Markdown, ResponseFormat::Json];

    pub fn as_str(self) -> &'static str {
        match self {
            ResponseFormat::Markdown => "markdown",
            ResponseFormat::Json => "json",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

/// Calendar invitee domain classification.
///
/// `All` is only meaningful as a filter; records are always one of the other two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarInviteesDomainType {
    All,
    OnlyInternal,
    OneOrMoreExternal,
}

impl CalendarInviteesDomainType {
    pub const ALL: [CalendarInviteesDomainType; 3] = [
        CalendarInviteesDomainType::All,
        CalendarInviteesDomainType::OnlyInternal,
        CalendarInviteesDomainType::OneOrMoreExternal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CalendarInviteesDomainType::All => "all",
            CalendarInviteesDomainType::OnlyInternal => "only_internal",
            CalendarInviteesDomainType::OneOrMoreExternal => "one_or_more_external",
        }
    }
}

/// Which pipeline a tool runs: decides payload decoding and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    ListMeetings,
    ListTeams,
    ListTeamMembers,
    GetSummary,
    GetTranscript,
}

/// MCP behavior hints advertised in `tools/list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    pub read_only_hint: bool,
    pub destructive_hint: bool,
    pub idempotent_hint: bool,
    pub open_world_hint: bool,
}

impl ToolAnnotations {
    /// Read-only, non-destructive, idempotent, open-world.
    pub const fn read_only() -> Self {
        Self {
            read_only_hint: true,
            destructive_hint: false,
            idempotent_hint: true,
            open_world_hint: true,
        }
    }
}
