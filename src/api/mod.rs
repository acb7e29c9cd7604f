//! Fathom API access: transport seam, HTTP client, payload types.

pub mod client;
pub mod types;

#[cfg(test)]
pub use client::MockApiTransport;
pub use client::{error_detail, ApiTransport, FathomClient, API_KEY_HEADER};
pub use types::{
    Meeting, MeetingsResponse, PaginatedResponse, RecordingSummary, RecordingTranscript, Team,
    TeamMember, TeamMembersResponse, TeamsResponse,
};
