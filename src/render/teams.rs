//! Team and team-member listings.

use crate::api::types::{TeamMembersResponse, TeamsResponse};
use crate::render::format::DisplayZone;
use crate::render::{page_footer, page_object, RenderedPage};
use crate::types::Result;

pub const TEAMS_KEY: &str = "teams";
pub const MEMBERS_KEY: &str = "team_members";

pub fn render_teams(response: TeamsResponse, zone: &DisplayZone) -> Result<RenderedPage> {
    let next_cursor = response.next_cursor.as_deref();

    let markdown = if response.items.is_empty() {
        "No teams found.".to_string()
    } else {
        let mut lines = vec![
            "# Fathom Teams".to_string(),
            String::new(),
            format!("Showing {} team(s).", response.items.len()),
            String::new(),
        ];
        for team in &response.items {
            match &team.created_at {
                Some(created) => lines.push(format!(
                    "- **{}** (created {})",
                    team.name,
                    zone.format(created)
                )),
                None => lines.push(format!("- **{}**", team.name)),
            }
        }
        let mut doc = lines.join("\n");
        doc.push_str(&page_footer(next_cursor));
        doc
    };

    let structured = page_object(TEAMS_KEY, &response.items, next_cursor)?;
    Ok(RenderedPage::entries(structured, markdown, TEAMS_KEY))
}

pub fn render_team_members(
    response: TeamMembersResponse,
    zone: &DisplayZone,
) -> Result<RenderedPage> {
    let next_cursor = response.next_cursor.as_deref();

    let markdown = if response.items.is_empty() {
        "No team members found.".to_string()
    } else {
        let mut lines = vec![
            "# Fathom Team Members".to_string(),
            String::new(),
            format!("Showing {} member(s).", response.items.len()),
            String::new(),
        ];
        for member in &response.items {
            let mut line = format!("- **{}** ({})", member.name, member.email);
            if let Some(created) = &member.created_at {
                line.push_str(&format!(", joined {}", zone.format(created)));
            }
            lines.push(line);
        }
        let mut doc = lines.join("\n");
        doc.push_str(&page_footer(next_cursor));
        doc
    };

    let structured = page_object(MEMBERS_KEY, &response.items, next_cursor)?;
    Ok(RenderedPage::entries(structured, markdown, MEMBERS_KEY))
}
