//! Tool layer: field contracts, validation, query building, execution.

pub mod catalog;
pub mod definitions;
pub mod enums;
pub mod executor;
pub mod query;
pub mod result;

pub use catalog::{
    Constraints, ParamDef, ParamLocation, ParamType, ToolCatalog, ToolEntry, ToolInput,
};
pub use definitions::{
    fathom_catalog, GET_SUMMARY, GET_TRANSCRIPT, LIST_MEETINGS, LIST_TEAMS, LIST_TEAM_MEMBERS,
};
pub use enums::{CalendarInviteesDomainType, ResponseFormat, ToolAnnotations, ToolKind};
pub use executor::ToolExecutor;
pub use query::{QueryParameters, QueryValue};
pub use result::ToolResult;
