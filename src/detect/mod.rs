//! Project-level facts: router style, styling, state and data libraries,
//! and the route table.

pub mod patterns;
pub mod routes;

pub use patterns::{detect_framework, PatternDetector};
pub use routes::{extract_routes, RouteKind, RouteRecord, RouteTable};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouterStyle {
    App,
    Pages,
    Unknown,
}

impl RouterStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouterStyle::App => "app",
            RouterStyle::Pages => "pages",
            RouterStyle::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RouterStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFacts {
    pub router: RouterStyle,
    pub typescript: bool,
    pub tailwind: bool,
    pub styling: String,
    pub state_management: String,
    pub data_fetching: String,
    #[serde(default, skip_serializing_if = "RouteTable::is_empty")]
    pub routes: RouteTable,
}
