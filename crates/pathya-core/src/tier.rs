//! Administrative hierarchy tiers.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A tier of the school-system administrative hierarchy.
///
/// Requisitions and issues flow upward: a school raises them, the block and
/// district review them, and the state fulfills or finally decides them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminTier {
    School,
    Block,
    District,
    State,
}

impl AdminTier {
    /// The tier an escalation advances to, or `None` at the top of the
    /// hierarchy.
    #[must_use]
    pub fn next_up(self) -> Option<AdminTier> {
        match self {
            AdminTier::School => Some(AdminTier::Block),
            AdminTier::Block => Some(AdminTier::District),
            AdminTier::District => Some(AdminTier::State),
            AdminTier::State => None,
        }
    }

    /// Whether this tier reviews requisitions (block and district do; the
    /// state fulfills rather than reviews, schools only raise).
    #[must_use]
    pub fn reviews_requisitions(self) -> bool {
        matches!(self, AdminTier::Block | AdminTier::District)
    }
}

impl Display for AdminTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AdminTier::School => "SCHOOL",
            AdminTier::Block => "BLOCK",
            AdminTier::District => "DISTRICT",
            AdminTier::State => "STATE",
        };
        write!(f, "{name}")
    }
}
