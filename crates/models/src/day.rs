use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Day of the week a schedule entry recurs on
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    /// Parses a day code, ignoring surrounding whitespace
    pub fn parse_code(code: &str) -> Option<Self> {
        code.trim().parse().ok()
    }
}

#[cfg(feature = "database")]
crate::text_column!(DayOfWeek);
