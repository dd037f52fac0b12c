use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Academic term within a year
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
pub enum Term {
    S1,
    S2,
    S3,
}

#[cfg(feature = "database")]
crate::text_column!(Term);
