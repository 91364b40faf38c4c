use std::fmt::Display;

use serde::Serialize;

/// How plates go on: mirrored on both sleeves of a bar, or a single stack
/// hung from a belt or vest.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Ord, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Loading {
    Barbell,
    SingleStack,
}

impl Loading {
    #[must_use]
    pub fn side_multiplier(&self) -> u32 {
        match self {
            Loading::Barbell => 2,
            Loading::SingleStack => 1,
        }
    }
}

impl Display for Loading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Loading::Barbell => write!(f, "Barbell"),
            Loading::SingleStack => write!(f, "Single stack"),
        }
    }
}
