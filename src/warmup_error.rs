use thiserror::Error;

use crate::weight::Weight;

#[derive(Error, Debug)]
pub enum WarmupError {
    #[error("Invalid weight '{0}'.")]
    InvalidWeight(String),
    #[error("Unknown warm-up scheme '{0}'.")]
    UnknownScheme(String),
    #[error("Unknown equipment '{0}'.")]
    UnknownEquipment(String),
    #[error("Unknown session timing '{0}'.")]
    UnknownSessionTiming(String),
    #[error("Working weight must be positive, got {0}.")]
    NonPositiveTarget(Weight),
    #[error("A positive bodyweight is required.")]
    MissingBodyweight,
    #[error("Invalid set '{0}', expected weight x reps.")]
    InvalidRepSet(String),
    #[error("Unknown max estimate method '{0}'.")]
    UnknownMaxMethod(String),
    #[error("Unknown lift '{0}'.")]
    UnknownLift(String),
    #[error("Enter positive weight and reps (at most 30) to estimate a max.")]
    NoValidSets,
    #[error("Cannot read settings: {0}")]
    SettingsIo(#[from] std::io::Error),
    #[error("Invalid settings: {0}")]
    SettingsFormat(#[from] serde_json::Error),
}
