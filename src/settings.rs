use std::{fmt::Display, fs, path::Path, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::{
    equipment::{Equipment, SessionTiming},
    plate::{Inventory, Plate, STANDARD_WEIGHTS},
    scheme::Scheme,
    warmup_error::WarmupError,
    weight::Weight,
};

const MAX_BAR_WEIGHT: Weight = Weight::whole(45);
const DEFAULT_BACKOFF_PERCENTAGE: u32 = 80;

/// Saved preferences, in the same JSON shape the web app keeps them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(deserialize_with = "blank_as_none")]
    pub session_timing: Option<SessionTiming>,
    #[serde(deserialize_with = "blank_as_none")]
    pub equipment_type: Option<Equipment>,
    #[serde(deserialize_with = "clamped_weight")]
    pub bar_weight: Weight,
    pub available_plates: Vec<Plate>,
    pub minimize_plate_changes: bool,
    pub bodyweight: Weight,
    pub is_weighted_bodyweight: bool,
    pub num_warmup_sets: Option<usize>,
    pub enable_backoff: bool,
    pub backoff_percentage: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session_timing: None,
            equipment_type: None,
            bar_weight: Weight::whole(45),
            available_plates: Inventory::standard().plates(),
            minimize_plate_changes: false,
            bodyweight: Weight::ZERO,
            is_weighted_bodyweight: false,
            num_warmup_sets: None,
            enable_backoff: false,
            backoff_percentage: DEFAULT_BACKOFF_PERCENTAGE,
        }
    }
}

impl Settings {
    ///
    /// # Errors
    /// If the file cannot be read or is not valid settings JSON.
    ///
    pub fn load(path: &Path) -> Result<Self, WarmupError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    ///
    /// # Errors
    /// If `raw` is not valid settings JSON.
    ///
    pub fn from_json(raw: &str) -> Result<Self, WarmupError> {
        let settings: Settings = serde_json::from_str(raw)?;
        Ok(settings.normalized())
    }

    /// Bar weight snapped to a multiple of 5 no heavier than 45; plate list
    /// laid over the standard weights, unknown ones available except 55.
    #[must_use]
    pub fn normalized(self) -> Self {
        let saved = Inventory::new(self.available_plates.iter().copied());
        let plates = STANDARD_WEIGHTS
            .iter()
            .map(|weight| {
                let available = saved
                    .plates()
                    .iter()
                    .find(|plate| plate.weight == *weight)
                    .map_or(*weight != Weight::whole(55), |plate| plate.available);
                Plate::new(*weight, available)
            })
            .collect();

        Settings {
            bar_weight: self.bar_weight.round_to(Weight::FIVE).min(MAX_BAR_WEIGHT),
            available_plates: plates,
            backoff_percentage: self.backoff_percentage.min(100),
            ..self
        }
    }

    #[must_use]
    pub fn inventory(&self) -> Inventory {
        Inventory::new(self.available_plates.iter().copied())
    }

    #[must_use]
    pub fn equipment(&self) -> Equipment {
        self.equipment_type.unwrap_or(match self.is_weighted_bodyweight {
            true => Equipment::WeightedBodyweight,
            false => Equipment::Barbell,
        })
    }

    #[must_use]
    pub fn session_timing(&self) -> SessionTiming {
        self.session_timing.unwrap_or_default()
    }

    /// The scheme the saved journey selects.
    #[must_use]
    pub fn scheme(&self) -> Scheme {
        self.equipment().auto_scheme(self.session_timing())
    }

    /// Bodyweight movements fall back to 150 when none was saved.
    #[must_use]
    pub fn bodyweight(&self) -> Weight {
        match self.bodyweight.is_zero() && self.equipment().is_bodyweight() {
            true => Weight::whole(150),
            false => self.bodyweight,
        }
    }

    #[must_use]
    pub fn backoff(&self) -> Option<u32> {
        self.enable_backoff.then_some(self.backoff_percentage)
    }
}

/// An empty or missing choice means none was made yet.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Negative weights clamp to zero instead of failing the whole file.
fn clamped_weight<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weight, D::Error> {
    f64::deserialize(deserializer).map(Weight::from_f64)
}
