#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod bar;
pub mod calculator;
pub mod decompose;
pub mod equipment;
pub mod loading;
pub mod loadout;
pub mod optimizer;
pub mod plate;
pub mod plating;
pub mod reachable;
pub mod rep_max;
pub mod scheme;
pub mod settings;
pub mod strength;
pub mod warmup_error;
pub mod warmup_set;
pub mod weight;
