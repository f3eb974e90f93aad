//! Conversion from configuration-file profiles into engine parameters.

use namaz_config::{CalculationProfile, HighLatitudeRuleConfig};
use thiserror::Error;

use crate::rules::{CalculationConfig, HighLatitudeRule};

/// Errors surfaced when a profile carries values the engine cannot use.
#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("{field} must be a positive number of degrees (got {value})")]
    InvalidAngle { field: &'static str, value: f64 },
    #[error("maghrib_angle must be a non-negative number of degrees (got {0})")]
    InvalidMaghribAngle(f64),
    #[error("asr_shadow_factor must be at least 1")]
    InvalidShadowFactor,
}

impl From<HighLatitudeRuleConfig> for HighLatitudeRule {
    fn from(value: HighLatitudeRuleConfig) -> Self {
        match value {
            HighLatitudeRuleConfig::MiddleOfNight => Self::MiddleOfNight,
            HighLatitudeRuleConfig::SeventhOfNight => Self::SeventhOfNight,
            HighLatitudeRuleConfig::AngleBased => Self::AngleBased,
        }
    }
}

/// Convert a `CalculationProfile` into a validated `CalculationConfig`.
pub fn from_profile(profile: &CalculationProfile) -> Result<CalculationConfig, ProfileError> {
    let fajr_angle = twilight_angle("fajr_angle", profile.fajr_angle)?;
    let isha_angle = twilight_angle("isha_angle", profile.isha_angle)?;
    if !profile.maghrib_angle.is_finite() || profile.maghrib_angle < 0.0 {
        return Err(ProfileError::InvalidMaghribAngle(profile.maghrib_angle));
    }
    if profile.asr_shadow_factor == 0 {
        return Err(ProfileError::InvalidShadowFactor);
    }

    Ok(CalculationConfig {
        fajr_angle,
        isha_angle,
        maghrib_angle: profile.maghrib_angle,
        asr_shadow_factor: profile.asr_shadow_factor,
        high_latitude_rule: profile.high_latitude_rule.into(),
    })
}

fn twilight_angle(field: &'static str, value: f64) -> Result<f64, ProfileError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ProfileError::InvalidAngle { field, value })
    }
}
