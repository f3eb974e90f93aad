//! Calculation parameters and the high-latitude twilight rule.

use serde::{Deserialize, Serialize};

/// Fallback applied to Fajr/Isha when the twilight angle crossing lands implausibly far
/// into the night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighLatitudeRule {
    /// Fajr no earlier than half the night before sunrise, Isha no later than half after sunset.
    #[default]
    MiddleOfNight,
    /// As above with a seventh of the night.
    SeventhOfNight,
    /// Use the raw angle crossing unchanged.
    AngleBased,
}

impl HighLatitudeRule {
    /// Clamp a raw morning crossing so it does not precede `sunrise - portion`.
    pub fn clamp_fajr(self, raw: f64, sunrise: f64, night: f64) -> f64 {
        match self {
            Self::MiddleOfNight => raw.max(sunrise - night / 2.0),
            Self::SeventhOfNight => raw.max(sunrise - night / 7.0),
            Self::AngleBased => raw,
        }
    }

    /// Clamp a raw evening crossing so it does not exceed `sunset + portion`.
    pub fn clamp_isha(self, raw: f64, sunset: f64, night: f64) -> f64 {
        match self {
            Self::MiddleOfNight => raw.min(sunset + night / 2.0),
            Self::SeventhOfNight => raw.min(sunset + night / 7.0),
            Self::AngleBased => raw,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MiddleOfNight => "middle of the night",
            Self::SeventhOfNight => "seventh of the night",
            Self::AngleBased => "angle based",
        }
    }
}

/// Angle and rule parameters for one calculation. Immutable and passed per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationConfig {
    /// Sun depression below the horizon at Fajr (degrees).
    pub fajr_angle: f64,
    /// Sun depression below the horizon at Isha (degrees).
    pub isha_angle: f64,
    /// Delay after sunset expressed in degrees of hour angle (15° per hour).
    pub maghrib_angle: f64,
    /// Shadow-length multiplier for Asr (1 standard, 2 for some schools).
    pub asr_shadow_factor: u32,
    pub high_latitude_rule: HighLatitudeRule,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            fajr_angle: 16.0,
            isha_angle: 14.0,
            maghrib_angle: 4.0,
            asr_shadow_factor: 1,
            high_latitude_rule: HighLatitudeRule::MiddleOfNight,
        }
    }
}

impl CalculationConfig {
    pub fn with_fajr_angle(mut self, degrees: f64) -> Self {
        self.fajr_angle = degrees;
        self
    }

    pub fn with_isha_angle(mut self, degrees: f64) -> Self {
        self.isha_angle = degrees;
        self
    }

    pub fn with_maghrib_angle(mut self, degrees: f64) -> Self {
        self.maghrib_angle = degrees;
        self
    }

    pub fn with_asr_shadow_factor(mut self, factor: u32) -> Self {
        self.asr_shadow_factor = factor;
        self
    }

    pub fn with_high_latitude_rule(mut self, rule: HighLatitudeRule) -> Self {
        self.high_latitude_rule = rule;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_jafari_parameters() {
        let config = CalculationConfig::default();
        assert_eq!(config.fajr_angle, 16.0);
        assert_eq!(config.isha_angle, 14.0);
        assert_eq!(config.maghrib_angle, 4.0);
        assert_eq!(config.asr_shadow_factor, 1);
        assert_eq!(config.high_latitude_rule, HighLatitudeRule::MiddleOfNight);
    }

    #[test]
    fn clamping_bounds_each_rule() {
        let (sunrise, sunset, night) = (4.0, 21.0, 7.0);
        let rule = HighLatitudeRule::MiddleOfNight;
        assert_eq!(rule.clamp_fajr(0.0, sunrise, night), 0.5);
        assert_eq!(rule.clamp_fajr(2.0, sunrise, night), 2.0);
        assert_eq!(rule.clamp_isha(24.0, sunset, night), 24.0);
        assert_eq!(rule.clamp_isha(23.0, sunset, night), 23.0);

        let rule = HighLatitudeRule::SeventhOfNight;
        assert_eq!(rule.clamp_fajr(0.0, sunrise, night), 3.0);
        assert_eq!(rule.clamp_isha(24.0, sunset, night), 22.0);

        let rule = HighLatitudeRule::AngleBased;
        assert_eq!(rule.clamp_fajr(0.0, sunrise, night), 0.0);
        assert_eq!(rule.clamp_isha(24.0, sunset, night), 24.0);
    }

    #[test]
    fn builder_overrides_single_fields() {
        let config = CalculationConfig::default()
            .with_fajr_angle(18.0)
            .with_asr_shadow_factor(2)
            .with_high_latitude_rule(HighLatitudeRule::AngleBased);
        assert_eq!(config.fajr_angle, 18.0);
        assert_eq!(config.isha_angle, 14.0);
        assert_eq!(config.asr_shadow_factor, 2);
        assert_eq!(config.high_latitude_rule, HighLatitudeRule::AngleBased);
    }
}
