// Settings module
// User-editable configuration, stored as settings.toml

use serde::{Deserialize, Serialize};

use super::timeline::{TimeSlot, Timeline, TimelineError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub open_hour: f64,
    pub close_hour: f64,
    pub daily_default_minutes: u32,
    pub pattern_default_minutes: u32,
    pub advice: AdviceSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            open_hour: 6.0,
            close_hour: 24.0,
            daily_default_minutes: 60,
            pattern_default_minutes: 30,
            advice: AdviceSettings::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        self.timeline().map_err(|e| e.to_string())?;

        for (label, minutes) in [
            ("daily_default_minutes", self.daily_default_minutes),
            ("pattern_default_minutes", self.pattern_default_minutes),
        ] {
            if minutes == 0 || minutes % 30 != 0 {
                return Err(format!("{} must be a positive multiple of 30", label));
            }
        }

        if self.advice.model.trim().is_empty() {
            return Err("Advice model cannot be empty".to_string());
        }
        if !self.advice.endpoint.starts_with("https://") {
            return Err("Advice endpoint must use HTTPS".to_string());
        }

        Ok(())
    }

    pub fn timeline(&self) -> Result<Timeline, TimelineError> {
        Timeline::from_hours(self.open_hour, self.close_hour)
    }

    /// Default create span of the daily grid, in half-hour slots.
    pub fn daily_default_slots(&self) -> u8 {
        minutes_to_slots(self.daily_default_minutes)
    }

    /// Default create span of the pattern editor, in half-hour slots.
    pub fn pattern_default_slots(&self) -> u8 {
        minutes_to_slots(self.pattern_default_minutes)
    }
}

fn minutes_to_slots(minutes: u32) -> u8 {
    let slots = (minutes / 30).max(1);
    u8::try_from(slots)
        .unwrap_or(TimeSlot::END_OF_DAY.half_hours())
        .min(TimeSlot::END_OF_DAY.half_hours())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceSettings {
    pub model: String,
    pub endpoint: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for AdviceSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.daily_default_slots(), 2);
        assert_eq!(settings.pattern_default_slots(), 1);
        assert_eq!(settings.timeline().unwrap(), Timeline::default());
    }

    #[test]
    fn test_validate_rejects_quarter_hours() {
        let settings = Settings {
            open_hour: 6.25,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_odd_default_span() {
        let settings = Settings {
            daily_default_minutes: 45,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_plain_http_endpoint() {
        let mut settings = Settings::default();
        settings.advice.endpoint = "http://localhost".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str("open_hour = 7.5\n[advice]\nmodel = \"m\"\n").unwrap();
        assert_eq!(settings.open_hour, 7.5);
        assert_eq!(settings.close_hour, 24.0);
        assert_eq!(settings.advice.model, "m");
        assert_eq!(settings.advice.api_key_env, "API_KEY");
    }
}
