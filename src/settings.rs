//! Game settings and preferences
//!
//! Owned by the storage collaborator; the core reads a snapshot per tick or
//! action and never mutates it.

use serde::{Deserialize, Serialize};

/// How the flap control is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum InputMode {
    /// Every press is one flap
    #[default]
    Tap,
    /// Holding the control softens the fall (accessibility assist)
    Hold,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Tap => "tap",
            InputMode::Hold => "hold",
        }
    }

    /// Parse a mode name; unknown names fall back to `Tap`
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hold" => InputMode::Hold,
            _ => InputMode::Tap,
        }
    }
}

impl From<String> for InputMode {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Difficulty {
    Soft,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Soft => "soft",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse a difficulty name; unknown names fall back to `Normal`
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "soft" | "easy" => Difficulty::Soft,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Normal,
        }
    }
}

impl From<String> for Difficulty {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    // === Audio / haptics ===
    pub sound: bool,
    pub music: bool,
    pub vibration: bool,

    // === Accessibility ===
    /// Reduced motion (no tilt easing)
    pub reduced_motion: bool,
    /// High contrast mode (presentation only)
    pub high_contrast: bool,

    // === Gameplay ===
    pub input: InputMode,
    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: true,
            music: true,
            vibration: true,
            reduced_motion: false,
            high_contrast: false,
            input: InputMode::Tap,
            difficulty: Difficulty::Normal,
        }
    }
}

impl Settings {
    /// Hold-assist is active only in hold mode while the control is down
    pub fn hold_assist(&self, flap_held: bool) -> bool {
        self.input == InputMode::Hold && flap_held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"reducedMotion\":false"));
        assert!(json.contains("\"input\":\"tap\""));
        assert!(json.contains("\"difficulty\":\"normal\""));
    }

    #[test]
    fn test_unknown_values_degrade_to_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "input": "joystick", "difficulty": "insane" }"#).unwrap();
        assert_eq!(settings.input, InputMode::Tap);
        assert_eq!(settings.difficulty, Difficulty::Normal);
        // Missing fields keep defaults
        assert!(settings.sound);
    }

    #[test]
    fn test_known_values_parse() {
        let settings: Settings =
            serde_json::from_str(r#"{ "input": "hold", "difficulty": "hard" }"#).unwrap();
        assert_eq!(settings.input, InputMode::Hold);
        assert_eq!(settings.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_hold_assist_requires_hold_mode() {
        let mut settings = Settings::default();
        assert!(!settings.hold_assist(true));
        settings.input = InputMode::Hold;
        assert!(settings.hold_assist(true));
        assert!(!settings.hold_assist(false));
    }
}
