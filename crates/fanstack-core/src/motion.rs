#![forbid(unsafe_code)]

//! Reduced-motion preference.
//!
//! Reduced motion is a mode switch, not an error: it disables drag-initiated
//! navigation, entrance animations and auto-advance while keeping click, dot
//! and keyboard navigation intact.

/// Environment variable forcing the preference (`1/0/true/false/yes/no/on/off`).
const ENV_REDUCED_MOTION: &str = "FANSTACK_REDUCED_MOTION";

/// User motion preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPreference {
    /// Animations, swipes and auto-advance are all allowed.
    #[default]
    Full,
    /// The user asked for reduced motion.
    Reduced,
}

impl MotionPreference {
    /// Detect the preference from the process environment.
    #[must_use]
    pub fn detect() -> Self {
        let preference = Self::from_env_with(|key| std::env::var(key).ok());
        tracing::debug!(?preference, "motion preference detected");
        preference
    }

    /// Detect the preference using a custom environment lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match get_env(ENV_REDUCED_MOTION).and_then(|v| parse_bool(&v)) {
            Some(true) => Self::Reduced,
            _ => Self::Full,
        }
    }

    /// Build from a plain flag.
    #[must_use]
    pub const fn from_reduced(reduced: bool) -> Self {
        if reduced { Self::Reduced } else { Self::Full }
    }

    /// Whether motion should be reduced.
    #[must_use]
    pub const fn is_reduced(self) -> bool {
        matches!(self, Self::Reduced)
    }
}

/// Parse a boolean environment value.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn map_env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn detect(pairs: &[(&str, &str)]) -> MotionPreference {
        let env = map_env(pairs);
        MotionPreference::from_env_with(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_to_full() {
        assert_eq!(detect(&[]), MotionPreference::Full);
        assert!(!MotionPreference::default().is_reduced());
    }

    #[test]
    fn env_truthy_reduces() {
        assert_eq!(
            detect(&[(ENV_REDUCED_MOTION, "yes")]),
            MotionPreference::Reduced
        );
        assert_eq!(
            detect(&[(ENV_REDUCED_MOTION, " ON ")]),
            MotionPreference::Reduced
        );
    }

    #[test]
    fn env_falsy_or_garbage_keeps_full() {
        assert_eq!(detect(&[(ENV_REDUCED_MOTION, "0")]), MotionPreference::Full);
        assert_eq!(
            detect(&[(ENV_REDUCED_MOTION, "sometimes")]),
            MotionPreference::Full
        );
    }

    #[test]
    fn parse_bool_truthy_and_falsy() {
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn from_reduced_round_trips() {
        assert!(MotionPreference::from_reduced(true).is_reduced());
        assert!(!MotionPreference::from_reduced(false).is_reduced());
    }
}
