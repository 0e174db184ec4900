//! Theme preference, persisted as a plain string record.

/// The two supported color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Dark color scheme.
    Dark,
    /// Light color scheme (the default).
    #[default]
    Light,
}

impl Theme {
    /// The persisted spelling: `"dark"` or `"light"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Parses a stored value; anything unrecognized falls back to the default.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            Some("light") => Self::Light,
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        assert_eq!(Theme::from_stored(Some(Theme::Dark.as_str())), Theme::Dark);
        assert_eq!(Theme::from_stored(Some(Theme::Light.as_str())), Theme::Light);
    }

    #[test]
    fn test_unknown_value_falls_back_to_default() {
        assert_eq!(Theme::from_stored(Some("solarized")), Theme::Light);
        assert_eq!(Theme::from_stored(None), Theme::Light);
    }
}
