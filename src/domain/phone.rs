//! Mobile-number locales and their phone patterns.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static ID_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+?62|0)8(1[123456789]|2[1238]|3[1238]|5[12356789]|7[78]|9[56789]|8[123456789])([\s?|\d]{5,11})$")
        .expect("Failed to compile id-ID mobile regex")
});

static EN_US_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((\+1|1)?( |-)?)?(\([2-9][0-9]{2}\)|[2-9][0-9]{2})( |-)?([2-9][0-9]{2}( |-)?[0-9]{4})$")
        .expect("Failed to compile en-US mobile regex")
});

static EN_GB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+?44|0)7\d{9}$").expect("Failed to compile en-GB mobile regex")
});

static MS_MY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+?60|0)1(([0145](-|\s)?\d{7,8})|([236-9](-|\s)?\d{7}))$")
        .expect("Failed to compile ms-MY mobile regex")
});

/// Locale whose mobile-number plan a phone must follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MobileLocale {
    /// Indonesia: `08xx...` or `+628xx...`
    #[default]
    IdId,
    /// United States / NANP
    EnUs,
    /// United Kingdom: `07...` or `+447...`
    EnGb,
    /// Malaysia: `01x...` or `+601x...`
    MsMy,
}

impl MobileLocale {
    /// Every supported locale, in declaration order.
    pub const ALL: [MobileLocale; 4] = [Self::IdId, Self::EnUs, Self::EnGb, Self::MsMy];

    /// BCP 47 style tag, e.g. `id-ID`.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::IdId => "id-ID",
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
            Self::MsMy => "ms-MY",
        }
    }

    /// Does `phone` match this locale's mobile pattern?
    pub fn matches(&self, phone: &str) -> bool {
        let pattern: &Regex = match self {
            Self::IdId => &ID_ID_RE,
            Self::EnUs => &EN_US_RE,
            Self::EnGb => &EN_GB_RE,
            Self::MsMy => &MS_MY_RE,
        };
        pattern.is_match(phone)
    }
}

impl FromStr for MobileLocale {
    type Err = ValidationError;

    /// Tags are matched case-insensitively and accept `_` in place of `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|locale| locale.tag().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ValidationError::UnsupportedLocale(s.to_string()))
    }
}

impl fmt::Display for MobileLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indonesian_mobile_numbers() {
        let locale = MobileLocale::IdId;
        assert!(locale.matches("081234567890"));
        assert!(locale.matches("081234567891"));
        assert!(locale.matches("+6281234567890"));
        assert!(locale.matches("6285712345678"));
        assert!(locale.matches("0812 3456 7890"));

        assert!(!locale.matches("123"));
        assert!(!locale.matches(""));
        assert!(!locale.matches("0212345678"));
        assert!(!locale.matches("08101234567"));
        assert!(!locale.matches("0812345"));
        assert!(!locale.matches("08123456789012345"));
    }

    #[test]
    fn test_other_locales() {
        assert!(MobileLocale::EnUs.matches("+1 415-555-2671"));
        assert!(MobileLocale::EnUs.matches("(415) 555-2671"));
        assert!(!MobileLocale::EnUs.matches("115-555-2671"));

        assert!(MobileLocale::EnGb.matches("07911123456"));
        assert!(MobileLocale::EnGb.matches("+447911123456"));
        assert!(!MobileLocale::EnGb.matches("02012345678"));

        assert!(MobileLocale::MsMy.matches("0123456789"));
        assert!(MobileLocale::MsMy.matches("+601123456789"));
        assert!(!MobileLocale::MsMy.matches("0523456789"));
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("id-ID".parse::<MobileLocale>().unwrap(), MobileLocale::IdId);
        assert_eq!("en_us".parse::<MobileLocale>().unwrap(), MobileLocale::EnUs);
        assert_eq!(" EN-GB ".parse::<MobileLocale>().unwrap(), MobileLocale::EnGb);
        assert!(matches!(
            "fr-FR".parse::<MobileLocale>(),
            Err(ValidationError::UnsupportedLocale(_))
        ));
        assert_eq!(MobileLocale::default(), MobileLocale::IdId);
    }
}
