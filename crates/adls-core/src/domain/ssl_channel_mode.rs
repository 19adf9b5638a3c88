//! Transport-security modes understood by the TLS socket factory.
//!
//! The set is closed: a mode name that matches none of the members (compared
//! case-insensitively) resolves to [`SslChannelMode::Default`] instead of
//! failing.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the socket factory builds its secure channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SslChannelMode {
    /// Native OpenSSL-backed channel with hardware-accelerated cipher suites.
    OpenSsl,
    /// The platform TLS implementation, with cipher-suite alteration applied.
    DefaultJse,
    /// Whatever the socket factory does when nothing else is requested.
    #[default]
    Default,
}

impl SslChannelMode {
    /// Every member, in declaration order.  Resolution scans this order.
    pub const ALL: [SslChannelMode; 3] = [
        SslChannelMode::OpenSsl,
        SslChannelMode::DefaultJse,
        SslChannelMode::Default,
    ];

    /// Canonical name used in config files and log output.
    pub const fn name(self) -> &'static str {
        match self {
            SslChannelMode::OpenSsl => "OpenSSL",
            SslChannelMode::DefaultJse => "Default_JSE",
            SslChannelMode::Default => "Default",
        }
    }

    /// Returns the first member whose canonical name equals `name`, ignoring
    /// case, or `None` when nothing matches.
    ///
    /// Case is folded one character at a time, so `"Openſſl"` (long s) and
    /// `"OPENSSL"` both find [`SslChannelMode::OpenSsl`], while characters
    /// whose case mapping expands (`ß` to `SS`) only match themselves.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| eq_ignore_case(name, mode.name()))
    }

    /// Total resolution: like [`lookup`](Self::lookup) but unknown names
    /// (including the empty string) become [`SslChannelMode::Default`].
    ///
    /// ```rust
    /// use adls_core::SslChannelMode;
    ///
    /// assert_eq!(SslChannelMode::resolve("OPENSSL"), SslChannelMode::OpenSsl);
    /// assert_eq!(SslChannelMode::resolve("bogus-mode"), SslChannelMode::Default);
    /// ```
    pub fn resolve(name: &str) -> Self {
        Self::lookup(name).unwrap_or_default()
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    let mut a = a.chars();
    let mut b = b.chars();
    loop {
        match (a.next(), b.next()) {
            (Some(x), Some(y)) if chars_match(x, y) => {}
            (None, None) => return true,
            _ => return false,
        }
    }
}

fn chars_match(x: char, y: char) -> bool {
    if x == y {
        return true;
    }
    let (upper_x, upper_y) = (simple_upper(x), simple_upper(y));
    upper_x == upper_y || simple_lower(upper_x) == simple_lower(upper_y)
}

/// Single-character uppercase mapping; `c` itself when the mapping expands.
fn simple_upper(c: char) -> char {
    let mut mapped = c.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn simple_lower(c: char) -> char {
    let mut mapped = c.to_lowercase();
    match (mapped.next(), mapped.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

impl fmt::Display for SslChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SslChannelMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::resolve(s))
    }
}

impl From<String> for SslChannelMode {
    fn from(name: String) -> Self {
        Self::resolve(&name)
    }
}

impl From<SslChannelMode> for String {
    fn from(mode: SslChannelMode) -> Self {
        mode.name().to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_member_is_default() {
        assert_eq!(SslChannelMode::default(), SslChannelMode::Default);
    }

    #[test]
    fn test_resolve_matches_canonical_names_exactly() {
        for mode in SslChannelMode::ALL {
            assert_eq!(SslChannelMode::resolve(mode.name()), mode);
        }
    }

    #[test]
    fn test_resolve_ignores_case() {
        // Arrange
        let spellings = [
            ("default", SslChannelMode::Default),
            ("DEFAULT", SslChannelMode::Default),
            ("Default", SslChannelMode::Default),
            ("openssl", SslChannelMode::OpenSsl),
            ("OpenSsl", SslChannelMode::OpenSsl),
            ("default_jse", SslChannelMode::DefaultJse),
            ("DEFAULT_JSE", SslChannelMode::DefaultJse),
        ];

        // Act / Assert
        for (input, expected) in spellings {
            assert_eq!(SslChannelMode::resolve(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_resolve_folds_case_beyond_ascii() {
        // Long s uppercases to S.
        assert_eq!(SslChannelMode::resolve("Openſſl"), SslChannelMode::OpenSsl);
        assert_eq!(SslChannelMode::lookup("OPENſSL"), Some(SslChannelMode::OpenSsl));
    }

    #[test]
    fn test_resolve_rejects_expanding_case_mappings() {
        // "ß" uppercases to two characters, so it never stands in for "ss".
        assert_eq!(SslChannelMode::lookup("Openßl"), None);
        assert_eq!(SslChannelMode::resolve("Default_JSEE"), SslChannelMode::Default);
    }

    #[test]
    fn test_resolve_unknown_names_fall_back_to_default() {
        for input in ["", "bogus-mode", "open ssl", "Default-JSE", " default", "tls1.3"] {
            assert_eq!(SslChannelMode::resolve(input), SslChannelMode::Default, "input {input:?}");
        }
    }

    #[test]
    fn test_lookup_reports_unknown_names() {
        assert_eq!(SslChannelMode::lookup("openssl"), Some(SslChannelMode::OpenSsl));
        assert_eq!(SslChannelMode::lookup("bogus-mode"), None);
    }

    #[test]
    fn test_from_str_never_fails() {
        let parsed: SslChannelMode = "nonsense".parse().unwrap();
        assert_eq!(parsed, SslChannelMode::Default);
    }

    #[test]
    fn test_display_prints_canonical_name() {
        assert_eq!(SslChannelMode::DefaultJse.to_string(), "Default_JSE");
        assert_eq!(SslChannelMode::OpenSsl.to_string(), "OpenSSL");
    }

    #[test]
    fn test_serde_uses_canonical_name_and_falls_back() {
        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct Section {
            mode: SslChannelMode,
        }

        // Arrange / Act
        let written = toml::to_string(&Section { mode: SslChannelMode::OpenSsl }).unwrap();
        let unknown: Section = toml::from_str("mode = \"junk\"").unwrap();
        let lowercase: Section = toml::from_str("mode = \"default_jse\"").unwrap();

        // Assert
        assert_eq!(written.trim(), "mode = \"OpenSSL\"");
        assert_eq!(unknown.mode, SslChannelMode::Default);
        assert_eq!(lowercase.mode, SslChannelMode::DefaultJse);
    }

    #[test]
    fn test_all_is_in_declaration_order() {
        assert_eq!(
            SslChannelMode::ALL,
            [SslChannelMode::OpenSsl, SslChannelMode::DefaultJse, SslChannelMode::Default]
        );
    }
}
