//! Local ideograph font selection.
//!
//! CJK glyphs can be rasterized from a font installed on the device instead of
//! being downloaded with the style. Which family to use is requested by name
//! (or by a list of names in order of preference) and must be mapped to a
//! family that is actually installed; anything else falls back to
//! [`DEFAULT_FONT`].

use crate::core::constants::DEFAULT_FONT;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Generic families every device is expected to provide.
const GENERIC_FAMILIES: &[&str] = &[
    "sans-serif",
    "sans-serif-condensed",
    "sans-serif-medium",
    "serif",
    "monospace",
    "serif-monospace",
    "casual",
    "cursive",
];

static SYSTEM_FONTS: Lazy<SystemFonts> = Lazy::new(SystemFonts::default);

/// A font family that passed validation, together with the candidates it was chosen from.
///
/// Only a [`FontValidator`] hands these out, so options never hold a raw,
/// unvalidated family name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontSelection {
    family: String,
    candidates: Option<Vec<String>>,
}

impl FontSelection {
    pub(crate) fn new(family: String, candidates: Option<Vec<String>>) -> Self {
        Self { family, candidates }
    }

    /// The resolved, installed family.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// The candidate list as it was requested, if a list was requested.
    pub fn candidates(&self) -> Option<&[String]> {
        self.candidates.as_deref()
    }

    pub(crate) fn into_parts(self) -> (String, Option<Vec<String>>) {
        (self.family, self.candidates)
    }
}

/// Maps requested family names to an installed family. Never fails.
pub trait FontValidator {
    /// Whether `family` is installed on this device.
    fn is_installed(&self, family: &str) -> bool;

    /// Validates a single requested family.
    fn select_family(&self, family: &str) -> FontSelection {
        FontSelection::new(self.first_installed(&[family]), None)
    }

    /// Picks the first installed family out of `families`, keeping the list.
    fn select_families(&self, families: &[String]) -> FontSelection {
        let names: Vec<&str> = families.iter().map(String::as_str).collect();
        FontSelection::new(self.first_installed(&names), Some(families.to_vec()))
    }

    fn first_installed(&self, families: &[&str]) -> String {
        match families.iter().find(|family| self.is_installed(family)) {
            Some(family) => family.to_string(),
            None => {
                log::warn!(
                    "Couldn't map font family for local ideograph from {:?}, using {} instead",
                    families,
                    DEFAULT_FONT
                );
                DEFAULT_FONT.to_string()
            }
        }
    }
}

/// Installed font families known to the process.
#[derive(Debug, Clone)]
pub struct SystemFonts {
    families: HashSet<String>,
}

impl SystemFonts {
    /// Generic families only.
    pub fn new() -> Self {
        Self::with_families(GENERIC_FAMILIES.iter().copied())
    }

    /// Exactly the given families.
    pub fn with_families<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            families: families.into_iter().map(Into::into).collect(),
        }
    }

    /// Registers an additional installed family.
    pub fn install(mut self, family: impl Into<String>) -> Self {
        self.families.insert(family.into());
        self
    }

    /// Shared instance holding the generic families.
    pub fn shared() -> &'static SystemFonts {
        &SYSTEM_FONTS
    }
}

impl Default for SystemFonts {
    fn default() -> Self {
        Self::new()
    }
}

impl FontValidator for SystemFonts {
    fn is_installed(&self, family: &str) -> bool {
        self.families.contains(family)
    }
}
