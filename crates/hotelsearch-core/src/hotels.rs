//! The static hotel registry.
//!
//! The registry is fixed for the process lifetime: it is built once at startup
//! from the bundled `config/hotels.yaml` (or an override file) and only read
//! afterwards.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::search::SearchCriteria;
use crate::template::try_render_url;
use crate::ConfigError;

const BUILTIN_HOTELS_YAML: &str = include_str!("../../../config/hotels.yaml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelRecord {
    pub name: String,
    /// Opaque identifier the pricing provider uses for this property.
    pub provider_token: String,
    /// Empty when the hotel has no bookable link; such hotels are dropped
    /// from list results.
    #[serde(default)]
    pub booking_url_template: String,
    pub address: String,
    pub rating: f32,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub fallback_image_url: String,
}

impl HotelRecord {
    /// URL slug for the detail page, e.g. `"town-inn-suites"`.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    #[must_use]
    pub fn has_booking_template(&self) -> bool {
        !self.booking_url_template.trim().is_empty()
    }
}

/// Generate a URL-safe slug from a display name.
///
/// Non-ASCII characters and punctuation are dropped; runs of spaces or dashes
/// collapse to a single dash.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else if c == ' ' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Deserialize)]
pub struct HotelsFile {
    pub hotels: Vec<HotelRecord>,
}

/// Load and validate a hotels file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_hotels(path: &Path) -> Result<HotelsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::HotelsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_hotels(&content)
}

fn parse_hotels(content: &str) -> Result<HotelsFile, ConfigError> {
    let hotels_file: HotelsFile = serde_yaml::from_str(content)?;
    validate_hotels(&hotels_file)?;
    Ok(hotels_file)
}

fn validate_hotels(hotels_file: &HotelsFile) -> Result<(), ConfigError> {
    let mut seen_slugs = HashSet::new();
    let mut seen_tokens = HashSet::new();
    // Any valid criteria exercise every placeholder.
    let probe = SearchCriteria::new(
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default(),
        NaiveDate::from_ymd_opt(2000, 1, 2).unwrap_or_default(),
        1,
        0,
    );

    for hotel in &hotels_file.hotels {
        if hotel.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "hotel name must be non-empty".to_string(),
            ));
        }

        if hotel.provider_token.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "hotel '{}' has an empty provider_token",
                hotel.name
            )));
        }

        if !(0.0..=5.0).contains(&hotel.rating) {
            return Err(ConfigError::Validation(format!(
                "hotel '{}' has invalid rating {}; must be between 0 and 5",
                hotel.name, hotel.rating
            )));
        }

        let slug = hotel.slug();
        if slug.is_empty() || !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate or empty hotel slug: '{}' (from hotel '{}')",
                slug, hotel.name
            )));
        }

        if !seen_tokens.insert(hotel.provider_token.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate provider_token for hotel '{}'",
                hotel.name
            )));
        }

        if hotel.has_booking_template() {
            try_render_url(&hotel.booking_url_template, &probe).map_err(|e| {
                ConfigError::Validation(format!("hotel '{}': {e}", hotel.name))
            })?;
        } else {
            tracing::warn!(hotel = %hotel.name, "hotel has no booking template; it will not be listed");
        }
    }

    Ok(())
}

/// Immutable set of configured hotels.
#[derive(Debug, Clone)]
pub struct HotelRegistry {
    hotels: Vec<HotelRecord>,
}

impl HotelRegistry {
    /// Builds a registry from already-validated records.
    #[must_use]
    pub fn new(hotels: Vec<HotelRecord>) -> Self {
        Self { hotels }
    }

    /// The bundled hotel table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the bundled table fails validation.
    pub fn builtin() -> Result<Self, ConfigError> {
        Ok(Self::new(parse_hotels(BUILTIN_HOTELS_YAML)?.hotels))
    }

    /// Loads from `path` when given, otherwise the bundled table.
    ///
    /// # Errors
    ///
    /// Propagates [`load_hotels`] and [`Self::builtin`] errors.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading hotel registry override");
                Ok(Self::new(load_hotels(path)?.hotels))
            }
            None => Self::builtin(),
        }
    }

    #[must_use]
    pub fn hotels(&self) -> &[HotelRecord] {
        &self.hotels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }

    #[must_use]
    pub fn by_slug(&self, slug: &str) -> Option<&HotelRecord> {
        let slug = slug.trim().to_lowercase();
        self.hotels.iter().find(|h| h.slug() == slug)
    }

    #[must_use]
    pub fn by_token(&self, token: &str) -> Option<&HotelRecord> {
        self.hotels.iter().find(|h| h.provider_token == token)
    }
}

#[cfg(test)]
#[path = "hotels_test.rs"]
mod tests;
