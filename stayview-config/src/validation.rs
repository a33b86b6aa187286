use std::collections::HashSet;
use std::time::Duration;

use thiserror::Error;

use crate::models::SiteConfig;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("contact.whatsapp_number {0:?} contains no digits")]
    EmptyWhatsAppNumber(String),
    #[error("booking_url for property '{slug}' is not a valid URL")]
    InvalidBookingUrl {
        slug: String,
        #[source]
        source: url::ParseError,
    },
    #[error("property slug '{0}' is configured more than once")]
    DuplicateProperty(String),
    #[error("carousel.auto_advance_interval_ms must be greater than zero")]
    ZeroInterval,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.hint {
            Some(hint) => write!(f, "{} (hint: {})", self.message, hint),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(&mut self, message: S, hint: H) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfigWarning> {
        self.items.iter()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

/// Reject configurations the engines cannot work with and collect warnings
/// for ones that work but probably are not what was meant.
pub fn apply_guard_rails(config: &SiteConfig) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    let number = &config.contact.whatsapp_number;
    if !number.chars().any(|c| c.is_ascii_digit()) {
        return Err(ConfigGuardRailError::EmptyWhatsAppNumber(number.clone()));
    }

    let mut slugs = HashSet::new();
    for property in &config.properties {
        if !slugs.insert(property.slug.as_str()) {
            return Err(ConfigGuardRailError::DuplicateProperty(property.slug.clone()));
        }
        url::Url::parse(&property.booking_url).map_err(|source| {
            ConfigGuardRailError::InvalidBookingUrl {
                slug: property.slug.clone(),
                source,
            }
        })?;
    }

    if config.properties.is_empty() {
        warnings.push("no properties configured; booking links will be unavailable");
    }

    let carousel = &config.carousel;
    if carousel.auto_advance_interval.is_zero() {
        return Err(ConfigGuardRailError::ZeroInterval);
    }
    if carousel.auto_advance_interval < carousel.transition_duration {
        warnings.push_with_hint(
            format!(
                "carousel interval ({} ms) is shorter than its transition ({} ms)",
                carousel.auto_advance_interval.as_millis(),
                carousel.transition_duration.as_millis()
            ),
            "slides will change before the cross-fade finishes",
        );
    }
    if !carousel.autoplay {
        warnings.push("carousel autoplay is disabled");
    }
    if carousel.cta_policy.max_visible == 0 {
        warnings.push(
            "carousel.cta_policy.max_visible is 0; no call-to-action buttons will render",
        );
    }

    let lightbox = &config.lightbox;
    if lightbox.dialog_controls.is_empty() {
        warnings.push_with_hint(
            "lightbox has no dialog controls; focus cannot be trapped",
            "list at least the close button under lightbox.dialog_controls",
        );
    }
    if lightbox.slideshow && lightbox.slideshow_interval < Duration::from_secs(1) {
        warnings.push(format!(
            "lightbox slideshow interval of {} ms is very short",
            lightbox.slideshow_interval.as_millis()
        ));
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropertyConfig;

    #[test]
    fn defaults_pass_cleanly() {
        let warnings = apply_guard_rails(&SiteConfig::default()).unwrap();
        assert!(warnings.is_empty(), "{:?}", warnings);
    }

    #[test]
    fn bad_booking_url_is_rejected() {
        let mut config = SiteConfig::default();
        config.properties.push(PropertyConfig::new("annex", "Annex", "booking dot com"));
        let err = apply_guard_rails(&config).unwrap_err();
        assert!(matches!(
            err,
            ConfigGuardRailError::InvalidBookingUrl { ref slug, .. } if slug == "annex"
        ));
    }

    #[test]
    fn duplicate_slug_is_rejected() {
        let mut config = SiteConfig::default();
        let first = config.properties[0].clone();
        config.properties.push(first);
        assert!(matches!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::DuplicateProperty(_))
        ));
    }

    #[test]
    fn short_interval_warns() {
        let mut config = SiteConfig::default();
        config.carousel.auto_advance_interval = Duration::from_millis(500);
        let warnings = apply_guard_rails(&config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings.items[0].hint.is_some());
    }
}
