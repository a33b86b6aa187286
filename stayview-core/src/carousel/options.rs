//! Static configuration for a carousel instance.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use stayview_model::CallToAction;

use crate::gesture::SwipeConfig;
use crate::serde_helpers::duration_ms;

/// Which call-to-action buttons a slide renders.
///
/// Slides that carry their own buttons use them; slides without any fall
/// back to `defaults`. Either list is cut to `max_visible`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CtaPolicy {
    pub max_visible: usize,
    pub defaults: Vec<CallToAction>,
}

impl Default for CtaPolicy {
    fn default() -> Self {
        Self {
            max_visible: 3,
            defaults: Vec::new(),
        }
    }
}

impl CtaPolicy {
    pub fn resolve<'a>(&'a self, own: &'a [CallToAction]) -> Vec<&'a CallToAction> {
        let source = if own.is_empty() { &self.defaults } else { own };
        source.iter().take(self.max_visible).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselOptions {
    /// Time each slide stays before auto-advancing.
    #[serde(rename = "auto_advance_interval_ms", with = "duration_ms")]
    pub auto_advance_interval: Duration,
    /// Cross-fade between outgoing and incoming slide.
    #[serde(rename = "transition_duration_ms", with = "duration_ms")]
    pub transition_duration: Duration,
    /// Extra delay after the interval for the catch-up re-trigger.
    #[serde(rename = "catch_up_delay_ms", with = "duration_ms")]
    pub catch_up_delay: Duration,
    pub autoplay: bool,
    /// Stop autoplay when the visitor asks for reduced motion.
    pub respect_reduced_motion: bool,
    pub show_dots: bool,
    pub show_arrows: bool,
    pub show_progress: bool,
    /// Route opened when the banner itself (not a control) is clicked.
    pub banner_target: Option<String>,
    pub cta_policy: CtaPolicy,
    pub swipe: SwipeConfig,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            auto_advance_interval: Duration::from_millis(6_000),
            transition_duration: Duration::from_millis(900),
            catch_up_delay: Duration::from_millis(250),
            autoplay: true,
            respect_reduced_motion: true,
            show_dots: true,
            show_arrows: true,
            show_progress: true,
            banner_target: None,
            cta_policy: CtaPolicy::default(),
            swipe: SwipeConfig::default(),
        }
    }
}

impl CarouselOptions {
    /// Compact slider used on property pages: shorter fade, one CTA, no
    /// progress bars.
    pub fn simple() -> Self {
        Self {
            transition_duration: Duration::from_millis(700),
            show_progress: false,
            cta_policy: CtaPolicy {
                max_visible: 1,
                defaults: Vec::new(),
            },
            ..Self::default()
        }
    }

    pub fn catch_up_after(&self) -> Duration {
        self.auto_advance_interval + self.catch_up_delay
    }
}
