use serde::{Deserialize, Serialize};
use stayview_core::links::BookingLink;

/// One guesthouse.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PropertyConfig {
    /// Route segment, e.g. `tourist-inn` in `/properties/tourist-inn`.
    pub slug: String,
    pub name: String,
    /// Booking.com hotel page used as the base of availability links.
    pub booking_url: String,
    #[serde(default)]
    pub address: Vec<String>,
    #[serde(default)]
    pub maps_url: Option<String>,
}

impl PropertyConfig {
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        booking_url: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            booking_url: booking_url.into(),
            address: Vec::new(),
            maps_url: None,
        }
    }

    pub fn booking_link(&self) -> BookingLink {
        BookingLink::new(self.booking_url.clone())
    }
}

pub(crate) fn default_properties() -> Vec<PropertyConfig> {
    vec![
        PropertyConfig::new(
            "tour-inn",
            "Tour Inn",
            "https://www.booking.com/hotel/mv/tour-inn.html",
        ),
        PropertyConfig {
            address: vec!["Ma. Leaves, Maaveyo Goalhi".into(), "Malé, Maldives".into()],
            maps_url: Some(
                "https://www.google.com/maps/search/?api=1&query=Ma.+Leaves,+Maaveyo+Goalhi,+Male,+Maldives"
                    .into(),
            ),
            ..PropertyConfig::new(
                "tourist-inn",
                "Tourist Inn",
                "https://www.booking.com/hotel/mv/tourist-inn.html",
            )
        },
        PropertyConfig::new(
            "tourist-inn-grand",
            "Tourist Inn Grand",
            "https://www.booking.com/hotel/mv/tourist-inn-grand.html",
        ),
    ]
}
