//! Outbound links: WhatsApp chat, Booking.com availability, phone display.
//!
//! Reservations and messaging live on third-party sites; this module only
//! formats the URLs that hand the visitor over.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;
use url::Url;

use crate::effects::Effect;
use crate::error::{LinkError, Result};

const WHATSAPP_BASE: &str = "https://wa.me/";
/// Multi-valued parameter: every child's age is its own `age=` pair.
const AGE_KEY: &str = "age";

/// Link that leaves the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outbound {
    pub url: String,
    pub opens_new_context: bool,
    pub rel: &'static str,
}

impl Outbound {
    pub const REL: &'static str = "noreferrer noopener";

    /// Opens in a new tab without leaking the opener or referrer.
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            opens_new_context: true,
            rel: Self::REL,
        }
    }

    pub fn open_effect(&self) -> Effect {
        Effect::Open {
            url: self.url.clone(),
            new_context: self.opens_new_context,
        }
    }
}

/// `https://wa.me/<digits>?text=<message>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppLink {
    number: String,
    message: String,
}

impl WhatsAppLink {
    /// Any formatting in `number` (spaces, `+`, dashes) is dropped.
    pub fn new(number: &str, message: impl Into<String>) -> Result<Self> {
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(LinkError::EmptyPhoneNumber(number.to_string()));
        }
        Ok(Self {
            number: digits,
            message: message.into(),
        })
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn url(&self) -> String {
        format!(
            "{WHATSAPP_BASE}{}?text={}",
            self.number,
            urlencoding::encode(&self.message)
        )
    }

    pub fn outbound(&self) -> Outbound {
        Outbound::external(self.url())
    }
}

impl fmt::Display for WhatsAppLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

/// Booking.com hotel link with the visitor's dates and party merged into a
/// base URL. Parameters that are not set leave the base untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingLink {
    base: String,
    checkin: Option<NaiveDate>,
    checkout: Option<NaiveDate>,
    adults: Option<u32>,
    children: Option<u32>,
    rooms: Option<u32>,
    child_ages: Vec<u32>,
}

impl BookingLink {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            checkin: None,
            checkout: None,
            adults: None,
            children: None,
            rooms: None,
            child_ages: Vec::new(),
        }
    }

    pub fn stay(mut self, checkin: NaiveDate, checkout: NaiveDate) -> Self {
        self.checkin = Some(checkin);
        self.checkout = Some(checkout);
        self
    }

    pub fn adults(mut self, adults: u32) -> Self {
        self.adults = Some(adults);
        self
    }

    pub fn children(mut self, children: u32) -> Self {
        self.children = Some(children);
        self
    }

    pub fn rooms(mut self, rooms: u32) -> Self {
        self.rooms = Some(rooms);
        self
    }

    /// Replaces every `age` pair of the base. An empty list keeps the base's.
    pub fn child_ages(mut self, ages: impl IntoIterator<Item = u32>) -> Self {
        self.child_ages = ages.into_iter().collect();
        self
    }

    fn validate(&self) -> Result<()> {
        if let (Some(checkin), Some(checkout)) = (self.checkin, self.checkout) {
            if checkout < checkin {
                return Err(LinkError::InvertedStay { checkin, checkout });
            }
        }
        if self.adults == Some(0) {
            return Err(LinkError::NoAdults);
        }
        Ok(())
    }

    fn overrides(&self) -> Vec<(&'static str, String)> {
        let date = |d: NaiveDate| d.format("%Y-%m-%d").to_string();
        [
            ("checkin", self.checkin.map(date)),
            ("checkout", self.checkout.map(date)),
            ("group_adults", self.adults.map(|n| n.to_string())),
            ("group_children", self.children.map(|n| n.to_string())),
            ("no_rooms", self.rooms.map(|n| n.to_string())),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }

    pub fn build(&self) -> Result<Url> {
        self.validate()?;
        let mut url = Url::parse(&self.base)?;

        let overrides = self.overrides();
        let replace_ages = !self.child_ages.is_empty();
        let existing: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut pairs: Vec<(String, String)> = Vec::with_capacity(existing.len());
        let mut written: Vec<&str> = Vec::new();
        for (key, value) in existing {
            if replace_ages && key == AGE_KEY {
                continue;
            }
            match overrides.iter().find(|(k, _)| *k == key) {
                // a set parameter keeps the slot of its first occurrence
                Some((k, v)) if !written.contains(k) => {
                    written.push(*k);
                    pairs.push((key, v.clone()));
                }
                Some(_) => {}
                None => pairs.push((key, value)),
            }
        }
        for (key, value) in &overrides {
            if !written.contains(key) {
                pairs.push(((*key).to_string(), value.clone()));
            }
        }
        for age in &self.child_ages {
            pairs.push((AGE_KEY.to_string(), age.to_string()));
        }

        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// Like [`build`](Self::build) but falls back to the unmodified base.
    pub fn to_url_lossy(&self) -> String {
        match self.build() {
            Ok(url) => url.to_string(),
            Err(err) => {
                warn!(%err, base = %self.base, "booking link fell back to base url");
                self.base.clone()
            }
        }
    }

    pub fn outbound(&self) -> Outbound {
        Outbound::external(self.to_url_lossy())
    }
}

/// Display form of a phone number. Maldivian numbers (`+960`) are grouped
/// as `+960 786 0882`; anything else is reduced to digits and `+`.
pub fn format_phone(raw: &str) -> String {
    let compact: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    match compact.strip_prefix("+960") {
        Some(tail) if compact.len() >= 8 => {
            let split = tail.len().min(3);
            let (head, rest) = tail.split_at(split);
            format!("+960 {head} {rest}")
        }
        _ => compact,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.booking.com/hotel/mv/tour-inn.html?aid=304142&age=11&age=13&checkin=2025-10-26&group_adults=2&sr_order=popularity";

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn whatsapp_link_encodes_message() {
        let link = WhatsAppLink::new("+960 786-0882", "Hi, rooms for 2 & breakfast?").unwrap();
        assert_eq!(
            link.url(),
            "https://wa.me/9607860882?text=Hi%2C%20rooms%20for%202%20%26%20breakfast%3F"
        );
        let out = link.outbound();
        assert!(out.opens_new_context);
        assert_eq!(out.rel, "noreferrer noopener");
    }

    #[test]
    fn whatsapp_rejects_digitless_number() {
        assert_eq!(
            WhatsAppLink::new("call us", "hi"),
            Err(LinkError::EmptyPhoneNumber("call us".into()))
        );
    }

    #[test]
    fn booking_overrides_in_place_and_keeps_the_rest() {
        let url = BookingLink::new(BASE)
            .stay(date("2026-01-10"), date("2026-01-12"))
            .adults(3)
            .children(0)
            .rooms(1)
            .build()
            .unwrap();
        assert_eq!(
            url.query(),
            Some(
                "aid=304142&age=11&age=13&checkin=2026-01-10&group_adults=3&sr_order=popularity\
                 &checkout=2026-01-12&group_children=0&no_rooms=1"
            )
        );
    }

    #[test]
    fn child_ages_replace_all_age_pairs() {
        let url = BookingLink::new(BASE).child_ages([4, 7, 9]).build().unwrap();
        let ages: Vec<_> = url
            .query_pairs()
            .filter(|(k, _)| k == "age")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(ages, ["4", "7", "9"]);
        assert!(url.query_pairs().any(|(k, v)| k == "aid" && v == "304142"));
    }

    #[test]
    fn unset_fields_leave_base_alone() {
        let url = BookingLink::new(BASE).build().unwrap();
        assert_eq!(url.as_str(), BASE);
    }

    #[test]
    fn invalid_input_is_reported_and_lossy_falls_back() {
        let inverted = BookingLink::new(BASE).stay(date("2026-02-02"), date("2026-02-01"));
        assert!(matches!(inverted.build(), Err(LinkError::InvertedStay { .. })));
        assert_eq!(inverted.to_url_lossy(), BASE);

        assert_eq!(BookingLink::new(BASE).adults(0).build(), Err(LinkError::NoAdults));

        let broken = BookingLink::new("not a url").adults(2);
        assert!(matches!(broken.build(), Err(LinkError::InvalidBase(_))));
        assert_eq!(broken.to_url_lossy(), "not a url");
    }

    #[test]
    fn same_day_stay_is_allowed() {
        let day = date("2026-03-01");
        assert!(BookingLink::new(BASE).stay(day, day).build().is_ok());
    }

    #[test]
    fn phone_formatting() {
        assert_eq!(format_phone("+9607860882"), "+960 786 0882");
        assert_eq!(format_phone("+960 786 0882"), "+960 786 0882");
        assert_eq!(format_phone("+91 99119-27509"), "+919911927509");
        assert_eq!(format_phone(""), "");
    }
}
