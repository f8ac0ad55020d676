//! Classification of offer sources as direct or reseller.
//!
//! The provider's `official` flag is not trusted on its own: resellers are
//! sometimes marked official. An offer only counts as official-and-direct
//! when it is flagged official AND its source name does not contain any
//! deny-listed reseller name (case-insensitive substring match).
//!
//! Substring matching misclassifies any reseller that is renamed or missing
//! from the list. [`OtaPolicy`] carries the list as data so a configured
//! allow/deny list can replace the default without touching selection code.

use crate::types::ProviderOffer;

/// Online travel agencies excluded from direct-rate classification.
pub const KNOWN_OTAS: &[&str] = &[
    "booking.com",
    "expedia",
    "trivago",
    "hotels.com",
    "orbitz",
    "priceline",
    "kayak",
    "tripadvisor",
];

#[derive(Debug, Clone)]
pub struct OtaPolicy {
    /// Lowercased reseller names.
    deny: Vec<String>,
}

impl Default for OtaPolicy {
    fn default() -> Self {
        Self::new(KNOWN_OTAS.iter().copied())
    }
}

impl OtaPolicy {
    pub fn new<I, S>(deny: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            deny: deny
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// `true` if `source` names a known reseller.
    #[must_use]
    pub fn is_reseller(&self, source: &str) -> bool {
        let source = source.to_lowercase();
        self.deny.iter().any(|ota| source.contains(ota.as_str()))
    }

    #[must_use]
    pub fn is_official_direct(&self, offer: &ProviderOffer) -> bool {
        offer.is_flagged_official() && !self.is_reseller(offer.source_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(source: &str, official: Option<bool>) -> ProviderOffer {
        ProviderOffer {
            source: Some(source.to_owned()),
            official,
            ..ProviderOffer::default()
        }
    }

    #[test]
    fn reseller_match_is_case_insensitive_substring() {
        let policy = OtaPolicy::default();
        assert!(policy.is_reseller("Booking.com"));
        assert!(policy.is_reseller("Expedia.com"));
        assert!(policy.is_reseller("KAYAK"));
        assert!(policy.is_reseller("Hotels.com by Expedia"));
        assert!(!policy.is_reseller("Town Inn Suites"));
        assert!(!policy.is_reseller("Hotel website"));
    }

    #[test]
    fn official_ota_is_not_direct() {
        let policy = OtaPolicy::default();
        assert!(!policy.is_official_direct(&offer("Expedia", Some(true))));
    }

    #[test]
    fn unflagged_hotel_site_is_not_direct() {
        let policy = OtaPolicy::default();
        assert!(!policy.is_official_direct(&offer("Town Inn Suites", Some(false))));
        assert!(!policy.is_official_direct(&offer("Town Inn Suites", None)));
    }

    #[test]
    fn official_hotel_site_is_direct() {
        let policy = OtaPolicy::default();
        assert!(policy.is_official_direct(&offer("Town Inn Suites", Some(true))));
    }

    #[test]
    fn custom_deny_list_replaces_default() {
        let policy = OtaPolicy::new(["Agoda", " "]);
        assert!(policy.is_reseller("agoda.com"));
        assert!(!policy.is_reseller("Expedia"));
    }
}
