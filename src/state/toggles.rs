use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::store::{Store, StoreError};

/// Storage key for the serialized toggle map.
const KEY_TOGGLES: &str = "partialClearFlags";

/// Wire form of the persisted toggle map: one JSON object keyed by the
/// toggles' storage keys. BTreeMap keeps the serialized form stable
/// across runs.
#[derive(Serialize, Deserialize, Debug, Default)]
struct StoredToggles(BTreeMap<String, bool>);

/// Identifier of one partial-clear toggle.
///
/// Each toggle governs exactly one form field (or the staged photo) and is
/// persisted under a stable storage key. The mapping from toggle to the
/// state it clears lives in the clear engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToggleId {
    Event,
    FirstName,
    LastName,
    Company,
    Position,
    Street,
    Zip,
    City,
    Website,
    CustomerEmail,
    Phone,
    Amount,
    Timeline,
    Message,
    Interest,
    Gdpr,
    CcCustomer,
    Photo,
    SalesEmail,
    AssistantEmail,
}

impl ToggleId {
    /// Every toggle the form knows about.
    pub const ALL: [ToggleId; 20] = [
        ToggleId::Event,
        ToggleId::FirstName,
        ToggleId::LastName,
        ToggleId::Company,
        ToggleId::Position,
        ToggleId::Street,
        ToggleId::Zip,
        ToggleId::City,
        ToggleId::Website,
        ToggleId::CustomerEmail,
        ToggleId::Phone,
        ToggleId::Amount,
        ToggleId::Timeline,
        ToggleId::Message,
        ToggleId::Interest,
        ToggleId::Gdpr,
        ToggleId::CcCustomer,
        ToggleId::Photo,
        ToggleId::SalesEmail,
        ToggleId::AssistantEmail,
    ];

    /// Stable key used in the persisted toggle map.
    pub fn storage_key(self) -> &'static str {
        match self {
            ToggleId::Event => "toggle-event",
            ToggleId::FirstName => "toggle-firstname",
            ToggleId::LastName => "toggle-lastname",
            ToggleId::Company => "toggle-company",
            ToggleId::Position => "toggle-position",
            ToggleId::Street => "toggle-street",
            ToggleId::Zip => "toggle-zip",
            ToggleId::City => "toggle-city",
            ToggleId::Website => "toggle-website",
            ToggleId::CustomerEmail => "toggle-customerEmail",
            ToggleId::Phone => "toggle-phone",
            ToggleId::Amount => "toggle-amount",
            ToggleId::Timeline => "toggle-timeline",
            ToggleId::Message => "toggle-message",
            ToggleId::Interest => "toggle-interests",
            ToggleId::Gdpr => "toggle-gdpr",
            ToggleId::CcCustomer => "toggle-ccCustomer",
            ToggleId::Photo => "toggle-photo",
            ToggleId::SalesEmail => "toggle-salesEmail",
            ToggleId::AssistantEmail => "toggle-assistantEmail",
        }
    }

    /// Default checked state used when no value was ever stored for this
    /// toggle. The event and the two internal email toggles start OFF
    /// (safe), everything else starts ON (convenience). Evaluated per
    /// toggle, not for the map as a whole.
    pub fn default_on(self) -> bool {
        !matches!(
            self,
            ToggleId::Event | ToggleId::SalesEmail | ToggleId::AssistantEmail
        )
    }
}

/// Checked state of every partial-clear toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggles {
    checked: HashMap<ToggleId, bool>,
}

impl Default for Toggles {
    fn default() -> Self {
        let checked = ToggleId::ALL
            .iter()
            .map(|&id| (id, id.default_on()))
            .collect();
        Toggles { checked }
    }
}

impl Toggles {
    /// Load the toggle map, applying each toggle's own default where the
    /// stored map has no entry. Unknown stored keys are ignored.
    pub fn load(store: &Store) -> Self {
        let stored: StoredToggles = match store.get(KEY_TOGGLES) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                eprintln!("⚠️  Failed to parse stored toggles: {}", e);
                StoredToggles::default()
            }),
            Ok(None) => StoredToggles::default(),
            Err(e) => {
                eprintln!("⚠️  Failed to load toggles: {}", e);
                StoredToggles::default()
            }
        };

        let checked = ToggleId::ALL
            .iter()
            .map(|&id| {
                let value = stored
                    .0
                    .get(id.storage_key())
                    .copied()
                    .unwrap_or_else(|| id.default_on());
                (id, value)
            })
            .collect();

        Toggles { checked }
    }

    /// Persist the checked state of every toggle as one JSON object.
    pub fn save(&self, store: &Store) -> Result<(), StoreError> {
        let stored = StoredToggles(
            ToggleId::ALL
                .iter()
                .map(|&id| (id.storage_key().to_string(), self.is_checked(id)))
                .collect(),
        );
        let json = serde_json::to_string(&stored)?;
        store.set(KEY_TOGGLES, &json)?;
        Ok(())
    }

    pub fn is_checked(&self, id: ToggleId) -> bool {
        self.checked.get(&id).copied().unwrap_or_else(|| id.default_on())
    }

    pub fn set(&mut self, id: ToggleId, on: bool) {
        self.checked.insert(id, on);
    }

    /// The toggles currently switched on, in declaration order.
    pub fn checked_ids(&self) -> impl Iterator<Item = ToggleId> + '_ {
        ToggleId::ALL.into_iter().filter(|&id| self.is_checked(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_never_stored() {
        let store = Store::open_in_memory().unwrap();
        let toggles = Toggles::load(&store);

        // Safe defaults: event and internal emails start off.
        assert!(!toggles.is_checked(ToggleId::Event));
        assert!(!toggles.is_checked(ToggleId::SalesEmail));
        assert!(!toggles.is_checked(ToggleId::AssistantEmail));

        // Lead data defaults to on.
        assert!(toggles.is_checked(ToggleId::FirstName));
        assert!(toggles.is_checked(ToggleId::Photo));
        assert!(toggles.is_checked(ToggleId::Gdpr));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let store = Store::open_in_memory().unwrap();
        let mut toggles = Toggles::default();
        toggles.set(ToggleId::Event, true);
        toggles.set(ToggleId::FirstName, false);
        toggles.save(&store).unwrap();

        let loaded = Toggles::load(&store);
        assert_eq!(loaded, toggles);
    }

    #[test]
    fn test_partial_stored_map_defaults_rest_per_toggle() {
        // A map holding only one key must not disable per-toggle defaults
        // for the others.
        let store = Store::open_in_memory().unwrap();
        store
            .set(KEY_TOGGLES, r#"{"toggle-event": true}"#)
            .unwrap();

        let toggles = Toggles::load(&store);
        assert!(toggles.is_checked(ToggleId::Event));
        assert!(toggles.is_checked(ToggleId::Company));
        assert!(!toggles.is_checked(ToggleId::SalesEmail));
    }

    #[test]
    fn test_stored_wire_form_is_a_flat_json_object() {
        // The persisted value is one plain object keyed by storage key,
        // not a nested structure.
        let store = Store::open_in_memory().unwrap();
        let mut toggles = Toggles::default();
        toggles.set(ToggleId::Event, true);
        toggles.save(&store).unwrap();

        let json = store.get("partialClearFlags").unwrap().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["toggle-event"], serde_json::Value::Bool(true));
        assert_eq!(parsed["toggle-phone"], serde_json::Value::Bool(true));
        assert_eq!(parsed.as_object().unwrap().len(), ToggleId::ALL.len());
    }

    #[test]
    fn test_unknown_stored_keys_are_ignored() {
        let store = Store::open_in_memory().unwrap();
        store
            .set(KEY_TOGGLES, r#"{"toggle-obsolete": true, "toggle-phone": false}"#)
            .unwrap();

        let toggles = Toggles::load(&store);
        assert!(!toggles.is_checked(ToggleId::Phone));
    }
}
