use super::store::{Store, StoreError};

/// Storage key for the sales email preference.
const KEY_SALES_EMAIL: &str = "salesEmail";
/// Storage key for the assistant email preference.
const KEY_ASSISTANT_EMAIL: &str = "assistantEmail";

/// Fallback recipient used when no sales email was ever stored.
pub const DEFAULT_SALES_EMAIL: &str = "alexander.mut@abcfinance.de";

/// The two persisted internal email addresses.
///
/// These are the only preference values the app keeps. They are written
/// back on every edit and never expire. No syntax validation is performed;
/// the mail client is the authority on what it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub sales_email: String,
    pub assistant_email: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            sales_email: DEFAULT_SALES_EMAIL.to_string(),
            assistant_email: String::new(),
        }
    }
}

impl Settings {
    /// Load both preferences, falling back to the defaults for keys that
    /// were never stored. Storage errors degrade to the defaults.
    pub fn load(store: &Store) -> Self {
        let sales_email = match store.get(KEY_SALES_EMAIL) {
            Ok(Some(value)) => value,
            Ok(None) => DEFAULT_SALES_EMAIL.to_string(),
            Err(e) => {
                eprintln!("⚠️  Failed to load sales email: {}", e);
                DEFAULT_SALES_EMAIL.to_string()
            }
        };

        let assistant_email = match store.get(KEY_ASSISTANT_EMAIL) {
            Ok(Some(value)) => value,
            Ok(None) => String::new(),
            Err(e) => {
                eprintln!("⚠️  Failed to load assistant email: {}", e);
                String::new()
            }
        };

        Settings {
            sales_email,
            assistant_email,
        }
    }

    /// Persist both preferences, trimmed of surrounding whitespace.
    pub fn save(&self, store: &Store) -> Result<(), StoreError> {
        store.set(KEY_SALES_EMAIL, self.sales_email.trim())?;
        store.set(KEY_ASSISTANT_EMAIL, self.assistant_email.trim())?;
        Ok(())
    }

    /// At least one internal address present? Sending requires this.
    pub fn has_internal_recipient(&self) -> bool {
        !self.sales_email.trim().is_empty() || !self.assistant_email.trim().is_empty()
    }

    /// Comma-joined recipient list of the non-empty internal addresses.
    pub fn recipients(&self) -> String {
        [self.sales_email.trim(), self.assistant_email.trim()]
            .iter()
            .filter(|addr| !addr.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(",")
    }
}
