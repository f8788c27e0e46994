//! Clear Engine: partial and full reset of the live form state.
//!
//! Every toggle maps to exactly one clear target through a declarative
//! table, so the scope of a partial clear is testable without any layout
//! knowledge. Both operations act on live state directly; nothing here
//! touches a composed lead.

use crate::photo::PhotoStaging;
use crate::state::form::{FieldId, LeadForm};
use crate::state::settings::Settings;
use crate::state::toggles::{ToggleId, Toggles};

/// What a toggle clears when it is checked during a partial clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearTarget {
    /// A text-like field, reset to its per-field default.
    Field(FieldId),
    /// GDPR consent checkbox, reset to unchecked.
    Gdpr,
    /// CC-customer checkbox, reset to its checked default.
    CcCustomer,
    /// The staged photo.
    Photo,
    /// One of the two protected preference emails. Partial clear may empty
    /// them; full clear never does.
    SalesEmail,
    AssistantEmail,
}

impl ToggleId {
    /// The declarative toggle -> target table.
    pub fn target(self) -> ClearTarget {
        match self {
            ToggleId::Event => ClearTarget::Field(FieldId::Event),
            ToggleId::FirstName => ClearTarget::Field(FieldId::FirstName),
            ToggleId::LastName => ClearTarget::Field(FieldId::LastName),
            ToggleId::Company => ClearTarget::Field(FieldId::Company),
            ToggleId::Position => ClearTarget::Field(FieldId::Position),
            ToggleId::Street => ClearTarget::Field(FieldId::Street),
            ToggleId::Zip => ClearTarget::Field(FieldId::Zip),
            ToggleId::City => ClearTarget::Field(FieldId::City),
            ToggleId::Website => ClearTarget::Field(FieldId::Website),
            ToggleId::CustomerEmail => ClearTarget::Field(FieldId::CustomerEmail),
            ToggleId::Phone => ClearTarget::Field(FieldId::Phone),
            ToggleId::Amount => ClearTarget::Field(FieldId::Amount),
            ToggleId::Timeline => ClearTarget::Field(FieldId::Timeline),
            ToggleId::Message => ClearTarget::Field(FieldId::Message),
            ToggleId::Interest => ClearTarget::Field(FieldId::Interest),
            ToggleId::Gdpr => ClearTarget::Gdpr,
            ToggleId::CcCustomer => ClearTarget::CcCustomer,
            ToggleId::Photo => ClearTarget::Photo,
            ToggleId::SalesEmail => ClearTarget::SalesEmail,
            ToggleId::AssistantEmail => ClearTarget::AssistantEmail,
        }
    }
}

/// Reset every field whose toggle is checked.
///
/// Returns whether anything was cleared, i.e. whether any toggle was
/// checked at all; the caller surfaces a status either way.
pub fn partial_clear(
    form: &mut LeadForm,
    photo: &mut PhotoStaging,
    settings: &mut Settings,
    toggles: &Toggles,
) -> bool {
    let mut cleared = false;

    for id in toggles.checked_ids() {
        match id.target() {
            ClearTarget::Field(field) => form.reset_field(field),
            ClearTarget::Gdpr => form.gdpr = false,
            ClearTarget::CcCustomer => form.cc_customer = true,
            ClearTarget::Photo => photo.clear(),
            ClearTarget::SalesEmail => settings.sales_email.clear(),
            ClearTarget::AssistantEmail => settings.assistant_email.clear(),
        }
        cleared = true;
    }

    cleared
}

/// Hard reset of the lead entry region after user confirmation.
///
/// Clears every field and the photo regardless of toggle state, but never
/// the two internal email addresses. Checkboxes reset to unchecked except
/// cc-customer, which is checked for the next lead.
pub fn full_clear(form: &mut LeadForm, photo: &mut PhotoStaging) {
    for field in FieldId::ALL {
        form.reset_field(field);
    }
    form.gdpr = false;
    form.cc_customer = true;
    photo.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::form::DEFAULT_INTEREST;
    use std::path::Path;

    fn filled_form() -> LeadForm {
        let mut form = LeadForm::default();
        for field in FieldId::ALL {
            form.set_value(field, "x".to_string());
        }
        form.gdpr = true;
        form.cc_customer = false;
        form
    }

    fn no_toggles() -> Toggles {
        let mut toggles = Toggles::default();
        for id in ToggleId::ALL {
            toggles.set(id, false);
        }
        toggles
    }

    #[test]
    fn test_partial_clear_with_no_toggles_clears_nothing() {
        let mut form = filled_form();
        let before = form.clone();
        let mut photo = PhotoStaging::default();
        let mut settings = Settings::default();

        let cleared = partial_clear(&mut form, &mut photo, &mut settings, &no_toggles());

        assert!(!cleared);
        assert_eq!(form, before);
    }

    #[test]
    fn test_partial_clear_only_touches_checked_toggles() {
        let mut form = filled_form();
        let mut photo = PhotoStaging::default();
        let mut settings = Settings::default();
        let mut toggles = no_toggles();
        toggles.set(ToggleId::FirstName, true);
        toggles.set(ToggleId::Phone, true);

        let cleared = partial_clear(&mut form, &mut photo, &mut settings, &toggles);

        assert!(cleared);
        assert_eq!(form.first_name, "");
        assert_eq!(form.phone, "");
        assert_eq!(form.last_name, "x");
        assert_eq!(form.company, "x");
    }

    #[test]
    fn test_partial_clear_interest_resets_to_default_never_empty() {
        let mut form = filled_form();
        let mut photo = PhotoStaging::default();
        let mut settings = Settings::default();
        let mut toggles = no_toggles();
        toggles.set(ToggleId::Interest, true);

        partial_clear(&mut form, &mut photo, &mut settings, &toggles);

        assert_eq!(form.interest, DEFAULT_INTEREST);
    }

    #[test]
    fn test_partial_clear_checkbox_defaults() {
        let mut form = filled_form();
        let mut photo = PhotoStaging::default();
        let mut settings = Settings::default();
        let mut toggles = no_toggles();
        toggles.set(ToggleId::Gdpr, true);
        toggles.set(ToggleId::CcCustomer, true);

        partial_clear(&mut form, &mut photo, &mut settings, &toggles);

        assert!(!form.gdpr);
        assert!(form.cc_customer);
    }

    #[test]
    fn test_partial_clear_photo_toggle_clears_staged_photo() {
        let mut form = filled_form();
        let mut photo = PhotoStaging::default();
        let token = photo.select(Path::new("card.png")).unwrap();
        photo.set_buffer(
            token,
            crate::photo::StagedBuffer {
                width: 1,
                height: 1,
                rgba: vec![0, 0, 0, 255],
            },
        );
        assert!(photo.has_photo());
        let mut settings = Settings::default();
        let mut toggles = no_toggles();
        toggles.set(ToggleId::Photo, true);

        partial_clear(&mut form, &mut photo, &mut settings, &toggles);

        assert!(!photo.has_photo());
    }

    #[test]
    fn test_partial_clear_can_empty_preference_emails() {
        let mut form = filled_form();
        let mut photo = PhotoStaging::default();
        let mut settings = Settings::default();
        let mut toggles = no_toggles();
        toggles.set(ToggleId::SalesEmail, true);

        partial_clear(&mut form, &mut photo, &mut settings, &toggles);

        assert_eq!(settings.sales_email, "");
    }

    #[test]
    fn test_full_clear_resets_everything_but_settings() {
        let mut form = filled_form();
        let mut photo = PhotoStaging::default();
        let token = photo.select(Path::new("card.png")).unwrap();
        photo.set_buffer(
            token,
            crate::photo::StagedBuffer {
                width: 1,
                height: 1,
                rgba: vec![0, 0, 0, 255],
            },
        );
        let settings = Settings::default();
        let settings_before = settings.clone();

        full_clear(&mut form, &mut photo);

        for field in FieldId::ALL {
            if field == FieldId::Interest {
                assert_eq!(form.interest, DEFAULT_INTEREST);
            } else {
                assert_eq!(form.value(field), "");
            }
        }
        assert!(!form.gdpr);
        assert!(form.cc_customer);
        assert!(!photo.has_photo());
        // The internal emails are not part of the lead entry region.
        assert_eq!(settings, settings_before);
    }
}
