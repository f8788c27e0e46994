/// State management module
///
/// This module handles all application state, including:
/// - The key/value settings database (store.rs)
/// - The two persisted internal email addresses (settings.rs)
/// - The persisted partial-clear toggle map (toggles.rs)
/// - The live, never-persisted lead form values (form.rs)

pub mod form;
pub mod settings;
pub mod store;
pub mod toggles;
