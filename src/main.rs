use std::time::Duration;

use chrono::Local;
use iced::widget::image::Handle;
use iced::widget::{column, container, horizontal_rule, scrollable};
use iced::{Element, Length, Subscription, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

mod clear;
mod compose;
mod photo;
mod state;
mod status;
mod ui;

use photo::{PhotoStaging, StagedBuffer};
use state::form::{FieldId, LeadForm};
use state::settings::Settings;
use state::store::Store;
use state::toggles::{ToggleId, Toggles};
use status::{StatusBar, StatusLevel};

/// Main application state
struct LeadCapture {
    /// The key/value settings database
    store: Store,
    /// The two persisted internal email addresses
    settings: Settings,
    /// Persisted partial-clear toggle map
    toggles: Toggles,
    /// Live lead form values (never persisted)
    form: LeadForm,
    /// The single staged-photo slot
    photo: PhotoStaging,
    /// Transient status message
    status: StatusBar,
    /// Header clock text, refreshed once per second
    clock: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// One-second clock tick
    Tick,
    /// A lead form field was edited
    FieldEdited(FieldId, String),
    /// The amount field was committed (Enter) and wants de-DE formatting
    AmountCommitted,
    /// An interest category was picked
    InterestSelected(&'static str),
    GdprToggled(bool),
    CcCustomerToggled(bool),
    /// Preference email edits; persisted immediately
    SalesEmailEdited(String),
    AssistantEmailEdited(String),
    /// A partial-clear toggle changed; the whole map is persisted
    ToggleChanged(ToggleId, bool),
    /// User clicked the photo picker button
    PickPhoto,
    /// Async preview decode finished (token ties it to its selection)
    PhotoPreviewLoaded(u64, Result<Handle, String>),
    /// Async clipboard-buffer decode finished
    PhotoBufferReady(u64, Result<StagedBuffer, String>),
    RemovePhoto,
    /// Compose and hand off the lead to the mail client
    Send,
    PartialClear,
    FullClear,
    /// A status dismiss timer fired
    DismissStatus(u64),
}

impl LeadCapture {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // If this fails, we panic because the app cannot function without
        // its settings store
        let store = Store::open()
            .expect("Failed to initialize settings store. Check permissions and disk space.");

        let settings = Settings::load(&store);
        let toggles = Toggles::load(&store);
        println!("📋 Lead capture ready");

        (
            LeadCapture {
                store,
                settings,
                toggles,
                form: LeadForm::default(),
                photo: PhotoStaging::default(),
                status: StatusBar::default(),
                clock: compose::format_clock(&Local::now()),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                self.clock = compose::format_clock(&Local::now());
                Task::none()
            }
            Message::FieldEdited(field, value) => {
                self.form.set_value(field, value);
                Task::none()
            }
            Message::AmountCommitted => {
                // Empty input stays untouched; unparsable input clears.
                if !self.form.amount.trim().is_empty() {
                    self.form.amount =
                        compose::format_amount(&self.form.amount).unwrap_or_default();
                }
                Task::none()
            }
            Message::InterestSelected(interest) => {
                self.form.interest = interest.to_string();
                Task::none()
            }
            Message::GdprToggled(checked) => {
                self.form.gdpr = checked;
                Task::none()
            }
            Message::CcCustomerToggled(checked) => {
                self.form.cc_customer = checked;
                Task::none()
            }
            Message::SalesEmailEdited(value) => {
                self.settings.sales_email = value;
                self.persist_settings();
                Task::none()
            }
            Message::AssistantEmailEdited(value) => {
                self.settings.assistant_email = value;
                self.persist_settings();
                Task::none()
            }
            Message::ToggleChanged(id, on) => {
                self.toggles.set(id, on);
                self.persist_toggles();
                Task::none()
            }
            Message::PickPhoto => {
                let file = FileDialog::new()
                    .set_title("Foto der Visitenkarte auswählen")
                    .add_filter("Bilder", &photo::IMAGE_EXTENSIONS)
                    .pick_file();

                if let Some(path) = file {
                    // Non-image picks are silently ignored.
                    if let Some(token) = self.photo.select(&path) {
                        // Preview and clipboard buffer decode independently;
                        // neither waits for the other.
                        return Task::batch([
                            Task::perform(photo::load_preview(path.clone()), move |result| {
                                Message::PhotoPreviewLoaded(token, result)
                            }),
                            Task::perform(photo::encode_buffer(path), move |result| {
                                Message::PhotoBufferReady(token, result)
                            }),
                        ]);
                    }
                }
                Task::none()
            }
            Message::PhotoPreviewLoaded(token, result) => {
                match result {
                    Ok(handle) => self.photo.set_preview(token, handle),
                    Err(e) => eprintln!("⚠️  Photo preview failed: {}", e),
                }
                Task::none()
            }
            Message::PhotoBufferReady(token, result) => {
                match result {
                    Ok(buffer) => self.photo.set_buffer(token, buffer),
                    Err(e) => eprintln!("⚠️  Photo re-encode failed: {}", e),
                }
                Task::none()
            }
            Message::RemovePhoto => {
                self.photo.clear();
                Task::none()
            }
            Message::Send => self.send_lead(),
            Message::PartialClear => {
                let cleared = clear::partial_clear(
                    &mut self.form,
                    &mut self.photo,
                    &mut self.settings,
                    &self.toggles,
                );
                if cleared {
                    // A cleared preference email must stick across restarts.
                    self.persist_settings();
                }

                let message = if cleared {
                    "Markierte Felder bereinigt."
                } else {
                    "Keine Felder zum Leeren markiert."
                };
                self.show_status(message, StatusLevel::Warning)
            }
            Message::FullClear => {
                let confirmed = MessageDialog::new()
                    .set_level(MessageLevel::Warning)
                    .set_title("Alles löschen?")
                    .set_description(
                        "Wirklich ALLES löschen? (Interne E-Mails bleiben erhalten, außer sie \
                         wurden via \"markierte Felder leeren\" entfernt)",
                    )
                    .set_buttons(MessageButtons::YesNo)
                    .show();

                if confirmed != MessageDialogResult::Yes {
                    return Task::none();
                }

                clear::full_clear(&mut self.form, &mut self.photo);
                self.show_status("Formular geleert.", StatusLevel::Error)
            }
            Message::DismissStatus(seq) => {
                self.status.dismiss(seq);
                Task::none()
            }
        }
    }

    /// Compose the lead and hand it off to the OS mail handler.
    fn send_lead(&mut self) -> Task<Message> {
        // Only the internal recipients are required for functionality.
        if !self.settings.has_internal_recipient() {
            MessageDialog::new()
                .set_level(MessageLevel::Error)
                .set_title("Fehlende Empfänger")
                .set_description(
                    "Fehler: Bitte mindestens eine interne E-Mail-Adresse (Vertrieb oder \
                     Assistenz) angeben.",
                )
                .set_buttons(MessageButtons::Ok)
                .show();
            return Task::none();
        }

        let mut tasks = Vec::new();

        // The mail handoff cannot carry attachments, so the photo travels
        // through the clipboard instead. Clipboard trouble never blocks
        // the send itself.
        let mut image_note = None;
        if self.photo.has_photo() {
            let copy_result = match self.photo.buffer_for_clipboard() {
                Some(buffer) => photo::copy_to_clipboard(buffer),
                None => Err("Foto ist noch nicht bereit".to_string()),
            };

            match copy_result {
                Ok(()) => {
                    image_note = Some(compose::IMAGE_NOTE);
                    // Blocking on purpose: the user has to register the
                    // clipboard hint before the mail client opens on top.
                    MessageDialog::new()
                        .set_level(MessageLevel::Info)
                        .set_title("Foto kopiert")
                        .set_description(
                            "📸 Foto kopiert!\n\nDas Foto der Visitenkarte befindet sich in der \
                             Zwischenablage.\n\nBitte in der E-Mail 'Einfügen' wählen.",
                        )
                        .set_buttons(MessageButtons::Ok)
                        .show();
                }
                Err(e) => {
                    eprintln!("⚠️  Clipboard failed: {}", e);
                    tasks.push(self.show_status(
                        "Foto konnte nicht kopiert werden.",
                        StatusLevel::Error,
                    ));
                }
            }
        }

        // Captured exactly once, at the moment of sending.
        let timestamp = compose::format_timestamp(&Local::now());
        let mailto = compose::build_mailto_for(&self.form, &self.settings, &timestamp, image_note);

        // Fire-and-forget: success means the OS accepted the request.
        match webbrowser::open(&mailto) {
            Ok(()) => println!("📧 Mail handoff at {}", timestamp),
            Err(e) => eprintln!("⚠️  Failed to open mail client: {}", e),
        }

        tasks.push(self.show_status(
            format!("Lead vorbereitet! Versandzeit: {}", timestamp),
            StatusLevel::Success,
        ));
        Task::batch(tasks)
    }

    /// Show a status message and schedule its auto-dismissal.
    fn show_status(&mut self, text: impl Into<String>, level: StatusLevel) -> Task<Message> {
        let seq = self.status.show(text, level);
        Task::perform(tokio::time::sleep(status::DISMISS_AFTER), move |_| {
            Message::DismissStatus(seq)
        })
    }

    fn persist_settings(&self) {
        if let Err(e) = self.settings.save(&self.store) {
            eprintln!("⚠️  Failed to save settings: {}", e);
        }
    }

    fn persist_toggles(&self) {
        if let Err(e) = self.toggles.save(&self.store) {
            eprintln!("⚠️  Failed to save toggles: {}", e);
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let content = column![
            ui::header(&self.clock, self.status.current()),
            horizontal_rule(1),
            ui::settings_card(&self.settings, &self.toggles),
            horizontal_rule(1),
            ui::lead_card(&self.form, &self.toggles, &self.photo),
            ui::actions(),
        ]
        .spacing(16)
        .padding(24)
        .max_width(560);

        scrollable(container(content).width(Length::Fill).center_x(Length::Fill)).into()
    }

    /// Keep the header clock ticking for the lifetime of the app
    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(Duration::from_secs(1)).map(|_| Message::Tick)
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> iced::Result {
    iced::application("Lead Erfassung", LeadCapture::update, LeadCapture::view)
        .subscription(LeadCapture::subscription)
        .theme(LeadCapture::theme)
        .window_size((560.0, 820.0))
        .centered()
        .run_with(LeadCapture::new)
}
