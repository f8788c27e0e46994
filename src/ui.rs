//! Form layout. Pure view code: every widget maps straight to a message,
//! all state changes happen in the update loop.

use iced::widget::{button, checkbox, column, image, pick_list, row, text, text_input};
use iced::{Alignment, Color, Element, Length};

use crate::photo::PhotoStaging;
use crate::state::form::{FieldId, LeadForm, INTEREST_OPTIONS};
use crate::state::settings::Settings;
use crate::state::toggles::{ToggleId, Toggles};
use crate::status::{Status, StatusLevel};
use crate::Message;

/// Title, live clock and the transient status line.
pub fn header<'a>(clock: &'a str, status: Option<&'a Status>) -> Element<'a, Message> {
    let mut col = column![row![
        text("Lead Erfassung").size(26),
        text(clock).size(15),
    ]
    .spacing(20)
    .align_y(Alignment::Center)]
    .spacing(6);

    if let Some(status) = status {
        col = col.push(
            text(&status.text)
                .size(14)
                .color(status_color(status.level)),
        );
    }

    col.into()
}

fn status_color(level: StatusLevel) -> Color {
    match level {
        StatusLevel::Success => Color::from_rgb(0.18, 0.55, 0.24),
        StatusLevel::Warning => Color::from_rgb(0.72, 0.53, 0.04),
        StatusLevel::Error => Color::from_rgb(0.72, 0.11, 0.11),
    }
}

/// The two protected internal email addresses.
pub fn settings_card<'a>(settings: &'a Settings, toggles: &'a Toggles) -> Element<'a, Message> {
    column![
        text("Interne Empfänger").size(18),
        row![
            text_input("E-Mail Vertrieb", &settings.sales_email)
                .on_input(Message::SalesEmailEdited)
                .padding(8),
            clear_toggle(ToggleId::SalesEmail, toggles),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        row![
            text_input("E-Mail Assistenz", &settings.assistant_email)
                .on_input(Message::AssistantEmailEdited)
                .padding(8),
            clear_toggle(ToggleId::AssistantEmail, toggles),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    ]
    .spacing(8)
    .into()
}

/// All lead fields, the interest dropdown, consent checkboxes and the
/// photo area. The small checkbox next to each field is its
/// partial-clear toggle.
pub fn lead_card<'a>(
    form: &'a LeadForm,
    toggles: &'a Toggles,
    photo: &'a PhotoStaging,
) -> Element<'a, Message> {
    let selected_interest = INTEREST_OPTIONS
        .iter()
        .copied()
        .find(|option| *option == form.interest);

    column![
        text("Lead").size(18),
        field_row("Event", form, FieldId::Event, ToggleId::Event, toggles),
        field_row("Vorname", form, FieldId::FirstName, ToggleId::FirstName, toggles),
        field_row("Nachname", form, FieldId::LastName, ToggleId::LastName, toggles),
        field_row("Firma", form, FieldId::Company, ToggleId::Company, toggles),
        field_row("Position", form, FieldId::Position, ToggleId::Position, toggles),
        field_row("Straße", form, FieldId::Street, ToggleId::Street, toggles),
        field_row("PLZ", form, FieldId::Zip, ToggleId::Zip, toggles),
        field_row("Ort", form, FieldId::City, ToggleId::City, toggles),
        field_row("Webseite", form, FieldId::Website, ToggleId::Website, toggles),
        field_row(
            "E-Mail Kunde",
            form,
            FieldId::CustomerEmail,
            ToggleId::CustomerEmail,
            toggles
        ),
        field_row("Telefon", form, FieldId::Phone, ToggleId::Phone, toggles),
        // The amount re-formats itself (de-DE) when committed with Enter.
        row![
            text_input("Volumen (€)", &form.amount)
                .on_input(|value| Message::FieldEdited(FieldId::Amount, value))
                .on_submit(Message::AmountCommitted)
                .padding(8),
            clear_toggle(ToggleId::Amount, toggles),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        field_row("Zeitraum", form, FieldId::Timeline, ToggleId::Timeline, toggles),
        row![
            pick_list(
                &INTEREST_OPTIONS[..],
                selected_interest,
                Message::InterestSelected
            )
            .placeholder("Interesse")
            .width(Length::Fill)
            .padding(8),
            clear_toggle(ToggleId::Interest, toggles),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        field_row("Nachricht", form, FieldId::Message, ToggleId::Message, toggles),
        photo_section(photo, toggles),
        row![
            checkbox("DSGVO-Zustimmung erteilt", form.gdpr).on_toggle(Message::GdprToggled),
            clear_toggle(ToggleId::Gdpr, toggles),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        row![
            checkbox("Kunde in CC", form.cc_customer).on_toggle(Message::CcCustomerToggled),
            clear_toggle(ToggleId::CcCustomer, toggles),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    ]
    .spacing(8)
    .into()
}

/// Send / partial clear / full clear.
pub fn actions<'a>() -> Element<'a, Message> {
    row![
        button(text("Lead senden"))
            .on_press(Message::Send)
            .padding(10)
            .style(button::success),
        button(text("Markierte Felder leeren"))
            .on_press(Message::PartialClear)
            .padding(10)
            .style(button::secondary),
        button(text("Alles leeren"))
            .on_press(Message::FullClear)
            .padding(10)
            .style(button::danger),
    ]
    .spacing(12)
    .into()
}

fn field_row<'a>(
    placeholder: &'a str,
    form: &'a LeadForm,
    field: FieldId,
    toggle: ToggleId,
    toggles: &Toggles,
) -> Element<'a, Message> {
    row![
        text_input(placeholder, form.value(field))
            .on_input(move |value| Message::FieldEdited(field, value))
            .padding(8),
        clear_toggle(toggle, toggles),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

/// The per-field partial-clear toggle.
fn clear_toggle<'a>(toggle: ToggleId, toggles: &Toggles) -> Element<'a, Message> {
    checkbox("", toggles.is_checked(toggle))
        .on_toggle(move |on| Message::ToggleChanged(toggle, on))
        .size(16)
        .into()
}

fn photo_section<'a>(photo: &'a PhotoStaging, toggles: &Toggles) -> Element<'a, Message> {
    let picker = row![
        button(text("Foto auswählen"))
            .on_press(Message::PickPhoto)
            .padding(8),
        clear_toggle(ToggleId::Photo, toggles),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let mut col = column![picker].spacing(8);

    if let Some(handle) = photo.preview() {
        col = col.push(
            row![
                image(handle.clone()).width(Length::Fixed(140.0)),
                button(text("Entfernen"))
                    .on_press(Message::RemovePhoto)
                    .padding(6)
                    .style(button::secondary),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        );
    }

    col.into()
}
