//! Lead Composer: turns the live form into a `mailto:` handoff.
//!
//! Everything here is a pure function over the form snapshot so the exact
//! wire text (subject, body, URI) is unit-testable. The side-effecting
//! parts of sending (clipboard, dialogs, opening the URI) stay in the
//! update loop.

use chrono::{Datelike, Timelike};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::state::form::LeadForm;
use crate::state::settings::Settings;

/// Two-letter German weekday abbreviations, indexed from Sunday.
const WEEKDAYS: [&str; 7] = ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"];

/// Delimiter between subject parts.
const SUBJECT_SEPARATOR: &str = " | ";

/// Note appended to the body after a successful clipboard placement.
pub const IMAGE_NOTE: &str =
    "\r\n\r\n>>> FOTO HIER EINFÜGEN (Foto liegt in der Zwischenablage) <<<";

/// Technical send timestamp: `YYYY-MM-DD-HH-MM-SS <weekday>`.
///
/// Captured exactly once per send, at the moment of sending.
pub fn format_timestamp<T: Datelike + Timelike>(now: &T) -> String {
    let weekday = WEEKDAYS[now.weekday().num_days_from_sunday() as usize];
    format!(
        "{:04}-{:02}-{:02}-{:02}-{:02}-{:02} {}",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
        weekday
    )
}

/// Header clock line: `dd.mm.yyyy HH:MM:SS`.
pub fn format_clock<T: Datelike + Timelike>(now: &T) -> String {
    format!(
        "{:02}.{:02}.{:04} {:02}:{:02}:{:02}",
        now.day(),
        now.month(),
        now.year(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

/// Subject line: non-empty parts joined with ` | `, empty parts dropped
/// entirely so no stray delimiters appear.
pub fn build_subject(form: &LeadForm, timestamp: &str) -> String {
    [
        form.first_name.as_str(),
        form.last_name.as_str(),
        form.company.as_str(),
        form.amount.as_str(),
        form.event.as_str(),
        timestamp,
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(SUBJECT_SEPARATOR)
}

/// Plain-text body with fixed section headers.
///
/// Uses `\r\n` line endings for mail-client compatibility, `-` as the
/// placeholder for empty optional fields and `Kein Event` / `Keine` as the
/// semantic defaults for the event and interest lines. `image_note` is
/// appended only after the photo actually landed on the clipboard.
pub fn build_body(form: &LeadForm, timestamp: &str, image_note: Option<&str>) -> String {
    fn or_dash(value: &str) -> &str {
        if value.is_empty() {
            "-"
        } else {
            value
        }
    }

    let mut body = String::new();
    body.push_str(&format!(
        "LEAD ERFASSUNG - {}\r\n",
        if form.event.is_empty() {
            "Kein Event"
        } else {
            &form.event
        }
    ));
    body.push_str("----------------------------------------\r\n");
    body.push_str(&format!("Datum: {}\r\n\r\n", timestamp));

    body.push_str("KONTAKT:\r\n");
    body.push_str(&format!("Name: {} {}\r\n", form.first_name, form.last_name));
    body.push_str(&format!("Firma: {}\r\n", form.company));
    body.push_str(&format!("Position: {}\r\n", or_dash(&form.position)));
    body.push_str(&format!(
        "Adresse: {} {} {}\r\n",
        form.street, form.zip, form.city
    ));
    body.push_str(&format!("Web: {}\r\n", or_dash(&form.website)));
    body.push_str(&format!("E-Mail: {}\r\n", form.customer_email));
    body.push_str(&format!("Tel: {}\r\n\r\n", or_dash(&form.phone)));

    body.push_str("INTERESSE:\r\n");
    body.push_str(if form.interest.is_empty() {
        "Keine"
    } else {
        &form.interest
    });
    body.push_str("\r\n\r\n");

    body.push_str("DETAILS:\r\n");
    body.push_str(&format!("Volumen: {}\r\n", or_dash(&form.amount)));
    body.push_str(&format!("Zeitraum: {}\r\n\r\n", or_dash(&form.timeline)));

    body.push_str("NACHRICHT:\r\n");
    body.push_str(or_dash(&form.message));

    if let Some(note) = image_note {
        body.push_str(note);
    }

    body.push_str("\r\n\r\n----------------------------------------\r\n");
    body.push_str(&format!(
        "DSGVO Zustimmung: {}",
        if form.gdpr { "JA" } else { "NEIN" }
    ));

    body
}

/// CC value: the customer's email, but only if the cc flag is checked.
pub fn build_cc(form: &LeadForm) -> String {
    if form.cc_customer {
        form.customer_email.clone()
    } else {
        String::new()
    }
}

/// Assemble the final `mailto:` URI. CC, subject and body are
/// percent-encoded independently; the recipient list is passed through.
pub fn build_mailto(recipients: &str, cc: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?cc={}&subject={}&body={}",
        recipients,
        utf8_percent_encode(cc, NON_ALPHANUMERIC),
        utf8_percent_encode(subject, NON_ALPHANUMERIC),
        utf8_percent_encode(body, NON_ALPHANUMERIC)
    )
}

/// Everything needed for one send, built from one form snapshot.
pub fn build_mailto_for(form: &LeadForm, settings: &Settings, timestamp: &str, image_note: Option<&str>) -> String {
    let subject = build_subject(form, timestamp);
    let body = build_body(form, timestamp, image_note);
    let cc = build_cc(form);
    build_mailto(&settings.recipients(), &cc, &subject, &body)
}

/// Normalize a de-DE currency amount, e.g. `10.000,5` -> `10.000,50`.
///
/// Dots are stripped as thousands separators and the comma becomes the
/// decimal point before parsing. Parsing takes the leading numeric
/// prefix, so trailing junk (`12a`) still yields a number. Returns
/// `None` when no number starts the cleaned-up text; the caller clears
/// the field in that case. Empty input is the caller's concern (left
/// untouched, matching the original blur handler).
pub fn format_amount(input: &str) -> Option<String> {
    let cleaned = input.trim().replace('.', "").replace(',', ".");
    let number = numeric_prefix(&cleaned)?;
    if !number.is_finite() {
        return None;
    }

    let negative = number < 0.0;
    // Two fixed fraction digits, rounded.
    let cents = (number.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    // Group the integer digits in threes with `.` separators.
    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    Some(format!(
        "{}{},{:02}",
        if negative { "-" } else { "" },
        grouped,
        fraction
    ))
}

/// Parse the longest leading `[+-]?digits[.digits]` prefix of `input`.
/// `None` when no digit starts the number.
fn numeric_prefix(input: &str) -> Option<f64> {
    let bytes = input.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let mut seen_digit = false;
    let mut seen_dot = false;
    while let Some(&byte) = bytes.get(end) {
        match byte {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }
    input[..end].parse().ok()
}
