/// Live state of the lead entry form.
///
/// These are the values the composer reads at send time. Nothing here is
/// persisted; a lead exists only for the duration of composing one
/// outgoing message.

/// Interest category the dropdown falls back to.
pub const DEFAULT_INTEREST: &str = "Investition";

/// Fixed interest categories offered by the dropdown.
pub const INTEREST_OPTIONS: [&str; 5] = [
    "Investition",
    "Leasing",
    "Mietkauf",
    "Factoring",
    "Sonstiges",
];

/// Identifier of one text-like form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
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
}

impl FieldId {
    /// Every text-like field in the lead entry region.
    pub const ALL: [FieldId; 15] = [
        FieldId::Event,
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::Company,
        FieldId::Position,
        FieldId::Street,
        FieldId::Zip,
        FieldId::City,
        FieldId::Website,
        FieldId::CustomerEmail,
        FieldId::Phone,
        FieldId::Amount,
        FieldId::Timeline,
        FieldId::Message,
        FieldId::Interest,
    ];

    /// Value a reset puts back into this field. Everything empties except
    /// the interest dropdown, which snaps to its fixed default category.
    pub fn reset_value(self) -> &'static str {
        match self {
            FieldId::Interest => DEFAULT_INTEREST,
            _ => "",
        }
    }
}

/// All live form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadForm {
    pub event: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub position: String,
    pub street: String,
    pub zip: String,
    pub city: String,
    pub website: String,
    pub customer_email: String,
    pub phone: String,
    /// Free text, de-DE formatted on commit.
    pub amount: String,
    pub timeline: String,
    pub message: String,
    pub interest: String,
    /// GDPR consent. Never pre-checked.
    pub gdpr: bool,
    /// Put the customer in CC. Checked by default for a new lead.
    pub cc_customer: bool,
}

impl Default for LeadForm {
    fn default() -> Self {
        LeadForm {
            event: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            company: String::new(),
            position: String::new(),
            street: String::new(),
            zip: String::new(),
            city: String::new(),
            website: String::new(),
            customer_email: String::new(),
            phone: String::new(),
            amount: String::new(),
            timeline: String::new(),
            message: String::new(),
            interest: DEFAULT_INTEREST.to_string(),
            gdpr: false,
            cc_customer: true,
        }
    }
}

impl LeadForm {
    pub fn value(&self, id: FieldId) -> &str {
        match id {
            FieldId::Event => &self.event,
            FieldId::FirstName => &self.first_name,
            FieldId::LastName => &self.last_name,
            FieldId::Company => &self.company,
            FieldId::Position => &self.position,
            FieldId::Street => &self.street,
            FieldId::Zip => &self.zip,
            FieldId::City => &self.city,
            FieldId::Website => &self.website,
            FieldId::CustomerEmail => &self.customer_email,
            FieldId::Phone => &self.phone,
            FieldId::Amount => &self.amount,
            FieldId::Timeline => &self.timeline,
            FieldId::Message => &self.message,
            FieldId::Interest => &self.interest,
        }
    }

    pub fn set_value(&mut self, id: FieldId, value: String) {
        let slot = match id {
            FieldId::Event => &mut self.event,
            FieldId::FirstName => &mut self.first_name,
            FieldId::LastName => &mut self.last_name,
            FieldId::Company => &mut self.company,
            FieldId::Position => &mut self.position,
            FieldId::Street => &mut self.street,
            FieldId::Zip => &mut self.zip,
            FieldId::City => &mut self.city,
            FieldId::Website => &mut self.website,
            FieldId::CustomerEmail => &mut self.customer_email,
            FieldId::Phone => &mut self.phone,
            FieldId::Amount => &mut self.amount,
            FieldId::Timeline => &mut self.timeline,
            FieldId::Message => &mut self.message,
            FieldId::Interest => &mut self.interest,
        };
        *slot = value;
    }

    /// Reset one field to its default value.
    pub fn reset_field(&mut self, id: FieldId) {
        self.set_value(id, id.reset_value().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lead_defaults() {
        let form = LeadForm::default();
        assert_eq!(form.interest, DEFAULT_INTEREST);
        assert!(form.cc_customer);
        assert!(!form.gdpr);
    }

    #[test]
    fn test_reset_field_interest_snaps_to_default() {
        let mut form = LeadForm::default();
        form.interest = "Leasing".to_string();
        form.reset_field(FieldId::Interest);
        assert_eq!(form.interest, DEFAULT_INTEREST);
    }

    #[test]
    fn test_value_set_value_cover_every_field() {
        let mut form = LeadForm::default();
        for id in FieldId::ALL {
            form.set_value(id, "x".to_string());
            assert_eq!(form.value(id), "x");
        }
    }
}
