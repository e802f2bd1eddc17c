use std::fmt;
use std::sync::LazyLock;

use crate::domain::validation::ValidationError;

use phonenumber::country;
use regex::Regex;

/// Number format accepted by the gateway: optional leading `+` or `00`,
/// then one or more decimal digits, nothing else.
static PHONE_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+|00)?[0-9]+$").expect("phone number pattern compiles"));

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS Gate account login.
///
/// Invariant: non-empty after trimming.
pub struct Login(String);

impl Login {
    /// Query parameter name used by the gateway (`login`).
    pub const FIELD: &'static str = "login";

    /// Create a validated [`Login`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated login.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS Gate account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Query parameter name used by the gateway (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient phone number in the gateway's wire format.
///
/// Invariant: optional leading `+` or `00` followed by one or more decimal
/// digits, with no other characters (whitespace included). The value is
/// validated exactly as given; nothing is stripped or normalized. Use
/// [`PhoneNumber::parse`] to accept human-formatted input.
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// XML element name used in the outgoing document (`recipient`).
    pub const ELEMENT: &'static str = "recipient";

    /// Check a candidate against the gateway number format.
    ///
    /// Pure predicate: `"+420777123456"` and `"00420777123456"` pass,
    /// `"777-123-456"`, `"abc"` and the empty string do not.
    pub fn is_valid(value: &str) -> bool {
        PHONE_NUMBER_PATTERN.is_match(value)
    }

    /// Create a validated [`PhoneNumber`] from a value already in wire format.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !Self::is_valid(&value) {
            return Err(ValidationError::InvalidPhoneNumber { input: value });
        }
        Ok(Self(value))
    }

    /// Parse a human-formatted number and normalize it to E.164.
    ///
    /// `default_region` is used when the input has no explicit country
    /// prefix. The E.164 form (`+` followed by digits) always satisfies the
    /// gateway format.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: Self::ELEMENT,
            });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Self::new(e164)
    }

    /// Borrow the validated number as sent to the gateway.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Gateway-assigned message id, as returned by a send and echoed in
/// delivery reports.
///
/// Invariant: non-empty after trimming.
pub struct MessageId(String);

impl MessageId {
    /// Query parameter name used by the confirm operation (`id`).
    pub const FIELD: &'static str = "id";

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Delivery-confirmation request attached to an outgoing message.
///
/// The gateway encodes this as the optional `dr_request` element:
/// [`Unset`](Self::Unset) omits the element, [`Disabled`](Self::Disabled)
/// sends `0`, and [`IntervalMinutes`](Self::IntervalMinutes) sends the
/// requested reporting window in minutes.
pub enum DeliveryConfirmation {
    /// No preference; the element is left out of the request entirely.
    #[default]
    Unset,
    /// Explicitly decline a delivery report (`dr_request` = `0`).
    Disabled,
    /// Request a delivery report within the given window (`dr_request` = n).
    IntervalMinutes(u16),
}

impl DeliveryConfirmation {
    /// XML element name used in the outgoing document (`dr_request`).
    pub const ELEMENT: &'static str = "dr_request";

    /// Reporting window the gateway documents as its default.
    pub const DEFAULT_INTERVAL_MINUTES: u16 = 20;

    /// Request a delivery report within the default 20-minute window.
    pub fn requested() -> Self {
        Self::IntervalMinutes(Self::DEFAULT_INTERVAL_MINUTES)
    }

    /// Wire value for the `dr_request` element; `None` means the element is
    /// omitted.
    pub fn interval_minutes(self) -> Option<u16> {
        match self {
            Self::Unset => None,
            Self::Disabled => Some(0),
            Self::IntervalMinutes(minutes) => Some(minutes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_trims_and_rejects_empty() {
        let login = Login::new(" user ").unwrap();
        assert_eq!(login.as_str(), "user");
        assert!(Login::new("").is_err());
        assert!(Login::new("   ").is_err());
    }

    #[test]
    fn password_preserves_whitespace_and_rejects_empty() {
        let password = Password::new(" secret ").unwrap();
        assert_eq!(password.as_str(), " secret ");
        assert!(Password::new("").is_err());
    }

    #[test]
    fn phone_number_format_accepts_gateway_shapes() {
        assert!(PhoneNumber::is_valid("+420777123456"));
        assert!(PhoneNumber::is_valid("00420777123456"));
        assert!(PhoneNumber::is_valid("777123456"));
    }

    #[test]
    fn phone_number_format_rejects_everything_else() {
        assert!(!PhoneNumber::is_valid(""));
        assert!(!PhoneNumber::is_valid("+"));
        assert!(!PhoneNumber::is_valid("00"));
        assert!(!PhoneNumber::is_valid("777-123-456"));
        assert!(!PhoneNumber::is_valid("abc"));
        assert!(!PhoneNumber::is_valid("+420 777 123 456"));
        assert!(!PhoneNumber::is_valid(" 420777123456"));
        assert!(!PhoneNumber::is_valid("420777123456 "));
        assert!(!PhoneNumber::is_valid("++420777123456"));
    }

    #[test]
    fn phone_number_new_keeps_the_input_verbatim() {
        let number = PhoneNumber::new("00420777123456").unwrap();
        assert_eq!(number.as_str(), "00420777123456");

        let err = PhoneNumber::new("777 123 456").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPhoneNumber { .. }));
    }

    #[test]
    fn phone_number_parse_normalizes_to_e164() {
        let number = PhoneNumber::parse(None, "+420 777 123 456").unwrap();
        assert_eq!(number.as_str(), "+420777123456");

        let regional = PhoneNumber::parse(Some(country::Id::CZ), "777 123 456").unwrap();
        assert_eq!(regional.as_str(), "+420777123456");

        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
        assert!(PhoneNumber::parse(None, "  ").is_err());
    }

    #[test]
    fn message_id_trims_and_rejects_empty() {
        let id = MessageId::new(" 12345 ").unwrap();
        assert_eq!(id.as_str(), "12345");
        assert!(MessageId::new("  ").is_err());
    }

    #[test]
    fn delivery_confirmation_maps_to_wire_values() {
        assert_eq!(DeliveryConfirmation::Unset.interval_minutes(), None);
        assert_eq!(DeliveryConfirmation::Disabled.interval_minutes(), Some(0));
        assert_eq!(
            DeliveryConfirmation::IntervalMinutes(45).interval_minutes(),
            Some(45)
        );
        assert_eq!(
            DeliveryConfirmation::requested().interval_minutes(),
            Some(20)
        );
        assert_eq!(
            DeliveryConfirmation::default(),
            DeliveryConfirmation::Unset
        );
    }
}
