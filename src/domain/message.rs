use chrono::NaiveDateTime;

use crate::domain::validation::ValidationError;
use crate::domain::value::{DeliveryConfirmation, PhoneNumber};

#[derive(Debug, Clone, PartialEq)]
/// Outgoing text message: body, recipients, optional schedule, and an
/// optional delivery-confirmation request.
///
/// The text is trimmed whenever it is set and may be empty while the
/// message is being assembled; [`SmsGateClient::send_sms`] rejects an empty
/// body before issuing any request. Every recipient in the list has passed
/// the gateway number format.
///
/// A message is built by the caller, handed to a single send call by
/// reference, and not retained by the client.
///
/// [`SmsGateClient::send_sms`]: crate::client::SmsGateClient::send_sms
pub struct OutgoingMessage {
    text: String,
    phones: Vec<PhoneNumber>,
    send_at: Option<NaiveDateTime>,
    confirmation: DeliveryConfirmation,
}

impl OutgoingMessage {
    /// Create a message with a trimmed body and a validated recipient list.
    ///
    /// Fails on the first recipient that does not match the gateway number
    /// format; no partially-constructed message is observable.
    pub fn new<I, S>(text: impl Into<String>, phones: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phones = phones
            .into_iter()
            .map(PhoneNumber::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            text: text.into().trim().to_owned(),
            phones,
            send_at: None,
            confirmation: DeliveryConfirmation::Unset,
        })
    }

    /// Replace the message body; the new value is trimmed.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into().trim().to_owned();
    }

    /// Validate and append one recipient.
    pub fn add_phone(&mut self, phone: impl Into<String>) -> Result<(), ValidationError> {
        self.phones.push(PhoneNumber::new(phone)?);
        Ok(())
    }

    /// Replace the recipient list, all-or-nothing.
    ///
    /// If any entry is invalid the stored list is left untouched.
    pub fn set_phones<I, S>(&mut self, phones: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phones = phones
            .into_iter()
            .map(PhoneNumber::new)
            .collect::<Result<Vec<_>, _>>()?;
        self.phones = phones;
        Ok(())
    }

    /// Schedule the send, or clear the schedule with `None` (send
    /// immediately).
    pub fn set_send_at(&mut self, send_at: Option<NaiveDateTime>) {
        self.send_at = send_at;
    }

    /// Set the delivery-confirmation request.
    pub fn set_confirmation(&mut self, confirmation: DeliveryConfirmation) {
        self.confirmation = confirmation;
    }

    /// The trimmed message body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Recipients, in send order.
    pub fn phones(&self) -> &[PhoneNumber] {
        &self.phones
    }

    /// Scheduled send time, if any.
    pub fn send_at(&self) -> Option<NaiveDateTime> {
        self.send_at
    }

    /// The delivery-confirmation request.
    pub fn confirmation(&self) -> DeliveryConfirmation {
        self.confirmation
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn new_trims_text_and_validates_phones() {
        let message = OutgoingMessage::new("  hello  ", ["+420111111111"]).unwrap();
        assert_eq!(message.text(), "hello");
        assert_eq!(message.phones().len(), 1);
        assert_eq!(message.phones()[0].as_str(), "+420111111111");
        assert_eq!(message.send_at(), None);
        assert_eq!(message.confirmation(), DeliveryConfirmation::Unset);
    }

    #[test]
    fn new_fails_on_first_invalid_phone() {
        let err = OutgoingMessage::new("hello", ["+420111111111", "abc"]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPhoneNumber { .. }));
    }

    #[test]
    fn new_accepts_an_empty_recipient_list() {
        let message = OutgoingMessage::new("hello", Vec::<String>::new()).unwrap();
        assert!(message.phones().is_empty());
    }

    #[test]
    fn add_phone_validates_and_appends() {
        let mut message = OutgoingMessage::new("hello", ["+420111111111"]).unwrap();
        message.add_phone("00420222222222").unwrap();
        assert_eq!(message.phones().len(), 2);
        assert_eq!(message.phones()[1].as_str(), "00420222222222");

        assert!(message.add_phone("777-123-456").is_err());
        assert_eq!(message.phones().len(), 2);
    }

    #[test]
    fn set_phones_is_atomic() {
        let mut message = OutgoingMessage::new("hello", ["+420111111111"]).unwrap();

        let err = message
            .set_phones(["+420222222222", "bad number"])
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPhoneNumber { .. }));
        assert_eq!(message.phones().len(), 1);
        assert_eq!(message.phones()[0].as_str(), "+420111111111");

        message
            .set_phones(["+420222222222", "+420333333333"])
            .unwrap();
        assert_eq!(message.phones().len(), 2);
    }

    #[test]
    fn set_text_retrims() {
        let mut message = OutgoingMessage::new("hello", Vec::<String>::new()).unwrap();
        message.set_text("  updated \n");
        assert_eq!(message.text(), "updated");
    }

    #[test]
    fn schedule_and_confirmation_round_trip() {
        let mut message = OutgoingMessage::new("hello", Vec::<String>::new()).unwrap();

        let at = NaiveDate::from_ymd_opt(2026, 1, 31)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        message.set_send_at(Some(at));
        assert_eq!(message.send_at(), Some(at));
        message.set_send_at(None);
        assert_eq!(message.send_at(), None);

        message.set_confirmation(DeliveryConfirmation::requested());
        assert_eq!(
            message.confirmation(),
            DeliveryConfirmation::IntervalMinutes(20)
        );
    }
}
