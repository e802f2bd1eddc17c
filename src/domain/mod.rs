//! Domain layer: strong types with validation and invariants (no I/O).

mod message;
mod response;
mod validation;
mod value;

pub use message::OutgoingMessage;
pub use response::{AccountStatus, SendResult};
pub use validation::ValidationError;
pub use value::{DeliveryConfirmation, Login, MessageId, Password, PhoneNumber};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_rejects_empty() {
        assert!(matches!(
            Login::new("   "),
            Err(ValidationError::Empty {
                field: Login::FIELD
            })
        ));
    }

    #[test]
    fn password_rejects_empty() {
        assert!(matches!(
            Password::new(""),
            Err(ValidationError::Empty {
                field: Password::FIELD
            })
        ));
    }

    #[test]
    fn phone_number_round_trips_through_message() {
        let mut message = OutgoingMessage::new("hi", ["+420777123456"]).unwrap();
        message.add_phone("00420608111222").unwrap();

        let wire: Vec<&str> = message.phones().iter().map(PhoneNumber::as_str).collect();
        assert_eq!(wire, vec!["+420777123456", "00420608111222"]);
    }

    #[test]
    fn parsed_phone_numbers_satisfy_the_gateway_format() {
        let number = PhoneNumber::parse(Some(phonenumber::country::Id::CZ), "608 111 222").unwrap();
        assert!(PhoneNumber::is_valid(number.as_str()));
    }

    #[test]
    fn confirmation_default_is_unset() {
        assert_eq!(
            DeliveryConfirmation::default().interval_minutes(),
            None
        );
    }
}
