use crate::domain::MessageId;

/// Value of the `type` query parameter for report confirmation.
pub const CONFIRM_TYPE: &str = "delivery_report";

/// Query parameters acknowledging one delivery report, so the gateway
/// stops returning it.
pub fn encode_confirm_query(id: &MessageId) -> Vec<(String, String)> {
    vec![
        ("type".to_owned(), CONFIRM_TYPE.to_owned()),
        (MessageId::FIELD.to_owned(), id.as_str().to_owned()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_carries_type_and_id() {
        let id = MessageId::new("123456789").unwrap();
        assert_eq!(
            encode_confirm_query(&id),
            vec![
                ("type".to_owned(), "delivery_report".to_owned()),
                ("id".to_owned(), "123456789".to_owned()),
            ]
        );
    }
}
