use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid XML error envelope: {0}")]
    Xml(#[from] quick_xml::DeError),
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorXmlEnvelope {
    message: String,
}

/// Extract the gateway's error text from a non-200 response body.
pub fn decode_error_message(xml: &str) -> Result<String, DecodeError> {
    let parsed: ErrorXmlEnvelope = quick_xml::de::from_str(xml)?;
    Ok(parsed.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_extracts_the_message_field() {
        let xml = "<error><id>400</id><message>Wrong login or password.</message></error>";
        assert_eq!(
            decode_error_message(xml).unwrap(),
            "Wrong login or password."
        );
    }

    #[test]
    fn decode_fails_without_a_message_field() {
        assert!(decode_error_message("<error><id>400</id></error>").is_err());
        assert!(decode_error_message("plain text").is_err());
    }
}
