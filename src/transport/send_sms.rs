use chrono::NaiveDateTime;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::Deserialize;

use crate::domain::{DeliveryConfirmation, PhoneNumber, SendResult};

/// Root element of the outgoing document.
pub const OUTGOING_MESSAGE_ELEMENT: &str = "outgoing_message";

/// Element carrying the message body.
pub const TEXT_ELEMENT: &str = "text";

/// Element carrying the scheduled send time.
pub const SEND_AT_ELEMENT: &str = "send_at";

/// Wire format of the scheduled send time (`YYYYMMDDHHmmss`).
pub const SEND_AT_FORMAT: &str = "%Y%m%d%H%M%S";

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("unable to create XML document: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid XML response: {0}")]
    Xml(#[from] quick_xml::DeError),
}

#[derive(Debug, Clone, Deserialize)]
struct SendSmsXmlResponse {
    message: MessageXmlResult,
    credit: String,
}

#[derive(Debug, Clone, Deserialize)]
struct MessageXmlResult {
    id: String,
    parts: String,
    price: String,
}

/// Build the outgoing document for one recipient.
///
/// Child-element order is part of the wire contract: `text`, `recipient`,
/// then the optional `dr_request` and `send_at`.
pub fn encode_send_sms_xml(
    text: &str,
    recipient: &PhoneNumber,
    dr_request: Option<u16>,
    send_at: Option<NaiveDateTime>,
) -> Result<String, EncodeError> {
    let mut writer = Writer::new(Vec::new());
    write_document(&mut writer, text, recipient, dr_request, send_at)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_document(
    writer: &mut Writer<Vec<u8>>,
    text: &str,
    recipient: &PhoneNumber,
    dr_request: Option<u16>,
    send_at: Option<NaiveDateTime>,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(OUTGOING_MESSAGE_ELEMENT)))?;

    write_text_element(writer, TEXT_ELEMENT, text)?;
    write_text_element(writer, PhoneNumber::ELEMENT, recipient.as_str())?;
    if let Some(minutes) = dr_request {
        write_text_element(writer, DeliveryConfirmation::ELEMENT, &minutes.to_string())?;
    }
    if let Some(at) = send_at {
        write_text_element(writer, SEND_AT_ELEMENT, &at.format(SEND_AT_FORMAT).to_string())?;
    }

    writer.write_event(Event::End(BytesEnd::new(OUTGOING_MESSAGE_ELEMENT)))?;
    Ok(())
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Decode the gateway acknowledgement for one accepted message.
///
/// Extracts `message/id`, `message/parts`, `message/price` and the
/// top-level `credit`. A missing element is an error, never a default.
pub fn decode_send_sms_response(xml: &str) -> Result<SendResult, DecodeError> {
    let parsed: SendSmsXmlResponse = quick_xml::de::from_str(xml)?;
    Ok(SendResult {
        message_id: parsed.message.id,
        parts: parsed.message.parts,
        price: parsed.message.price,
        credit: parsed.credit,
    })
}
