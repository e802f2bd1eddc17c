use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::domain::{MessageId, ValidationError};

/// Fixed page size requested from the gateway.
pub const DELIVERY_REPORTS_BATCH_SIZE: u32 = 30;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid XML response: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML response has no root element")]
    MissingRoot,

    #[error("delivery report entry is missing the {element} element")]
    MissingElement { element: &'static str },

    #[error("delivery report entry has an invalid id: {0}")]
    InvalidId(#[from] ValidationError),

    #[error("XML response ended before the document was complete")]
    UnexpectedEof,
}

/// Query parameters for the delivery-report poll: reports only, no reply
/// messages, up to [`DELIVERY_REPORTS_BATCH_SIZE`] entries.
pub fn encode_delivery_reports_query() -> Vec<(String, String)> {
    vec![
        ("query_answer_message".to_owned(), "0".to_owned()),
        ("query_delivery_report".to_owned(), "1".to_owned()),
        ("count".to_owned(), DELIVERY_REPORTS_BATCH_SIZE.to_string()),
    ]
}

/// Decode a delivery-report batch into an id → delivery-timestamp map.
///
/// Entries are the children of the root element; their own element name is
/// not significant, only their `id` and `delivery_timestamp` children are.
/// A duplicate id keeps the last entry seen.
pub fn decode_delivery_reports(xml: &str) -> Result<BTreeMap<MessageId, String>, DecodeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let root = loop {
        match reader.read_event()? {
            Event::Start(e) => break e.name().as_ref().to_vec(),
            Event::Eof => return Err(DecodeError::MissingRoot),
            _ => {}
        }
    };

    let mut reports = BTreeMap::new();
    loop {
        match reader.read_event()? {
            Event::Start(entry) => {
                let entry_name = entry.name().as_ref().to_vec();
                let (id, timestamp) = decode_report_entry(&mut reader, &entry_name)?;
                reports.insert(id, timestamp);
            }
            Event::Empty(_) => {
                return Err(DecodeError::MissingElement {
                    element: MessageId::FIELD,
                });
            }
            Event::End(e) if e.name().as_ref() == root.as_slice() => break,
            Event::Eof => return Err(DecodeError::UnexpectedEof),
            _ => {}
        }
    }

    Ok(reports)
}

fn decode_report_entry(
    reader: &mut Reader<&[u8]>,
    entry_name: &[u8],
) -> Result<(MessageId, String), DecodeError> {
    let mut id = None;
    let mut timestamp = None;

    loop {
        match reader.read_event()? {
            Event::Start(child) => {
                let name = child.name().as_ref().to_vec();
                let value = reader.read_text(child.name())?.into_owned();
                match name.as_slice() {
                    b"id" => id = Some(value),
                    b"delivery_timestamp" => timestamp = Some(value),
                    _ => {}
                }
            }
            Event::Empty(child) => {
                match child.name().as_ref() {
                    b"id" => id = Some(String::new()),
                    b"delivery_timestamp" => timestamp = Some(String::new()),
                    _ => {}
                }
            }
            Event::End(e) if e.name().as_ref() == entry_name => break,
            Event::Eof => return Err(DecodeError::UnexpectedEof),
            _ => {}
        }
    }

    let id = id.ok_or(DecodeError::MissingElement {
        element: MessageId::FIELD,
    })?;
    let timestamp = timestamp.ok_or(DecodeError::MissingElement {
        element: "delivery_timestamp",
    })?;

    Ok((MessageId::new(id)?, timestamp))
}
