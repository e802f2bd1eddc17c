//! Transport layer: wire-format details (XML documents and query
//! parameters), one module per remote operation.

mod account;
mod confirm;
mod delivery_reports;
mod error_envelope;
mod send_sms;

pub use account::decode_account_status;
pub use confirm::encode_confirm_query;
pub use delivery_reports::{decode_delivery_reports, encode_delivery_reports_query};
pub use error_envelope::decode_error_message;
pub use send_sms::{decode_send_sms_response, encode_send_sms_xml};
