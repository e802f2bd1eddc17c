//! Typed Rust client for the sluzba.cz SMS Gate XML HTTP API.
//!
//! The crate is layered: a domain layer of strong types with validation,
//! a transport layer for the gateway's XML wire format, and a small client
//! layer orchestrating the four remote operations (send, poll delivery
//! reports, confirm a report, query account status).
//!
//! ```rust,no_run
//! use smsgate::{Credentials, DeliveryConfirmation, OutgoingMessage, SmsGateClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SmsGateClient::new(Credentials::new("login", "password")?);
//!
//!     let mut message = OutgoingMessage::new("Hello", ["+420777123456"])?;
//!     message.set_confirmation(DeliveryConfirmation::requested());
//!     let results = client.send_sms(&message).await?;
//!     println!("accepted {} message(s)", results.len());
//!
//!     for (id, delivered_at) in client.get_delivery_reports().await? {
//!         println!("{id} delivered at {delivered_at}");
//!         client.confirm_delivery_report(&id).await?;
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    BoxFuture, Credentials, Endpoints, HttpResponse, HttpTransport, SendSmsError, SmsGateClient,
    SmsGateClientBuilder, SmsGateError, TransportResult,
};
pub use domain::{
    AccountStatus, DeliveryConfirmation, Login, MessageId, OutgoingMessage, Password, PhoneNumber,
    SendResult, ValidationError,
};
