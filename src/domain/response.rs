#[derive(Debug, Clone, PartialEq, Eq)]
/// Gateway acknowledgement for one accepted message.
///
/// The gateway transmits every numeric field as text; values are kept in
/// their exact wire representation and callers parse them as needed.
pub struct SendResult {
    /// Gateway-assigned message id.
    pub message_id: String,
    /// Number of SMS parts the text was split into.
    pub parts: String,
    /// Price charged for this message.
    pub price: String,
    /// Remaining account credit after this send.
    pub credit: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Account credit and per-destination price tiers.
pub struct AccountStatus {
    /// Remaining prepaid credit.
    pub credit: String,
    /// Price of one SMS to a domestic (CZ) number.
    pub price_cz_sms: String,
    /// Price of one SMS to a Slovak number.
    pub price_sk_sms: String,
    /// Price of one SMS to any other destination.
    pub price_other_sms: String,
}
