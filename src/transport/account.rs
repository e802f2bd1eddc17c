use serde::Deserialize;

use crate::domain::AccountStatus;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid XML response: {0}")]
    Xml(#[from] quick_xml::DeError),
}

#[derive(Debug, Clone, Deserialize)]
struct AccountStatusXmlResponse {
    credit: String,
    price_cz_sms: String,
    price_sk_sms: String,
    price_other_sms: String,
}

/// Decode the credit/pricing info document.
pub fn decode_account_status(xml: &str) -> Result<AccountStatus, DecodeError> {
    let parsed: AccountStatusXmlResponse = quick_xml::de::from_str(xml)?;
    Ok(AccountStatus {
        credit: parsed.credit,
        price_cz_sms: parsed.price_cz_sms,
        price_sk_sms: parsed.price_sk_sms,
        price_other_sms: parsed.price_other_sms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_extracts_credit_and_price_tiers() {
        let xml = "<info>\
                   <credit>102.50</credit>\
                   <price_cz_sms>1.10</price_cz_sms>\
                   <price_sk_sms>1.90</price_sk_sms>\
                   <price_other_sms>2.50</price_other_sms>\
                   </info>";

        let status = decode_account_status(xml).unwrap();
        assert_eq!(status.credit, "102.50");
        assert_eq!(status.price_cz_sms, "1.10");
        assert_eq!(status.price_sk_sms, "1.90");
        assert_eq!(status.price_other_sms, "2.50");
    }

    #[test]
    fn decode_requires_every_field() {
        let missing_tier = "<info>\
                            <credit>102.50</credit>\
                            <price_cz_sms>1.10</price_cz_sms>\
                            <price_other_sms>2.50</price_other_sms>\
                            </info>";
        assert!(decode_account_status(missing_tier).is_err());
        assert!(decode_account_status("<oops").is_err());
    }
}
