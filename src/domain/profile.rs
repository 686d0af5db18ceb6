//! Profile domain: addresses and saved payment cards.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Card expiry in MM/YY form
pub static CARD_EXPIRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])/\d{2}$").expect("valid expiry regex"));

/// Card verification value, 3 or 4 digits
pub static CARD_CVV_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3,4}$").expect("valid cvv regex"));

/// Shipping/billing address
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Address {
    pub id: i32,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address_line: Option<String>,
    pub address_line2: Option<String>,
    pub zip_code: Option<String>,
}

/// Address upsert payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpsertAddress {
    #[validate(length(max = 50))]
    pub title: Option<String>,
    #[validate(length(max = 100))]
    pub company_name: Option<String>,
    #[validate(length(max = 50))]
    pub country: Option<String>,
    #[validate(length(max = 50))]
    pub city: Option<String>,
    #[validate(length(max = 255))]
    pub address_line: Option<String>,
    #[validate(length(max = 255))]
    pub address_line2: Option<String>,
    #[validate(length(max = 20))]
    pub zip_code: Option<String>,
}

/// Saved payment card
#[derive(Debug, Clone, Serialize)]
pub struct UserCard {
    pub id: i32,
    pub user_id: Uuid,
    pub card_holder_name: String,
    pub card_number: String,
    pub expiry_date: Option<String>,
    pub cvv: Option<String>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// Card response with the number masked
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CardResponse {
    pub id: i32,
    pub card_holder_name: String,
    /// Last four digits only
    #[schema(example = "**** **** **** 4242")]
    pub card_number_masked: String,
    pub expiry_date: Option<String>,
    pub is_default: bool,
}

impl From<UserCard> for CardResponse {
    fn from(card: UserCard) -> Self {
        let last_four: String = card
            .card_number
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        Self {
            id: card.id,
            card_holder_name: card.card_holder_name,
            card_number_masked: format!("**** **** **** {}", last_four),
            expiry_date: card.expiry_date,
            is_default: card.is_default,
        }
    }
}

/// Card upsert payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpsertCard {
    #[validate(length(min = 1, max = 100, message = "Card holder name is required"))]
    pub card_holder_name: String,
    #[validate(length(min = 12, max = 20, message = "Card number must be 12-20 digits"))]
    pub card_number: String,
    #[validate(regex(path = *CARD_EXPIRY_RE, message = "Expiry must be MM/YY"))]
    pub expiry_date: Option<String>,
    #[validate(regex(path = *CARD_CVV_RE, message = "CVV must be 3 or 4 digits"))]
    pub cvv: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_regex_accepts_valid_dates() {
        assert!(CARD_EXPIRY_RE.is_match("01/26"));
        assert!(CARD_EXPIRY_RE.is_match("12/30"));
        assert!(!CARD_EXPIRY_RE.is_match("13/26"));
        assert!(!CARD_EXPIRY_RE.is_match("1/26"));
        assert!(!CARD_EXPIRY_RE.is_match("01-26"));
    }

    #[test]
    fn cvv_regex_accepts_three_or_four_digits() {
        assert!(CARD_CVV_RE.is_match("123"));
        assert!(CARD_CVV_RE.is_match("1234"));
        assert!(!CARD_CVV_RE.is_match("12"));
        assert!(!CARD_CVV_RE.is_match("12345"));
        assert!(!CARD_CVV_RE.is_match("abc"));
    }

    #[test]
    fn card_number_is_masked() {
        let card = UserCard {
            id: 1,
            user_id: Uuid::new_v4(),
            card_holder_name: "Jane Doe".into(),
            card_number: "4242424242424242".into(),
            expiry_date: Some("01/27".into()),
            cvv: Some("123".into()),
            is_default: true,
            created_at: Utc::now(),
        };
        let resp = CardResponse::from(card);
        assert_eq!(resp.card_number_masked, "**** **** **** 4242");
    }
}
