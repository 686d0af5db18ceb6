//! Trade (barter) domain: offers exchanging products and optional cash.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::code::reference_code;
use crate::errors::{AppError, AppResult};

/// Trade offer lifecycle (stored as a string with a CHECK constraint)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TradeOfferStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
}

impl TradeOfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeOfferStatus::Pending => "pending",
            TradeOfferStatus::Accepted => "accepted",
            TradeOfferStatus::Rejected => "rejected",
            TradeOfferStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TradeOfferStatus::Pending),
            "accepted" => Some(TradeOfferStatus::Accepted),
            "rejected" => Some(TradeOfferStatus::Rejected),
            "cancelled" => Some(TradeOfferStatus::Cancelled),
            _ => None,
        }
    }
}

/// Role a product plays inside an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TradeItemType {
    /// Product put forward by the offerer
    Offered,
    /// The receiver's listing the offer is for
    Requested,
}

impl TradeItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeItemType::Offered => "offered",
            TradeItemType::Requested => "requested",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "offered" => Some(TradeItemType::Offered),
            "requested" => Some(TradeItemType::Requested),
            _ => None,
        }
    }
}

/// Trade offer domain entity
#[derive(Debug, Clone, Serialize)]
pub struct TradeOffer {
    pub id: i32,
    pub trade_code: String,
    pub offerer_id: Uuid,
    pub receiver_id: Uuid,
    /// The listing the offer targets
    pub product_id: i32,
    pub status: TradeOfferStatus,
    pub offerer_message: Option<String>,
    pub offered_cash_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Product attached to a trade offer
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TradeItem {
    pub id: i32,
    pub trade_id: i32,
    pub product_id: i32,
    pub item_type: TradeItemType,
}

/// Decision a party can take on a pending offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeDecision {
    Accept,
    Reject,
    Cancel,
}

impl TradeOffer {
    /// Generate the unique short code identifying an offer.
    pub fn new_trade_code() -> String {
        reference_code()
    }

    pub fn is_party(&self, user_id: Uuid) -> bool {
        self.offerer_id == user_id || self.receiver_id == user_id
    }

    /// Validate a decision against the offer's state and the acting user.
    ///
    /// Accept/reject belong to the receiver, cancel to the offerer, and all
    /// three are only legal while the offer is still pending. Returns the
    /// status the offer moves to.
    pub fn decide(&self, decision: TradeDecision, actor: Uuid) -> AppResult<TradeOfferStatus> {
        if !self.is_party(actor) {
            return Err(AppError::Forbidden);
        }

        if self.status != TradeOfferStatus::Pending {
            return Err(AppError::bad_request(format!(
                "Trade offer is already {}",
                self.status.as_str()
            )));
        }

        match decision {
            TradeDecision::Accept | TradeDecision::Reject if actor != self.receiver_id => {
                Err(AppError::Forbidden)
            }
            TradeDecision::Cancel if actor != self.offerer_id => Err(AppError::Forbidden),
            TradeDecision::Accept => Ok(TradeOfferStatus::Accepted),
            TradeDecision::Reject => Ok(TradeOfferStatus::Rejected),
            TradeDecision::Cancel => Ok(TradeOfferStatus::Cancelled),
        }
    }
}

/// New trade offer payload
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTradeOffer {
    /// The listing the offer targets
    pub target_product_id: i32,
    /// Products offered in exchange
    #[serde(default)]
    pub offered_product_ids: Vec<i32>,
    /// Cash offered on top of (or instead of) products
    #[schema(value_type = Option<f64>)]
    pub offered_cash: Option<Decimal>,
    /// Message to the receiver
    pub message: Option<String>,
}

impl CreateTradeOffer {
    /// An offer must put forward at least one product or a positive cash amount.
    pub fn has_consideration(&self) -> bool {
        let has_products = !self.offered_product_ids.is_empty();
        let has_cash = self
            .offered_cash
            .map(|c| c > Decimal::ZERO)
            .unwrap_or(false);
        has_products || has_cash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(status: TradeOfferStatus) -> (TradeOffer, Uuid, Uuid) {
        let offerer = Uuid::new_v4();
        let receiver = Uuid::new_v4();
        let offer = TradeOffer {
            id: 1,
            trade_code: TradeOffer::new_trade_code(),
            offerer_id: offerer,
            receiver_id: receiver,
            product_id: 10,
            status,
            offerer_message: None,
            offered_cash_amount: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        (offer, offerer, receiver)
    }

    #[test]
    fn receiver_accepts_pending_offer() {
        let (offer, _, receiver) = offer(TradeOfferStatus::Pending);
        let next = offer.decide(TradeDecision::Accept, receiver).unwrap();
        assert_eq!(next, TradeOfferStatus::Accepted);
    }

    #[test]
    fn offerer_cannot_accept_own_offer() {
        let (offer, offerer, _) = offer(TradeOfferStatus::Pending);
        let err = offer.decide(TradeDecision::Accept, offerer).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[test]
    fn receiver_cannot_cancel() {
        let (offer, _, receiver) = offer(TradeOfferStatus::Pending);
        let err = offer.decide(TradeDecision::Cancel, receiver).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[test]
    fn offerer_cancels_pending_offer() {
        let (offer, offerer, _) = offer(TradeOfferStatus::Pending);
        let next = offer.decide(TradeDecision::Cancel, offerer).unwrap();
        assert_eq!(next, TradeOfferStatus::Cancelled);
    }

    #[test]
    fn settled_offers_are_immutable() {
        for status in [
            TradeOfferStatus::Accepted,
            TradeOfferStatus::Rejected,
            TradeOfferStatus::Cancelled,
        ] {
            let (offer, offerer, receiver) = offer(status);
            assert!(offer.decide(TradeDecision::Accept, receiver).is_err());
            assert!(offer.decide(TradeDecision::Cancel, offerer).is_err());
        }
    }

    #[test]
    fn strangers_are_rejected() {
        let (offer, _, _) = offer(TradeOfferStatus::Pending);
        let err = offer
            .decide(TradeDecision::Accept, Uuid::new_v4())
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[test]
    fn offer_needs_products_or_cash() {
        let mut create = CreateTradeOffer {
            target_product_id: 1,
            offered_product_ids: vec![],
            offered_cash: None,
            message: None,
        };
        assert!(!create.has_consideration());

        create.offered_cash = Some(Decimal::ZERO);
        assert!(!create.has_consideration());

        create.offered_cash = Some(Decimal::from(50));
        assert!(create.has_consideration());

        create.offered_cash = None;
        create.offered_product_ids = vec![7];
        assert!(create.has_consideration());
    }
}
