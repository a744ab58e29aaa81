use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Side of a mock brokerage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::Buy => write!(f, "COMPRA"),
            OrderType::Sell => write!(f, "VENDA"),
        }
    }
}

/// A human-readable mock order derived from an allocation.
///
/// Ephemeral: regenerated every time the dashboard is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,

    #[serde(rename = "type")]
    pub order_type: OrderType,

    /// Instrument name or ticker (e.g., "ITUB4", "BTC")
    pub asset: String,

    pub category: String,

    /// Quantity of the instrument
    pub amount: f64,

    /// Unit price in BRL
    pub price: f64,

    /// Order total in BRL
    pub total: f64,

    pub formatted_order: String,
}
