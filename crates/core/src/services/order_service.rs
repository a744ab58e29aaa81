use uuid::Uuid;

use crate::models::allocation::{AllocationResult, AssetClass};
use crate::models::order::{Order, OrderType};
use crate::models::profile::UserProfile;

/// Representative fixed-income instrument.
pub const FIXED_INCOME_ASSET: &str = "Tesouro Selic 2029";

/// Representative equity and its mock per-share price (BRL).
pub const STOCK_ASSET: &str = "ITUB4";
pub const STOCK_PRICE: f64 = 28.5;

/// Representative crypto asset and its mock unit price (BRL).
pub const CRYPTO_ASSET: &str = "BTC";
pub const CRYPTO_PRICE: f64 = 350_000.0;

/// Renders an allocation as mock brokerage orders.
pub struct OrderService;

impl OrderService {
    pub fn new() -> Self {
        Self
    }

    /// One buy order per asset class with a nonzero share, in the order
    /// fixed income → stocks → crypto. Classes at 0% are skipped.
    /// Sizing depends only on the allocation.
    pub fn generate_orders(&self, allocation: &AllocationResult, _profile: &UserProfile) -> Vec<Order> {
        AssetClass::ALL
            .iter()
            .filter(|class| allocation.percentage(**class) > 0)
            .map(|class| {
                let notional =
                    allocation.suggested_amount * f64::from(allocation.percentage(*class)) / 100.0;
                Self::order_for(*class, notional)
            })
            .collect()
    }

    fn order_for(class: AssetClass, notional: f64) -> Order {
        match class {
            AssetClass::FixedIncome => Order {
                id: Uuid::new_v4(),
                order_type: OrderType::Buy,
                asset: FIXED_INCOME_ASSET.to_string(),
                category: class.to_string(),
                amount: 1.0,
                price: notional,
                total: notional,
                formatted_order: format!(
                    "{}: {FIXED_INCOME_ASSET} | Valor: R$ {notional:.2} | Tipo: {class}",
                    OrderType::Buy
                ),
            },
            AssetClass::Stocks => {
                let quantity = (notional / STOCK_PRICE).floor();
                let total = quantity * STOCK_PRICE;
                Order {
                    id: Uuid::new_v4(),
                    order_type: OrderType::Buy,
                    asset: STOCK_ASSET.to_string(),
                    category: class.to_string(),
                    amount: quantity,
                    price: STOCK_PRICE,
                    total,
                    formatted_order: format!(
                        "{}: {quantity} {STOCK_ASSET} @ R$ {STOCK_PRICE:.2} | Total: R$ {total:.2}",
                        OrderType::Buy
                    ),
                }
            }
            AssetClass::Crypto => {
                let quantity = notional / CRYPTO_PRICE;
                Order {
                    id: Uuid::new_v4(),
                    order_type: OrderType::Buy,
                    asset: CRYPTO_ASSET.to_string(),
                    category: class.to_string(),
                    amount: quantity,
                    price: CRYPTO_PRICE,
                    total: notional,
                    formatted_order: format!(
                        "{}: {quantity:.6} {CRYPTO_ASSET} @ R$ {} | Total: R$ {notional:.2}",
                        OrderType::Buy,
                        group_thousands(CRYPTO_PRICE as u64)
                    ),
                }
            }
        }
    }
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new()
    }
}

/// pt-BR digit grouping: 350000 → "350.000".
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
