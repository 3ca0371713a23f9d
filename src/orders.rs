//! Sell-order model and the actionability filter.

use serde::Deserialize;

/// How many of the cheapest actionable orders approximate the market
/// floor.
pub const MARKET_FLOOR_DEPTH: usize = 5;

/// Orders lookup response. Upstream error bodies carry no `payload`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersResponse {
    pub payload: Option<OrdersPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrdersPayload {
    pub orders: Vec<Order>,
}

/// A single marketplace sell listing. Sourced from the remote API and
/// persisted only as part of the raw cache payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub user: Seller,
    pub visible: bool,
    pub platform: String,
    pub region: String,
    pub order_type: OrderType,
    /// Price in whole platinum.
    pub platinum: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Seller {
    pub status: SellerStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SellerStatus {
    Ingame,
    Online,
    Offline,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Sell,
    Buy,
    #[serde(other)]
    Other,
}

/// Narrow a raw order book to realistically achievable trades: sellers
/// who are reachable in-game, visible listings, pc/en only, sell side,
/// then the cheapest [`MARKET_FLOOR_DEPTH`] sorted ascending by price.
pub fn filter_orders(orders: Vec<Order>) -> Vec<Order> {
    let mut actionable: Vec<Order> = orders
        .into_iter()
        .filter(|o| o.user.status == SellerStatus::Ingame)
        .filter(|o| o.visible)
        .filter(|o| o.platform == "pc")
        .filter(|o| o.region == "en")
        .filter(|o| o.order_type == OrderType::Sell)
        .collect();

    actionable.sort_by_key(|o| o.platinum);
    actionable.truncate(MARKET_FLOOR_DEPTH);
    actionable
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(
        status: SellerStatus,
        visible: bool,
        platform: &str,
        region: &str,
        order_type: OrderType,
        platinum: u64,
    ) -> Order {
        Order {
            user: Seller { status },
            visible,
            platform: platform.into(),
            region: region.into(),
            order_type,
            platinum,
        }
    }

    fn compliant(platinum: u64) -> Order {
        order(SellerStatus::Ingame, true, "pc", "en", OrderType::Sell, platinum)
    }

    #[test]
    fn drops_non_actionable_orders() {
        let orders = vec![
            compliant(10),
            order(SellerStatus::Offline, true, "pc", "en", OrderType::Sell, 1),
            order(SellerStatus::Online, true, "pc", "en", OrderType::Sell, 2),
            order(SellerStatus::Ingame, false, "pc", "en", OrderType::Sell, 3),
            order(SellerStatus::Ingame, true, "xbox", "en", OrderType::Sell, 4),
            order(SellerStatus::Ingame, true, "pc", "de", OrderType::Sell, 5),
            order(SellerStatus::Ingame, true, "pc", "en", OrderType::Buy, 6),
        ];

        let filtered = filter_orders(orders);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].platinum, 10);
    }

    #[test]
    fn sorts_ascending_and_truncates_to_five() {
        let orders = vec![
            compliant(30),
            compliant(5),
            compliant(12),
            compliant(7),
            compliant(50),
            compliant(9),
            compliant(3),
        ];

        let filtered = filter_orders(orders);
        let prices: Vec<u64> = filtered.iter().map(|o| o.platinum).collect();
        assert_eq!(prices, vec![3, 5, 7, 9, 12]);
    }

    #[test]
    fn filtering_is_idempotent_on_compliant_input() {
        let orders = vec![compliant(1), compliant(2), compliant(3)];
        let once = filter_orders(orders);
        let prices_once: Vec<u64> = once.iter().map(|o| o.platinum).collect();

        let twice = filter_orders(once);
        let prices_twice: Vec<u64> = twice.iter().map(|o| o.platinum).collect();
        assert_eq!(prices_once, prices_twice);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(filter_orders(Vec::new()).is_empty());
    }

    #[test]
    fn error_body_deserializes_without_payload() {
        let response: OrdersResponse =
            serde_json::from_str(r#"{"error": "item not found"}"#).expect("parse error body");
        assert!(response.payload.is_none());
    }

    #[test]
    fn unknown_seller_status_is_tolerated() {
        let json = r#"{
            "user": {"status": "invisible"},
            "visible": true,
            "platform": "pc",
            "region": "en",
            "order_type": "sell",
            "platinum": 4
        }"#;
        let parsed: Order = serde_json::from_str(json).expect("parse order");
        assert_eq!(parsed.user.status, SellerStatus::Other);
        assert!(filter_orders(vec![parsed]).is_empty());
    }
}
