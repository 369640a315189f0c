use serde::{Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ProductId);
id_newtype!(CustomerId);
id_newtype!(OrderId);
id_newtype!(UserId);

/// Order lifecycle status. The wire format uses the backend's historical
/// French labels (`EN_ATTENTE`, `PAYEE`, `LIVREE`, `ANNULEE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OrderStatus {
    #[serde(rename = "EN_ATTENTE")]
    EnAttente,
    #[serde(rename = "PAYEE")]
    Payee,
    #[serde(rename = "LIVREE")]
    Livree,
    #[serde(rename = "ANNULEE")]
    Annulee,
}

impl OrderStatus {
    pub fn as_wire(self) -> &'static str {
        match self {
            OrderStatus::EnAttente => "EN_ATTENTE",
            OrderStatus::Payee => "PAYEE",
            OrderStatus::Livree => "LIVREE",
            OrderStatus::Annulee => "ANNULEE",
        }
    }

    /// Lenient wire decoding: anything the backend sends that is not a known
    /// label falls back to `EnAttente`, matching its historical behavior.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "PAYEE" => OrderStatus::Payee,
            "LIVREE" => OrderStatus::Livree,
            "ANNULEE" => OrderStatus::Annulee,
            _ => OrderStatus::EnAttente,
        }
    }

    /// Statuses an order in this status may move to. Staying put is always
    /// legal; `Livree` and `Annulee` are terminal.
    pub fn allowed_next(self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::EnAttente => &[
                OrderStatus::EnAttente,
                OrderStatus::Payee,
                OrderStatus::Annulee,
            ],
            OrderStatus::Payee => &[OrderStatus::Payee, OrderStatus::Livree],
            OrderStatus::Livree => &[OrderStatus::Livree],
            OrderStatus::Annulee => &[OrderStatus::Annulee],
        }
    }

    pub fn can_become(self, next: OrderStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_next() == [self]
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(OrderStatus::from_wire(&raw))
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Per-product view the order form works against. Fetched once per form
/// session; the stock count is a snapshot, not a live figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    /// Unit price in minor currency units.
    pub unit_price: i64,
    pub available_stock: u32,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSummary {
    pub id: CustomerId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn en_attente_allows_pending_paid_cancelled() {
        let next = OrderStatus::EnAttente.allowed_next();
        assert_eq!(next.len(), 3);
        for status in [
            OrderStatus::EnAttente,
            OrderStatus::Payee,
            OrderStatus::Annulee,
        ] {
            assert!(next.contains(&status));
        }
        assert!(!next.contains(&OrderStatus::Livree));
    }

    #[test]
    fn payee_allows_only_paid_and_delivered() {
        let next = OrderStatus::Payee.allowed_next();
        assert_eq!(next, [OrderStatus::Payee, OrderStatus::Livree]);
    }

    #[test]
    fn terminal_statuses_have_no_outbound_transitions() {
        for terminal in [OrderStatus::Livree, OrderStatus::Annulee] {
            assert!(terminal.is_terminal());
            assert_eq!(terminal.allowed_next(), [terminal]);
            for other in [
                OrderStatus::EnAttente,
                OrderStatus::Payee,
                OrderStatus::Livree,
                OrderStatus::Annulee,
            ] {
                assert_eq!(terminal.can_become(other), other == terminal);
            }
        }
    }

    #[test]
    fn unknown_wire_status_falls_back_to_en_attente() {
        assert_eq!(OrderStatus::from_wire("EXPEDIEE"), OrderStatus::EnAttente);
        assert_eq!(OrderStatus::from_wire(""), OrderStatus::EnAttente);
        assert_eq!(OrderStatus::from_wire("PAYEE"), OrderStatus::Payee);
    }

    #[test]
    fn status_deserializes_leniently() {
        let status: OrderStatus = serde_json::from_str("\"LIVREE\"").expect("decode");
        assert_eq!(status, OrderStatus::Livree);
        let status: OrderStatus = serde_json::from_str("\"BROUILLON\"").expect("decode");
        assert_eq!(status, OrderStatus::EnAttente);
    }

    #[test]
    fn status_serializes_to_wire_label() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Annulee).expect("encode"),
            "\"ANNULEE\""
        );
    }
}
