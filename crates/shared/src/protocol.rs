use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    CustomerId, CustomerSummary, OrderId, OrderStatus, ProductId, ProductSnapshot,
};

/// One order line as the backend expects it: product reference, quantity and
/// the client-computed line total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLinePayload {
    pub produit: ProductId,
    pub quantite: u32,
    #[serde(rename = "prixTotal")]
    pub prix_total: i64,
}

/// Order create/update body: `{ client, dateCommande, statut, details }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub client: CustomerId,
    #[serde(rename = "dateCommande")]
    pub date_commande: DateTime<Utc>,
    pub statut: OrderStatus,
    pub details: Vec<OrderLinePayload>,
}

/// Persisted order as returned by the backend after a create or update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub client: CustomerId,
    #[serde(rename = "dateCommande")]
    pub date_commande: DateTime<Utc>,
    pub statut: OrderStatus,
    pub details: Vec<OrderLinePayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub nom: String,
    #[serde(rename = "prixUnitaire")]
    pub prix_unitaire: i64,
    pub categorie: Option<String>,
    #[serde(rename = "stockDisponible")]
    pub stock_disponible: u32,
}

impl From<ProductRecord> for ProductSnapshot {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: record.id,
            name: record.nom,
            unit_price: record.prix_unitaire,
            available_stock: record.stock_disponible,
            category: record.categorie,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub nom: String,
}

impl From<CustomerRecord> for CustomerSummary {
    fn from(record: CustomerRecord) -> Self {
        Self {
            id: record.id,
            name: record.nom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_payload_uses_backend_field_names() {
        let payload = OrderPayload {
            client: CustomerId(4),
            date_commande: DateTime::parse_from_rfc3339("2026-08-01T09:30:00Z")
                .expect("timestamp")
                .with_timezone(&Utc),
            statut: OrderStatus::EnAttente,
            details: vec![OrderLinePayload {
                produit: ProductId(1),
                quantite: 3,
                prix_total: 3000,
            }],
        };

        let json = serde_json::to_value(&payload).expect("encode");
        assert_eq!(json["client"], 4);
        assert_eq!(json["statut"], "EN_ATTENTE");
        assert_eq!(json["dateCommande"], "2026-08-01T09:30:00Z");
        assert_eq!(json["details"][0]["produit"], 1);
        assert_eq!(json["details"][0]["quantite"], 3);
        assert_eq!(json["details"][0]["prixTotal"], 3000);
    }

    #[test]
    fn product_record_converts_to_snapshot() {
        let record = ProductRecord {
            id: ProductId(7),
            nom: "Chips paprika 90g".into(),
            prix_unitaire: 650,
            categorie: Some("chips".into()),
            stock_disponible: 24,
        };

        let snapshot = ProductSnapshot::from(record);
        assert_eq!(snapshot.id, ProductId(7));
        assert_eq!(snapshot.unit_price, 650);
        assert_eq!(snapshot.available_stock, 24);
    }

    #[test]
    fn order_record_decodes_unknown_status_as_en_attente() {
        let record: OrderRecord = serde_json::from_value(serde_json::json!({
            "id": 12,
            "client": 4,
            "dateCommande": "2026-08-01T09:30:00Z",
            "statut": "REMBOURSEE",
            "details": []
        }))
        .expect("decode");
        assert_eq!(record.statut, OrderStatus::EnAttente);
    }
}
