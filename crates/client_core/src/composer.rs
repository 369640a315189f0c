use chrono::Utc;
use shared::{
    domain::{CustomerId, OrderId, OrderStatus, ProductId, ProductSnapshot},
    protocol::{OrderLinePayload, OrderPayload, OrderRecord},
};
use tracing::info;

use crate::{
    error::{ClientError, FormError},
    gateway::OrderGateway,
};

/// One draft order line. `total` is derived from the referenced snapshot's
/// unit price and the quantity; it is recomputed on every mutation, never
/// carried forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub product: ProductId,
    pub quantity: u32,
    pub total: i64,
}

/// Assembles an order draft against a per-session set of product snapshots:
/// line items validated against snapshot stock, derived totals, and a status
/// field constrained by the `OrderStatus` transition graph.
///
/// The draft is exclusively owned by its form for the duration of editing.
/// Every mutation is synchronous; validation failures mutate nothing. Only
/// `submit` touches the network.
pub struct OrderComposer {
    products: Vec<ProductSnapshot>,
    customer: Option<CustomerId>,
    status: OrderStatus,
    lines: Vec<LineItem>,
    existing: Option<OrderId>,
}

impl OrderComposer {
    /// New-order draft: no customer, no lines, status `EnAttente`.
    pub fn new(products: Vec<ProductSnapshot>) -> Self {
        Self {
            products,
            customer: None,
            status: OrderStatus::EnAttente,
            lines: Vec::new(),
            existing: None,
        }
    }

    /// Edit-mode draft seeded from a persisted record. Line totals are
    /// recomputed from the current snapshot prices where the product is still
    /// known; lines for products missing from the snapshot set keep the
    /// stored total.
    pub fn for_existing(products: Vec<ProductSnapshot>, record: &OrderRecord) -> Self {
        let lines = record
            .details
            .iter()
            .map(|line| {
                let total = products
                    .iter()
                    .find(|p| p.id == line.produit)
                    .map(|p| p.unit_price * i64::from(line.quantite))
                    .unwrap_or(line.prix_total);
                LineItem {
                    product: line.produit,
                    quantity: line.quantite,
                    total,
                }
            })
            .collect();
        Self {
            products,
            customer: Some(record.client),
            status: record.statut,
            lines,
            existing: Some(record.id),
        }
    }

    pub fn products(&self) -> &[ProductSnapshot] {
        &self.products
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn customer(&self) -> Option<CustomerId> {
        self.customer
    }

    pub fn set_customer(&mut self, customer: CustomerId) {
        self.customer = Some(customer);
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_edit(&self) -> bool {
        self.existing.is_some()
    }

    fn snapshot(&self, product: ProductId) -> Result<&ProductSnapshot, FormError> {
        self.products
            .iter()
            .find(|p| p.id == product)
            .ok_or(FormError::UnknownProduct)
    }

    fn line_at(&self, index: usize) -> Result<&LineItem, FormError> {
        self.lines
            .get(index)
            .ok_or(FormError::LineIndexOutOfRange(index))
    }

    /// Appends a line for the first product with stock remaining, quantity 1.
    /// Returns the new line's index.
    pub fn add_line_item(&mut self) -> Result<usize, FormError> {
        let product = self
            .products
            .iter()
            .find(|p| p.available_stock > 0)
            .ok_or(FormError::NoProductInStock)?;
        self.lines.push(LineItem {
            product: product.id,
            quantity: 1,
            total: product.unit_price,
        });
        Ok(self.lines.len() - 1)
    }

    /// Swaps the product behind a line, keeping the quantity and recomputing
    /// the total from the new product's unit price. The kept quantity is not
    /// re-checked against the new product's stock (source behavior).
    pub fn set_line_item_product(
        &mut self,
        index: usize,
        product: ProductId,
    ) -> Result<(), FormError> {
        let quantity = self.line_at(index)?.quantity;
        let snapshot = self.snapshot(product)?;
        let total = snapshot.unit_price * i64::from(quantity);
        let line = &mut self.lines[index];
        line.product = product;
        line.total = total;
        Ok(())
    }

    /// Sets a line's quantity. Rejected without mutation when the quantity is
    /// zero or exceeds the product's snapshot stock.
    pub fn set_line_item_quantity(&mut self, index: usize, quantity: u32) -> Result<(), FormError> {
        let product = self.line_at(index)?.product;
        if quantity == 0 {
            return Err(FormError::QuantityBelowMinimum);
        }
        let snapshot = self.snapshot(product)?;
        if quantity > snapshot.available_stock {
            return Err(FormError::QuantityExceedsStock {
                requested: quantity,
                available: snapshot.available_stock,
            });
        }
        let total = snapshot.unit_price * i64::from(quantity);
        let line = &mut self.lines[index];
        line.quantity = quantity;
        line.total = total;
        Ok(())
    }

    pub fn remove_line_item(&mut self, index: usize) -> Result<LineItem, FormError> {
        self.line_at(index)?;
        Ok(self.lines.remove(index))
    }

    /// Derived sum of line totals. Recomputed on every call.
    pub fn grand_total(&self) -> i64 {
        self.lines.iter().map(|line| line.total).sum()
    }

    pub fn allowed_next_statuses(&self) -> &'static [OrderStatus] {
        self.status.allowed_next()
    }

    /// Moves the status along the transition graph; disallowed moves are
    /// rejected without mutation.
    pub fn set_status(&mut self, next: OrderStatus) -> Result<(), FormError> {
        if !self.status.can_become(next) {
            return Err(FormError::StatusNotAllowed {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    fn build_payload(&self) -> Result<OrderPayload, FormError> {
        let customer = self.customer.ok_or(FormError::MissingCustomer)?;
        if self.lines.is_empty() {
            return Err(FormError::EmptyOrder);
        }
        Ok(OrderPayload {
            client: customer,
            date_commande: Utc::now(),
            statut: self.status,
            details: self
                .lines
                .iter()
                .map(|line| OrderLinePayload {
                    produit: line.product,
                    quantite: line.quantity,
                    prix_total: line.total,
                })
                .collect(),
        })
    }

    /// Validates and sends the draft: create when the draft has no prior id,
    /// update otherwise. Validation failures return before any network call;
    /// gateway failures leave the draft intact for retry.
    pub async fn submit(&self, gateway: &dyn OrderGateway) -> Result<OrderRecord, ClientError> {
        let payload = self.build_payload()?;
        info!(
            lines = payload.details.len(),
            grand_total = self.grand_total(),
            status = %payload.statut,
            edit = self.is_edit(),
            "submitting order draft"
        );
        let record = match self.existing {
            Some(id) => gateway.update_order(id, &payload).await?,
            None => gateway.create_order(&payload).await?,
        };
        Ok(record)
    }

    /// Clears the draft back to a new-order state, keeping the snapshots.
    pub fn reset(&mut self) {
        self.customer = None;
        self.status = OrderStatus::EnAttente;
        self.lines.clear();
        self.existing = None;
    }
}

#[cfg(test)]
#[path = "tests/composer_tests.rs"]
mod tests;
