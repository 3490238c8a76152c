//! Order line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{OrderItemId, ProductId, Quantity};

/// One product line on an order.
///
/// `quantity` is the distributor's original request and never changes after
/// creation. Producers record corrections in `adjusted_quantity`; consumers
/// that care about demand must read `effective_quantity()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    id: OrderItemId,
    product_id: ProductId,
    quantity: Quantity,
    original_quantity: Quantity,
    adjusted_quantity: Option<Quantity>,
    adjustment_reason: Option<String>,
    unit_price: Decimal,
    total_price: Decimal,
}

impl OrderItem {
    /// Create a new line item. Seeds `original_quantity` from the request.
    ///
    /// Pricing is not implemented; unit and total prices are always zero.
    #[must_use]
    pub fn new(product_id: ProductId, quantity: Quantity) -> Self {
        Self {
            id: OrderItemId::generate(),
            product_id,
            quantity,
            original_quantity: quantity,
            adjusted_quantity: None,
            adjustment_reason: None,
            unit_price: Decimal::ZERO,
            total_price: Decimal::ZERO,
        }
    }

    /// Rebuild a line item from persisted state.
    #[must_use]
    pub const fn reconstitute(
        id: OrderItemId,
        product_id: ProductId,
        quantity: Quantity,
        original_quantity: Quantity,
        adjusted_quantity: Option<Quantity>,
        adjustment_reason: Option<String>,
        unit_price: Decimal,
        total_price: Decimal,
    ) -> Self {
        Self {
            id,
            product_id,
            quantity,
            original_quantity,
            adjusted_quantity,
            adjustment_reason,
            unit_price,
            total_price,
        }
    }

    /// Line item id.
    #[must_use]
    pub const fn id(&self) -> &OrderItemId {
        &self.id
    }

    /// Product being ordered.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Originally requested quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Copy of the requested quantity taken at creation.
    #[must_use]
    pub const fn original_quantity(&self) -> Quantity {
        self.original_quantity
    }

    /// Producer correction, if any.
    #[must_use]
    pub const fn adjusted_quantity(&self) -> Option<Quantity> {
        self.adjusted_quantity
    }

    /// Reason recorded with the correction, if any.
    #[must_use]
    pub fn adjustment_reason(&self) -> Option<&str> {
        self.adjustment_reason.as_deref()
    }

    /// Unit price (always zero, pricing unimplemented).
    #[must_use]
    pub const fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Total price (always zero, pricing unimplemented).
    #[must_use]
    pub const fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// The quantity that counts: the producer correction when present,
    /// otherwise the original request.
    #[must_use]
    pub fn effective_quantity(&self) -> Quantity {
        self.adjusted_quantity.unwrap_or(self.quantity)
    }

    /// Record a producer correction. The original request is untouched.
    pub(super) fn apply_adjustment(&mut self, adjusted_quantity: Quantity, reason: String) {
        self.adjusted_quantity = Some(adjusted_quantity);
        self.adjustment_reason = Some(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn effective_quantity_defaults_to_requested() {
        let item = OrderItem::new(ProductId::generate(), Quantity::new(dec!(5)));
        assert_eq!(item.effective_quantity(), Quantity::new(dec!(5)));
        assert_eq!(item.original_quantity(), Quantity::new(dec!(5)));
        assert_eq!(item.adjusted_quantity(), None);
    }

    #[test]
    fn effective_quantity_prefers_adjustment() {
        let mut item = OrderItem::new(ProductId::generate(), Quantity::new(dec!(10)));
        item.apply_adjustment(Quantity::new(dec!(7.5)), "short on raw stock".to_string());

        assert_eq!(item.effective_quantity(), Quantity::new(dec!(7.5)));
        assert_eq!(item.quantity(), Quantity::new(dec!(10)));
        assert_eq!(item.original_quantity(), Quantity::new(dec!(10)));
        assert_eq!(item.adjustment_reason(), Some("short on raw stock"));
    }

    #[test]
    fn prices_are_zero() {
        let item = OrderItem::new(ProductId::generate(), Quantity::new(dec!(3)));
        assert_eq!(item.unit_price(), Decimal::ZERO);
        assert_eq!(item.total_price(), Decimal::ZERO);
    }
}
