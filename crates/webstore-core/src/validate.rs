//! Row-level validation for loaded entities
//!
//! These checks run once while the entity store is built, so every report
//! can rely on them without re-checking.

use crate::error::{Error, Result};
use crate::model::{OrderItem, Product};

/// Validates an order line
///
/// # Constraints
///
/// - Quantity must be positive
/// - Unit price and discount must not be negative
/// - Unit price times quantity must fit in a `Money`
/// - Discount must not exceed the line subtotal
///
/// # Errors
///
/// Returns Error::Load if validation fails
#[inline]
pub fn validate_order_item(item: &OrderItem) -> Result<()> {
    let line = format!("order item {}/{}", item.order_id, item.item_id);

    if item.quantity == 0 {
        return Err(Error::Load(format!("{} has zero quantity", line)));
    }

    if item.unit_price.is_negative() {
        return Err(Error::Load(format!(
            "{} has negative unit price {}",
            line, item.unit_price
        )));
    }

    if item.discount.is_negative() {
        return Err(Error::Load(format!(
            "{} has negative discount {}",
            line, item.discount
        )));
    }

    let subtotal = item.unit_price.checked_mul(item.quantity).ok_or_else(|| {
        Error::Load(format!(
            "{} subtotal overflows ({} x {})",
            line, item.unit_price, item.quantity
        ))
    })?;

    if item.discount > subtotal {
        return Err(Error::Load(format!(
            "{} discount {} exceeds subtotal {}",
            line, item.discount, subtotal
        )));
    }

    Ok(())
}

/// Validates a product row
///
/// # Errors
///
/// Returns Error::Load if the price is negative
#[inline]
pub fn validate_product(product: &Product) -> Result<()> {
    if product.price.is_negative() {
        return Err(Error::Load(format!(
            "product {} has negative price {}",
            product.id, product.price
        )));
    }

    Ok(())
}
