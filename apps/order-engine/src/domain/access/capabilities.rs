//! Centralized capability checks.
//!
//! All role/ownership branching for order operations lives here so the rules
//! stay in one place and can be tested independently of the handlers.

use super::user::Role;
use crate::domain::ordering::value_objects::OrderStatus;

/// Whether a role may view an order.
///
/// Distributors see only their own orders; staff see all.
#[must_use]
pub const fn can_view_order(role: Role, is_owner: bool) -> bool {
    match role {
        Role::Distributor => is_owner,
        Role::Producer | Role::Admin => true,
    }
}

/// Whether a role may edit an order's details (dates, notes).
///
/// Distributors may edit their own orders while still DRAFT or SUBMITTED;
/// staff edits are unrestricted.
#[must_use]
pub const fn can_edit_order(role: Role, is_owner: bool, status: OrderStatus) -> bool {
    match role {
        Role::Distributor => is_owner && status.distributor_editable(),
        Role::Producer | Role::Admin => true,
    }
}

/// Whether a role may delete an order.
///
/// The status rule (delete requires DRAFT) is enforced separately by the
/// aggregate; this covers only ownership.
#[must_use]
pub const fn can_delete_order(role: Role, is_owner: bool) -> bool {
    match role {
        Role::Distributor => is_owner,
        Role::Producer | Role::Admin => true,
    }
}

/// Whether a role may change an order's status.
#[must_use]
pub const fn can_update_status(role: Role) -> bool {
    role.is_staff()
}

/// Whether a role may adjust order item quantities.
#[must_use]
pub const fn can_adjust_items(role: Role) -> bool {
    role.is_staff()
}

/// Whether a role may manage production batches.
#[must_use]
pub const fn can_manage_production(role: Role) -> bool {
    role.is_staff()
}
