//! Price derivation over the current selection.

use crate::inventory::SeatInventory;
use crate::selection::SelectionState;
use crate::types::Money;

/// Total price of the selected seats at the inventory's current prices.
///
/// Ids present in the selection but missing from the inventory contribute
/// zero rather than erroring — reconciliation may race with a price
/// recomputation, and a stale id must not take the whole view down. An
/// empty selection totals zero.
#[must_use]
pub fn total(selection: &SelectionState, inventory: &SeatInventory) -> Money {
    selection
        .iter()
        .filter_map(|id| inventory.get(id))
        .fold(Money::ZERO, |sum, seat| sum.saturating_add(seat.price))
}
