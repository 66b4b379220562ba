//! The user's in-progress seat selection.

use crate::inventory::SeatInventory;
use crate::types::SeatId;
use std::collections::BTreeSet;

/// The set of seats the user has picked.
///
/// Always a subset of the seats that were available when they were
/// toggled; the selection holds no duplicates and performs no I/O, which
/// keeps every operation independently testable. Ids are kept in seat-id
/// order, so toggling a seat off and on again restores the exact previous
/// state.
///
/// Availability can go stale between a toggle and the next submit — the
/// flow re-checks at submit time and the backend stays the final
/// authority either way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    seats: BTreeSet<SeatId>,
}

impl SelectionState {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            seats: BTreeSet::new(),
        }
    }

    /// Toggle a seat against the current inventory.
    ///
    /// A seat not yet selected is added only if the inventory currently
    /// reports it available; toggling a selected seat removes it; an
    /// unavailable, unselected seat is a no-op. The UI is expected to
    /// disable such seats, but the state layer does not trust UI state
    /// alone.
    ///
    /// Returns whether the seat is selected after the call.
    pub fn toggle(&mut self, seat_id: SeatId, inventory: &SeatInventory) -> bool {
        if self.seats.remove(&seat_id) {
            return false;
        }
        if inventory.is_available(seat_id) {
            self.seats.insert(seat_id);
            return true;
        }
        tracing::debug!(%seat_id, "toggle refused, seat not available");
        false
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.seats.clear();
    }

    /// Remove the given ids if present; absent ids are not an error.
    ///
    /// Used by conflict reconciliation to drop seats another user took.
    pub fn remove_ids(&mut self, ids: &[SeatId]) {
        for id in ids {
            self.seats.remove(id);
        }
    }

    /// Whether the seat is currently selected.
    #[must_use]
    pub fn contains(&self, seat_id: SeatId) -> bool {
        self.seats.contains(&seat_id)
    }

    /// The selected ids, in seat-id order.
    #[must_use]
    pub fn seat_ids(&self) -> Vec<SeatId> {
        self.seats.iter().copied().collect()
    }

    /// Iterate over the selected ids in seat-id order.
    pub fn iter(&self) -> impl Iterator<Item = SeatId> + '_ {
        self.seats.iter().copied()
    }

    /// Number of selected seats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}
