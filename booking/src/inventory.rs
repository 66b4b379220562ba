//! Seat inventory for one show.
//!
//! The inventory is the client's last known copy of the server's seat
//! state. It is refreshed wholesale by a fetch and patched selectively by
//! [`SeatInventory::reconcile`] after a submission conflict; the client
//! never mutates a status on its own.

use crate::backend::{BookingBackend, FetchError};
use crate::types::{Seat, SeatCategory, SeatId, SeatStatus, ShowId};
use std::collections::HashMap;

/// Ordered collection of one show's seats, indexed by id.
///
/// Invariant: every seat id is unique. When the server sends the same id
/// twice, the later entry wins (server truth replaces earlier data) and a
/// warning is logged.
#[derive(Clone, Debug, Default)]
pub struct SeatInventory {
    seats: Vec<Seat>,
    index: HashMap<SeatId, usize>,
}

impl SeatInventory {
    /// Build an inventory from server-returned seats, preserving order.
    pub fn from_seats(seats: impl IntoIterator<Item = Seat>) -> Self {
        let mut inventory = Self::default();
        for seat in seats {
            if let Some(&slot) = inventory.index.get(&seat.id) {
                tracing::warn!(seat_id = %seat.id, "duplicate seat id in inventory, replacing");
                inventory.seats[slot] = seat;
            } else {
                inventory.index.insert(seat.id, inventory.seats.len());
                inventory.seats.push(seat);
            }
        }
        inventory
    }

    /// Fetch a show's inventory through the backend port.
    ///
    /// # Errors
    ///
    /// [`FetchError::NotFound`] when the show does not exist or has no
    /// seats; [`FetchError::Unreachable`] when the backend cannot be
    /// reached. Failures are meant to be displayed — an empty-seat
    /// fallback would read as a sold-out show.
    pub async fn load(
        backend: &dyn BookingBackend,
        show_id: ShowId,
    ) -> Result<Self, FetchError> {
        let seats = backend.fetch_seats(show_id).await?;
        if seats.is_empty() {
            return Err(FetchError::NotFound);
        }
        let inventory = Self::from_seats(seats);
        tracing::debug!(%show_id, seats = inventory.len(), "seat inventory loaded");
        Ok(inventory)
    }

    /// Look up a seat by id.
    #[must_use]
    pub fn get(&self, id: SeatId) -> Option<&Seat> {
        self.index.get(&id).map(|&slot| &self.seats[slot])
    }

    /// Whether the seat is currently selectable.
    #[must_use]
    pub fn is_available(&self, id: SeatId) -> bool {
        self.get(id).is_some_and(Seat::is_available)
    }

    /// All seats in server order.
    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Number of seats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Whether the inventory holds no seats.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Seats grouped for display: category precedence (Recliner, Premium,
    /// Executive, Normal), then seat label within each group. Categories
    /// with no seats are omitted.
    ///
    /// The grouping is a derived view; the flat seat list stays the single
    /// source of truth.
    #[must_use]
    pub fn by_category(&self) -> Vec<(SeatCategory, Vec<&Seat>)> {
        let mut groups: Vec<(SeatCategory, Vec<&Seat>)> = SeatCategory::PRECEDENCE
            .iter()
            .map(|&category| (category, Vec::new()))
            .collect();
        for seat in &self.seats {
            groups[seat.category.precedence()].1.push(seat);
        }
        for (_, seats) in &mut groups {
            seats.sort_by(|a, b| a.number.cmp(&b.number));
        }
        groups.retain(|(_, seats)| !seats.is_empty());
        groups
    }

    /// Overwrite matching seats with server-supplied truth.
    ///
    /// Seats whose id is unknown to this inventory are ignored; seats not
    /// present in `updated` are left untouched. Returns the ids among the
    /// updates that are no longer available — the caller must drop these
    /// from any live selection.
    pub fn reconcile(&mut self, updated: impl IntoIterator<Item = Seat>) -> Vec<SeatId> {
        let mut lost = Vec::new();
        for seat in updated {
            let Some(&slot) = self.index.get(&seat.id) else {
                tracing::debug!(seat_id = %seat.id, "reconcile update for unknown seat, ignoring");
                continue;
            };
            if !seat.status.is_available() {
                lost.push(seat.id);
            }
            self.seats[slot] = seat;
        }
        lost
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Money, SeatNumber};

    fn seat(id: i64, number: &str, category: SeatCategory, status: SeatStatus) -> Seat {
        Seat::new(
            SeatId::new(id),
            SeatNumber::new(number),
            category,
            Money::from_rupees(150),
            status,
        )
    }

    #[test]
    fn indexes_seats_by_id() {
        let inventory = SeatInventory::from_seats([
            seat(1, "A1", SeatCategory::Normal, SeatStatus::Available),
            seat(2, "A2", SeatCategory::Normal, SeatStatus::Booked),
        ]);

        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.get(SeatId::new(2)).unwrap().number.as_str(), "A2");
        assert!(inventory.is_available(SeatId::new(1)));
        assert!(!inventory.is_available(SeatId::new(2)));
        assert!(!inventory.is_available(SeatId::new(99)));
    }

    #[test]
    fn duplicate_ids_keep_the_later_entry() {
        let inventory = SeatInventory::from_seats([
            seat(1, "A1", SeatCategory::Normal, SeatStatus::Available),
            seat(1, "A1", SeatCategory::Normal, SeatStatus::Booked),
        ]);

        assert_eq!(inventory.len(), 1);
        assert_eq!(
            inventory.get(SeatId::new(1)).unwrap().status,
            SeatStatus::Booked
        );
    }

    #[test]
    fn by_category_follows_precedence_then_label() {
        let inventory = SeatInventory::from_seats([
            seat(1, "C2", SeatCategory::Normal, SeatStatus::Available),
            seat(2, "A1", SeatCategory::Recliner, SeatStatus::Available),
            seat(3, "C1", SeatCategory::Normal, SeatStatus::Available),
            seat(4, "B1", SeatCategory::Premium, SeatStatus::Available),
        ]);

        let groups = inventory.by_category();
        let categories: Vec<SeatCategory> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            categories,
            vec![SeatCategory::Recliner, SeatCategory::Premium, SeatCategory::Normal]
        );

        let normals: Vec<&str> = groups
            .iter()
            .find(|(c, _)| *c == SeatCategory::Normal)
            .map(|(_, seats)| seats.iter().map(|s| s.number.as_str()).collect())
            .unwrap();
        assert_eq!(normals, vec!["C1", "C2"]);
    }

    #[test]
    fn reconcile_replaces_matching_and_signals_lost_seats() {
        let mut inventory = SeatInventory::from_seats([
            seat(1, "A1", SeatCategory::Normal, SeatStatus::Available),
            seat(2, "A2", SeatCategory::Normal, SeatStatus::Available),
        ]);

        let lost = inventory.reconcile([
            seat(2, "A2", SeatCategory::Normal, SeatStatus::Locked),
            // unknown id: ignored
            seat(9, "Z9", SeatCategory::Normal, SeatStatus::Booked),
        ]);

        assert_eq!(lost, vec![SeatId::new(2)]);
        assert_eq!(
            inventory.get(SeatId::new(2)).unwrap().status,
            SeatStatus::Locked
        );
        assert!(inventory.is_available(SeatId::new(1)));
        assert!(inventory.get(SeatId::new(9)).is_none());
    }

    #[test]
    fn reconcile_with_available_update_signals_nothing() {
        let mut inventory = SeatInventory::from_seats([seat(
            1,
            "A1",
            SeatCategory::Normal,
            SeatStatus::Locked,
        )]);

        let lost = inventory.reconcile([seat(
            1,
            "A1",
            SeatCategory::Normal,
            SeatStatus::Available,
        )]);

        assert!(lost.is_empty());
        assert!(inventory.is_available(SeatId::new(1)));
    }
}
