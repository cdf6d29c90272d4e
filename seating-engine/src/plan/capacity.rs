//! Capacity checks
//!
//! A table holds `capacity` people; a guest occupies `1 + companion_count`
//! places. A ceremony seat holds exactly one person.

use super::error::{PlanError, PlanResult};
use super::state::GuestRoster;
use shared::models::{Guest, Seat, Table};

/// Places taken at `table`, not counting `exclude_guest`
pub fn occupied_excluding(roster: &GuestRoster, table_id: i64, exclude_guest: Option<i64>) -> u32 {
    roster
        .guests_at_table(table_id)
        .filter(|g| Some(g.id) != exclude_guest)
        .map(Guest::party_size)
        .sum()
}

/// Free places left at `table`
pub fn remaining_places(roster: &GuestRoster, table: &Table) -> u32 {
    table
        .capacity
        .saturating_sub(roster.occupied_at_table(table.id))
}

/// Would seating `guest` at `table` keep occupancy within capacity?
pub fn check_table_capacity(roster: &GuestRoster, table: &Table, guest: &Guest) -> PlanResult<()> {
    let occupied = occupied_excluding(roster, table.id, Some(guest.id));
    if occupied + guest.party_size() > table.capacity {
        return Err(PlanError::CapacityExceeded {
            remaining: table.capacity.saturating_sub(occupied),
        });
    }
    Ok(())
}

/// A seat accepts one person and must be enabled
pub fn check_seat_available(roster: &GuestRoster, seat: &Seat, guest: &Guest) -> PlanResult<()> {
    if !seat.enabled {
        return Err(PlanError::SeatDisabled(seat.id));
    }
    match roster.seat_holder(seat.id) {
        Some(holder) if holder.id != guest.id => Err(PlanError::CapacityExceeded { remaining: 0 }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Point, TableSize};

    fn table(capacity: u32) -> Table {
        Table {
            id: 1,
            name: "Table 1".to_string(),
            position: Point::new(100.0, 100.0),
            size: TableSize::default(),
            rotation: 0.0,
            capacity,
            locked: false,
            enabled: true,
        }
    }

    fn seated(id: i64, companions: u32) -> Guest {
        let mut g = Guest::new(id, format!("G{id}")).with_companions(companions);
        g.table_id = Some(1);
        g
    }

    #[test]
    fn rejects_when_party_does_not_fit() {
        let roster = GuestRoster::from_guests([seated(1, 3), seated(2, 1)]);
        let t = table(8);
        assert_eq!(remaining_places(&roster, &t), 2);

        let couple = Guest::new(3, "Pair").with_companions(1);
        assert!(check_table_capacity(&roster, &t, &couple).is_ok());

        let trio = Guest::new(4, "Trio").with_companions(2);
        assert_eq!(
            check_table_capacity(&roster, &t, &trio),
            Err(PlanError::CapacityExceeded { remaining: 2 })
        );
    }

    #[test]
    fn guest_already_at_table_is_not_double_counted() {
        let roster = GuestRoster::from_guests([seated(1, 7)]);
        let t = table(8);
        let same = roster.get(1).unwrap().clone();
        assert!(check_table_capacity(&roster, &t, &same).is_ok());
    }

    #[test]
    fn seat_holds_one_person() {
        let mut holder = Guest::new(1, "A");
        holder.seat_id = Some(5);
        let roster = GuestRoster::from_guests([holder]);
        let seat = Seat {
            id: 5,
            position: Point::ORIGIN,
            row: 0,
            column: 0,
            enabled: true,
        };
        let other = Guest::new(2, "B");
        assert_eq!(
            check_seat_available(&roster, &seat, &other),
            Err(PlanError::CapacityExceeded { remaining: 0 })
        );
        let disabled = Seat {
            enabled: false,
            ..seat
        };
        assert_eq!(
            check_seat_available(&GuestRoster::new(), &disabled, &other),
            Err(PlanError::SeatDisabled(5))
        );
    }
}
