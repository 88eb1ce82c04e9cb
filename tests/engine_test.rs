// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Engine public API integration tests.

use vaccination_booking::{
    Appointment, BookingEngine, BookingError, CenterId, Day, Entity, ErrorKind, UserId,
};

fn center(id: &str) -> CenterId {
    CenterId::from(id)
}

fn user(id: &str) -> UserId {
    UserId::from(id)
}

/// Engine with center C1 in Bangalore and adult users U1, U2.
fn setup() -> BookingEngine {
    let engine = BookingEngine::new();
    engine.register_center("KA", "Bangalore", center("C1")).unwrap();
    engine
        .register_user(user("U1"), "Asha", "F", "30", "KA", "Bangalore")
        .unwrap();
    engine
        .register_user(user("U2"), "Ravi", "M", "45", "KA", "Bangalore")
        .unwrap();
    engine
}

// === Registration ===

#[test]
fn register_user_age_boundary() {
    let engine = BookingEngine::new();
    assert_eq!(
        engine.register_user(user("U18"), "Teen", "F", "18", "KA", "B"),
        Err(BookingError::Ineligible { age: 18 })
    );
    engine
        .register_user(user("U19"), "Adult", "F", "19", "KA", "B")
        .unwrap();

    assert!(engine.user(&user("U18")).is_none());
    assert_eq!(engine.user(&user("U19")).unwrap().age, 19);
}

#[test]
fn register_user_invalid_age() {
    let engine = BookingEngine::new();
    let result = engine.register_user(user("U1"), "Asha", "F", "thirty", "KA", "B");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidInput);
    assert_eq!(engine.user_count(), 0);
}

#[test]
fn register_user_negative_age_is_ineligible() {
    let engine = BookingEngine::new();
    let result = engine.register_user(user("U1"), "Asha", "F", "-20", "KA", "B");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Ineligible);
    assert_eq!(
        engine.register_user(user("U1"), "Asha", "F", "-20", "KA", "B"),
        Err(BookingError::Ineligible { age: -20 })
    );
    assert_eq!(engine.user_count(), 0);
}

#[test]
fn register_user_duplicate_checked_before_age() {
    let engine = setup();
    assert_eq!(
        engine.register_user(user("U1"), "Other", "M", "not-a-number", "TN", "Chennai"),
        Err(BookingError::DuplicateKey(Entity::User))
    );
    // Original record untouched.
    assert_eq!(engine.user(&user("U1")).unwrap().name, "Asha");
}

#[test]
fn register_center_duplicate() {
    let engine = setup();
    assert_eq!(
        engine.register_center("TN", "Chennai", center("C1")),
        Err(BookingError::DuplicateKey(Entity::Center))
    );
    assert_eq!(engine.center(&center("C1")).unwrap().district, "Bangalore");
}

#[test]
fn user_and_center_ids_are_separate_namespaces() {
    let engine = setup();
    engine.register_center("KA", "Bangalore", center("U1")).unwrap();
    assert_eq!(engine.center_count(), 2);
    assert_eq!(engine.user_count(), 2);
}

// === Capacity ===

#[test]
fn add_capacity_unknown_center() {
    let engine = setup();
    assert_eq!(
        engine.add_capacity(&center("C9"), "5", "10"),
        Err(BookingError::NotFound(Entity::Center))
    );
}

#[test]
fn add_capacity_invalid_numbers() {
    let engine = setup();
    let c1 = center("C1");
    for (day, capacity) in [("x", "1"), ("-1", "1"), ("1", "x"), ("1", "-5"), ("1", "2.5")] {
        let error = engine.add_capacity(&c1, day, capacity).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput, "day={day} capacity={capacity}");
    }
    assert!(engine.capacity_schedule(&c1).unwrap().is_empty());
}

#[test]
fn add_capacity_is_cumulative() {
    let engine = setup();
    let c1 = center("C1");
    assert_eq!(engine.add_capacity(&c1, "5", "2"), Ok(2));
    assert_eq!(engine.add_capacity(&c1, "5", "3"), Ok(5));
    assert_eq!(engine.add_capacity(&c1, "6", "1"), Ok(1));

    let schedule: Vec<_> = engine.capacity_schedule(&c1).unwrap().into_iter().collect();
    assert_eq!(schedule, vec![(Day(5), 5), (Day(6), 1)]);
}

#[test]
fn add_capacity_uses_capacity_argument_not_day() {
    let engine = setup();
    let c1 = center("C1");
    engine.add_capacity(&c1, "7", "2").unwrap();
    assert_eq!(engine.remaining_capacity(&c1, Day(7)), Some(2));
}

// === Booking ===

#[test]
fn booking_consumes_one_dose() {
    let engine = setup();
    let c1 = center("C1");
    engine.add_capacity(&c1, "5", "2").unwrap();

    engine.book(&c1, "5", &user("U1")).unwrap();

    assert_eq!(engine.remaining_capacity(&c1, Day(5)), Some(1));
    assert_eq!(
        engine.appointments(&c1).unwrap(),
        vec![Appointment {
            center_id: c1.clone(),
            user_id: user("U1"),
            day: Day(5),
        }]
    );
}

#[test]
fn duplicate_booking_keeps_capacity() {
    let engine = setup();
    let c1 = center("C1");
    engine.add_capacity(&c1, "5", "2").unwrap();

    engine.book(&c1, "5", &user("U1")).unwrap();
    assert_eq!(engine.remaining_capacity(&c1, Day(5)), Some(1));

    assert_eq!(engine.book(&c1, "5", &user("U1")), Err(BookingError::DuplicateBooking));
    assert_eq!(engine.remaining_capacity(&c1, Day(5)), Some(1));
    assert_eq!(engine.appointments(&c1).unwrap().len(), 1);
}

#[test]
fn last_dose_goes_to_first_caller() {
    let engine = setup();
    let c1 = center("C1");
    engine.add_capacity(&c1, "5", "1").unwrap();

    engine.book(&c1, "5", &user("U1")).unwrap();
    assert_eq!(engine.remaining_capacity(&c1, Day(5)), Some(0));

    assert_eq!(engine.book(&c1, "5", &user("U2")), Err(BookingError::CapacityExhausted));
}

#[test]
fn booking_without_capacity_is_exhausted() {
    let engine = setup();
    assert_eq!(
        engine.book(&center("C1"), "5", &user("U1")),
        Err(BookingError::CapacityExhausted)
    );
}

#[test]
fn same_user_may_book_different_days() {
    let engine = setup();
    let c1 = center("C1");
    engine.add_capacity(&c1, "5", "1").unwrap();
    engine.add_capacity(&c1, "6", "1").unwrap();

    engine.book(&c1, "5", &user("U1")).unwrap();
    engine.book(&c1, "6", &user("U1")).unwrap();
    assert_eq!(engine.appointments(&c1).unwrap().len(), 2);
}

#[test]
fn same_user_may_book_different_centers_same_day() {
    let engine = setup();
    engine.register_center("KA", "Mysore", center("C2")).unwrap();
    engine.add_capacity(&center("C1"), "5", "1").unwrap();
    engine.add_capacity(&center("C2"), "5", "1").unwrap();

    engine.book(&center("C1"), "5", &user("U1")).unwrap();
    engine.book(&center("C2"), "5", &user("U1")).unwrap();
}

#[test]
fn booking_check_order() {
    let engine = setup();
    let c1 = center("C1");

    // Unknown center wins over a bad day and an unknown user.
    assert_eq!(
        engine.book(&center("C9"), "bad", &user("U9")),
        Err(BookingError::NotFound(Entity::Center))
    );
    // Bad day wins over an unknown user.
    assert_eq!(
        engine.book(&c1, "bad", &user("U9")).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
    assert_eq!(
        engine.book(&c1, "5", &user("U9")),
        Err(BookingError::NotFound(Entity::User))
    );
    // Exhausted capacity is reported before a duplicate booking.
    engine.add_capacity(&c1, "5", "1").unwrap();
    engine.book(&c1, "5", &user("U1")).unwrap();
    assert_eq!(engine.book(&c1, "5", &user("U1")), Err(BookingError::CapacityExhausted));
}

// === Cancellation ===

#[test]
fn book_then_cancel_restores_capacity() {
    let engine = setup();
    let c1 = center("C1");
    engine.add_capacity(&c1, "5", "3").unwrap();
    engine.book(&c1, "5", &user("U2")).unwrap();
    let before = engine.remaining_capacity(&c1, Day(5));

    engine.book(&c1, "5", &user("U1")).unwrap();
    engine.cancel(&c1, "5", &user("U1")).unwrap();

    assert_eq!(engine.remaining_capacity(&c1, Day(5)), before);
    let remaining: Vec<_> = engine
        .appointments(&c1)
        .unwrap()
        .into_iter()
        .map(|a| a.user_id)
        .collect();
    assert_eq!(remaining, vec![user("U2")]);
}

#[test]
fn cancel_frees_dose_for_another_user() {
    let engine = setup();
    let c1 = center("C1");
    engine.add_capacity(&c1, "5", "1").unwrap();
    engine.book(&c1, "5", &user("U1")).unwrap();
    assert_eq!(engine.book(&c1, "5", &user("U2")), Err(BookingError::CapacityExhausted));

    engine.cancel(&c1, "5", &user("U1")).unwrap();
    engine.book(&c1, "5", &user("U2")).unwrap();
}

#[test]
fn cancel_errors() {
    let engine = setup();
    let c1 = center("C1");
    engine.add_capacity(&c1, "5", "1").unwrap();
    engine.book(&c1, "5", &user("U1")).unwrap();

    assert_eq!(
        engine.cancel(&center("C9"), "5", &user("U1")),
        Err(BookingError::NotFound(Entity::Center))
    );
    assert_eq!(
        engine.cancel(&c1, "five", &user("U1")).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
    assert_eq!(
        engine.cancel(&c1, "5", &user("U9")),
        Err(BookingError::NotFound(Entity::User))
    );
    assert_eq!(
        engine.cancel(&c1, "6", &user("U1")),
        Err(BookingError::AppointmentNotFound)
    );
    assert_eq!(
        engine.cancel(&c1, "5", &user("U2")),
        Err(BookingError::AppointmentNotFound)
    );

    // Nothing changed.
    assert_eq!(engine.remaining_capacity(&c1, Day(5)), Some(0));
    assert_eq!(engine.appointments(&c1).unwrap().len(), 1);
}

#[test]
fn double_cancel_fails() {
    let engine = setup();
    let c1 = center("C1");
    engine.add_capacity(&c1, "5", "1").unwrap();
    engine.book(&c1, "5", &user("U1")).unwrap();
    engine.cancel(&c1, "5", &user("U1")).unwrap();

    assert_eq!(
        engine.cancel(&c1, "5", &user("U1")),
        Err(BookingError::AppointmentNotFound)
    );
    assert_eq!(engine.remaining_capacity(&c1, Day(5)), Some(1));
}

// === Listing ===

#[test]
fn list_centers_by_district() {
    let engine = setup();
    engine.register_center("KA", "Mysore", center("C2")).unwrap();
    engine.register_center("KA", "Bangalore", center("C0")).unwrap();

    let ids: Vec<_> = engine
        .centers_in_district("Bangalore")
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![center("C0"), center("C1")]);

    assert!(engine.centers_in_district("Chennai").is_empty());
    // Matching is exact.
    assert!(engine.centers_in_district("bangalore").is_empty());
}

#[test]
fn list_bookings_on_day() {
    let engine = setup();
    let c1 = center("C1");
    engine.add_capacity(&c1, "5", "2").unwrap();
    engine.add_capacity(&c1, "6", "1").unwrap();
    engine.book(&c1, "5", &user("U2")).unwrap();
    engine.book(&c1, "6", &user("U2")).unwrap();
    engine.book(&c1, "5", &user("U1")).unwrap();

    let users: Vec<_> = engine
        .bookings_on_day(&c1, "5")
        .unwrap()
        .into_iter()
        .map(|a| a.user_id)
        .collect();
    assert_eq!(users, vec![user("U2"), user("U1")]);
}

#[test]
fn list_bookings_on_empty_day() {
    let engine = setup();
    let c1 = center("C1");
    engine.add_capacity(&c1, "5", "1").unwrap();
    engine.book(&c1, "5", &user("U1")).unwrap();

    assert_eq!(engine.bookings_on_day(&c1, "9"), Err(BookingError::NoBookings));
}

#[test]
fn list_bookings_errors() {
    let engine = setup();
    assert_eq!(
        engine.bookings_on_day(&center("C9"), "5"),
        Err(BookingError::NotFound(Entity::Center))
    );
    assert_eq!(
        engine.bookings_on_day(&center("C1"), "x").unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
    // No bookings at all.
    assert_eq!(
        engine.bookings_on_day(&center("C1"), "5"),
        Err(BookingError::NoBookings)
    );
}

#[test]
fn accessors_on_unknown_center() {
    let engine = setup();
    let c9 = center("C9");
    assert!(engine.center(&c9).is_none());
    assert!(engine.remaining_capacity(&c9, Day(1)).is_none());
    assert!(engine.capacity_schedule(&c9).is_none());
    assert!(engine.appointments(&c9).is_none());
}
