use qpx::error::FlightError;
use qpx::query::{parse_carriers, parse_leg, Cabin, Passengers, SearchRequest, TripSlice};

#[test]
fn one_way_has_single_adult_and_slice() {
    let req = SearchRequest::one_way("JFK", "LAX", "2026-04-01");
    assert_eq!(req.slice.len(), 1);
    assert_eq!(req.passengers.adult_count, 1);
    assert_eq!(req.passengers.total(), 1);
    assert_eq!(req.slice[0].kind, "qpxexpress#sliceInput");
}

#[test]
fn round_trip_reverses_second_slice() {
    let req = SearchRequest::round_trip("JFK", "LAX", "2026-04-01", "2026-04-09");
    assert_eq!(req.slice.len(), 2);
    assert_eq!(req.slice[0].origin, "JFK");
    assert_eq!(req.slice[1].origin, "LAX");
    assert_eq!(req.slice[1].destination, "JFK");
    assert_eq!(req.slice[1].date, "2026-04-09");
}

#[test]
fn reversed_keeps_constraints() {
    let mut out = TripSlice::new("BOS", "LHR", "2026-06-01");
    out.max_stops = Some(0);
    out.permitted_carrier = vec!["BA".into()];
    let back = out.reversed("2026-06-10");
    assert_eq!(back.max_stops, Some(0));
    assert_eq!(back.permitted_carrier, vec!["BA"]);
    assert_eq!(back.origin, "LHR");
}

#[test]
fn passenger_total_counts_everyone() {
    let pax = Passengers {
        child_count: 2,
        senior_count: 1,
        infant_in_lap_count: 1,
        ..Passengers::adults(2)
    };
    assert_eq!(pax.total(), 6);
}

#[test]
fn cabin_accepts_cli_and_wire_spellings() {
    assert_eq!(Cabin::from_str_loose("economy").unwrap(), Cabin::Coach);
    assert_eq!(Cabin::from_str_loose("COACH").unwrap(), Cabin::Coach);
    assert_eq!(Cabin::from_str_loose("premium-economy").unwrap(), Cabin::PremiumCoach);
    assert_eq!(Cabin::from_str_loose("PREMIUM_COACH").unwrap(), Cabin::PremiumCoach);
    assert_eq!(Cabin::from_str_loose("Business").unwrap(), Cabin::Business);
    assert_eq!(Cabin::from_str_loose("first").unwrap(), Cabin::First);
}

#[test]
fn cabin_rejects_unknown() {
    assert!(matches!(
        Cabin::from_str_loose("cargo"),
        Err(FlightError::Validation(_))
    ));
}

#[test]
fn carriers_are_trimmed_and_uppercased() {
    assert_eq!(parse_carriers("aa, dl,,UA "), vec!["AA", "DL", "UA"]);
    assert!(parse_carriers("").is_empty());
}

#[test]
fn leg_parses_date_from_to() {
    let slice = parse_leg("2026-03-01 lax nrt").unwrap();
    assert_eq!(slice.date, "2026-03-01");
    assert_eq!(slice.origin, "LAX");
    assert_eq!(slice.destination, "NRT");
}

#[test]
fn leg_with_wrong_arity_is_rejected() {
    assert!(parse_leg("2026-03-01 LAX").is_err());
    assert!(parse_leg("2026-03-01 LAX NRT SEA").is_err());
}

#[test]
fn passenger_total_does_not_overflow() {
    let pax = Passengers {
        adult_count: u32::MAX,
        child_count: u32::MAX,
        infant_in_lap_count: u32::MAX,
        infant_in_seat_count: u32::MAX,
        senior_count: u32::MAX,
        ..Passengers::default()
    };
    assert_eq!(pax.total(), 5 * u64::from(u32::MAX));

    let pax = Passengers {
        child_count: 1,
        ..Passengers::adults(u32::MAX)
    };
    assert_eq!(pax.total(), u64::from(u32::MAX) + 1);
}

#[test]
fn default_counts_are_zero_and_constructors_seed_one_adult() {
    assert_eq!(Passengers::default().adult_count, 0);
    assert_eq!(Passengers::default().kind, "");
    assert_eq!(SearchRequest::default().passengers.total(), 0);
    assert_eq!(SearchRequest::new(vec![]).passengers.adult_count, 1);
    assert_eq!(Passengers::adults(3).kind, "qpxexpress#passengerCounts");
}
