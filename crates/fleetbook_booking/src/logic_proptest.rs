#[cfg(test)]
mod tests {
    use crate::logic::{
        available_resources, flatten_groups, group_by_date, has_conflict, hide_expired,
        is_expired,
    };
    use chrono::{Duration, NaiveDate};
    use fleetbook_common::{Reservation, ResourceId};
    use fleetbook_config::GroupingPolicy;
    use proptest::prelude::*;

    const PLATES: [&str; 4] = ["BJK-0596", "RBH-9726", "RFJ-2180", "BHB-7291"];

    fn base() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    // (plate index, start offset in days, length in days)
    fn reservation_strategy() -> impl Strategy<Value = (usize, i64, i64)> {
        (0..PLATES.len(), 0..60i64, 0..10i64)
    }

    fn build(specs: &[(usize, i64, i64)]) -> Vec<Reservation> {
        specs
            .iter()
            .enumerate()
            .map(|(i, &(plate, offset, len))| {
                let start = base() + Duration::days(offset);
                Reservation {
                    id: i.to_string(),
                    external_ref: (i + 1).to_string(),
                    start_date: start,
                    end_date: start + Duration::days(len),
                    resource_id: ResourceId::new(PLATES[plate]),
                    location: "高雄辦".to_string(),
                    requester: format!("requester {i}"),
                    destination: "Kaohsiung".to_string(),
                    note: None,
                }
            })
            .collect()
    }

    fn policy_strategy() -> impl Strategy<Value = GroupingPolicy> {
        prop_oneof![Just(GroupingPolicy::ExpandDays), Just(GroupingPolicy::StartDate)]
    }

    proptest! {
        // The result is a subset of the input, and a plate is free iff nothing covers the day
        #[test]
        fn test_available_is_subset_and_exact(
            specs in prop::collection::vec(reservation_strategy(), 0..20),
            plates in prop::collection::vec(0..PLATES.len(), 0..6),
            day in 0..70i64,
        ) {
            let reservations = build(&specs);
            let all: Vec<ResourceId> = plates.iter().map(|&p| ResourceId::new(PLATES[p])).collect();
            let on = base() + Duration::days(day);

            let free = available_resources(&all, &reservations, on);

            for id in &free {
                prop_assert!(all.contains(id));
            }
            for id in &all {
                let busy = reservations
                    .iter()
                    .any(|r| &r.resource_id == id && r.start_date <= on && on <= r.end_date);
                prop_assert_eq!(free.contains(id), !busy);
            }
        }

        // Swapping candidate and existing gives the same answer
        #[test]
        fn test_conflict_is_symmetric(
            a in reservation_strategy(),
            b in reservation_strategy(),
        ) {
            let (b_plate, b_offset, b_len) = b;
            let built = build(&[a, (a.0, b_offset, b_len)]);
            let (first, second) = (&built[0], &built[1]);
            let plate = ResourceId::new(PLATES[a.0]);

            let forward = has_conflict(&plate, second.start_date, second.end_date, std::slice::from_ref(first));
            let backward = has_conflict(&plate, first.start_date, first.end_date, std::slice::from_ref(second));
            prop_assert_eq!(forward, backward);

            // A different plate never conflicts
            let other = ResourceId::new(PLATES[(b_plate + 1) % PLATES.len()]);
            if other != plate {
                prop_assert!(!has_conflict(&other, second.start_date, second.end_date, std::slice::from_ref(first)));
            }
        }

        // Grouping then flattening gives back exactly the input reservations
        #[test]
        fn test_group_then_flatten_preserves_multiset(
            specs in prop::collection::vec(reservation_strategy(), 0..20),
            policy in policy_strategy(),
        ) {
            let reservations = build(&specs);
            let mut flat = flatten_groups(&group_by_date(&reservations, policy));
            flat.sort_by_key(|r| r.id.parse::<usize>().unwrap());
            prop_assert_eq!(flat, reservations);
        }

        // Groups come out strictly ascending by date
        #[test]
        fn test_groups_are_ascending(
            specs in prop::collection::vec(reservation_strategy(), 0..20),
            policy in policy_strategy(),
        ) {
            let groups = group_by_date(&build(&specs), policy);
            for pair in groups.windows(2) {
                prop_assert!(pair[0].date < pair[1].date);
            }
        }

        // Nothing expired survives the filter, and nothing running is lost
        #[test]
        fn test_hide_expired_keeps_exactly_current_reservations(
            specs in prop::collection::vec(reservation_strategy(), 0..20),
            policy in policy_strategy(),
            reference in 0..70i64,
        ) {
            let reservations = build(&specs);
            let reference = base() + Duration::days(reference);

            let shown = flatten_groups(&hide_expired(group_by_date(&reservations, policy), policy, reference));

            for r in &shown {
                prop_assert!(!is_expired(r, reference));
            }
            // Under StartDate every current reservation stays; under ExpandDays
            // it stays through its days on or after the reference.
            let current = reservations.iter().filter(|r| !is_expired(r, reference)).count();
            prop_assert_eq!(shown.len(), current);
        }
    }
}
