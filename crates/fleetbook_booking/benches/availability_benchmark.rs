use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fleetbook_booking::logic::{available_resources, group_by_date, has_conflict};
use fleetbook_common::{Reservation, ResourceId};
use fleetbook_config::GroupingPolicy;

// Helper function to create a fleet of plates
fn create_fleet(count: usize) -> Vec<ResourceId> {
    (0..count)
        .map(|i| ResourceId::new(format!("ABC-{:04}", i)))
        .collect()
}

// Helper function to create back-to-back reservations spread over the fleet
fn create_reservations(fleet: &[ResourceId], per_vehicle: usize) -> Vec<Reservation> {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut reservations = Vec::new();

    for (v, id) in fleet.iter().enumerate() {
        for n in 0..per_vehicle {
            let start = base + Duration::days((n * 4 + v % 3) as i64);
            reservations.push(Reservation {
                id: reservations.len().to_string(),
                external_ref: (reservations.len() + 1).to_string(),
                start_date: start,
                end_date: start + Duration::days(2),
                resource_id: id.clone(),
                location: "高雄辦".to_string(),
                requester: "bench".to_string(),
                destination: "Kaohsiung".to_string(),
                note: None,
            });
        }
    }

    reservations
}

fn benchmark_booking_logic(c: &mut Criterion) {
    let mut group = c.benchmark_group("booking_logic");
    let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

    // The production fleet: ten vehicles, a year of bookings
    let fleet = create_fleet(10);
    let reservations = create_reservations(&fleet, 90);

    group.bench_function("available_resources_10_vehicles", |b| {
        b.iter(|| available_resources(black_box(&fleet), black_box(&reservations), black_box(day)))
    });

    group.bench_function("has_conflict_10_vehicles", |b| {
        b.iter(|| {
            has_conflict(
                black_box(&fleet[7]),
                black_box(day),
                black_box(day + Duration::days(3)),
                black_box(&reservations),
            )
        })
    });

    group.bench_function("group_by_date_expand_days", |b| {
        b.iter(|| group_by_date(black_box(&reservations), GroupingPolicy::ExpandDays))
    });

    group.bench_function("group_by_date_start_date", |b| {
        b.iter(|| group_by_date(black_box(&reservations), GroupingPolicy::StartDate))
    });

    // A much larger fleet
    let large_fleet = create_fleet(500);
    let large_reservations = create_reservations(&large_fleet, 20);

    group.bench_function("available_resources_500_vehicles", |b| {
        b.iter(|| {
            available_resources(
                black_box(&large_fleet),
                black_box(&large_reservations),
                black_box(day),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_booking_logic);
criterion_main!(benches);
