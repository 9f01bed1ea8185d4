// Criterion benchmarks for Meet Halfway

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use meet_halfway::core::{attach_drive_times, haversine_meters, order_venues, MidpointCalculator};
use meet_halfway::models::{Coordinate, DriveTime, Venue, VenueOrder};

fn create_venues(count: usize) -> Vec<Venue> {
    let mut venues: Vec<Venue> = (0..count)
        .map(|i| {
            let mut venue = Venue::new(format!("Venue {}", i), format!("{} Main St", i));
            venue.rating = 3.0 + (i % 20) as f64 / 10.0;
            venue.rating_count = (i * 7 % 500) as u32;
            venue
        })
        .collect();

    let from_a: Vec<DriveTime> = (0..count)
        .map(|i| if i % 9 == 0 { DriveTime::Unknown } else { DriveTime::Minutes((i % 60) as u32) })
        .collect();
    let from_b: Vec<DriveTime> = (0..count)
        .map(|i| DriveTime::Minutes((60 - i % 60) as u32))
        .collect();

    attach_drive_times(&mut venues, &from_a, &from_b);
    venues
}

fn bench_haversine(c: &mut Criterion) {
    c.bench_function("haversine_meters", |b| {
        b.iter(|| {
            haversine_meters(
                black_box(Coordinate::new(47.6062, -122.3321)),
                black_box(Coordinate::new(45.5152, -122.6784)),
            )
        });
    });
}

fn bench_midpoint(c: &mut Criterion) {
    let calculator = MidpointCalculator::default();

    c.bench_function("midpoint_compute", |b| {
        b.iter(|| {
            calculator.compute(
                black_box(Coordinate::new(47.6062, -122.3321)),
                black_box(Coordinate::new(45.5152, -122.6784)),
            )
        });
    });
}

fn bench_ordering(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordering");

    for venue_count in [20, 60, 200].iter() {
        let venues = create_venues(*venue_count);

        for order in [VenueOrder::Rating, VenueOrder::Balanced] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", order), venue_count),
                venue_count,
                |b, _| {
                    b.iter(|| {
                        let mut venues = venues.clone();
                        order_venues(black_box(&mut venues), order);
                        venues
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_haversine, bench_midpoint, bench_ordering);

criterion_main!(benches);
