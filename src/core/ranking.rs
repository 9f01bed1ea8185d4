use std::cmp::Ordering;

use crate::models::{DriveTime, Venue, VenueOrder};

/// Attach drive times from both origins to the candidate set
///
/// `from_a` and `from_b` are positional: entry `i` belongs to `venues[i]`.
/// Missing entries become `DriveTime::Unknown`.
pub fn attach_drive_times(venues: &mut [Venue], from_a: &[DriveTime], from_b: &[DriveTime]) {
    for (i, venue) in venues.iter_mut().enumerate() {
        venue.drive_time_from_a = Some(from_a.get(i).copied().unwrap_or(DriveTime::Unknown));
        venue.drive_time_from_b = Some(from_b.get(i).copied().unwrap_or(DriveTime::Unknown));
    }
}

/// Order venues in place
///
/// Sorting is stable, so `VenueOrder::Provider` is a no-op and ties under the
/// other orders keep the provider's relative order. Nothing is filtered out.
pub fn order_venues(venues: &mut [Venue], order: VenueOrder) {
    match order {
        VenueOrder::Provider => {}
        VenueOrder::Rating => venues.sort_by(compare_by_rating),
        VenueOrder::Balanced => venues.sort_by(compare_by_balance),
    }
}

fn compare_by_rating(a: &Venue, b: &Venue) -> Ordering {
    b.rating
        .partial_cmp(&a.rating)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.rating_count.cmp(&a.rating_count))
}

fn compare_by_balance(a: &Venue, b: &Venue) -> Ordering {
    match (balance_key(a), balance_key(b)) {
        (Some(ka), Some(kb)) => ka.cmp(&kb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// (longest trip, difference between trips); `None` when either is unknown
fn balance_key(venue: &Venue) -> Option<(u32, u32)> {
    let a = venue.drive_time_from_a.and_then(|d| d.minutes())?;
    let b = venue.drive_time_from_b.and_then(|d| d.minutes())?;
    Some((a.max(b), a.abs_diff(b)))
}
