use geo::{Length, LineString};
use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::entities::{earth, Coordinates, Stop, StopKind};

/// Visiting order over the resolved stops plus its straight-line length.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComputedRoute {
    pub sequence: Vec<usize>,
    pub distance_km: f64,
}

/// Pickups first, then drop-offs, each group in list order. Unresolved stops
/// are left out. Returns `None` unless there is at least one resolved pickup
/// and one resolved drop-off.
pub fn compute_route(stops: &[Stop]) -> Option<ComputedRoute> {
    let (pickups, dropoffs): (Vec<_>, Vec<_>) = stops
        .iter()
        .enumerate()
        .filter_map(|(index, stop)| {
            stop.coordinates
                .map(|coordinates| (index, stop.kind, coordinates))
        })
        .partition(|(_, kind, _)| *kind == StopKind::Pickup);

    if pickups.is_empty() || dropoffs.is_empty() {
        return None;
    }

    let visits: Vec<(usize, Coordinates)> = pickups
        .into_iter()
        .chain(dropoffs)
        .map(|(index, _, coordinates)| (index, coordinates))
        .collect();

    if visits.len() < 2 {
        return None;
    }

    Some(ComputedRoute {
        sequence: visits.iter().map(|(index, _)| *index).collect(),
        distance_km: path_length_km(visits.iter().map(|(_, coordinates)| *coordinates)),
    })
}

/// Sum of great-circle segment lengths between consecutive points.
pub fn path_length_km(points: impl IntoIterator<Item = Coordinates>) -> f64 {
    let line: LineString<f64> = points.into_iter().map(Point::from).collect::<Vec<_>>().into();

    earth().length(&line) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pickup(lon: f64, lat: f64) -> Stop {
        Stop::resolved(StopKind::Pickup, "p", Coordinates::new(lon, lat))
    }

    fn dropoff(lon: f64, lat: f64) -> Stop {
        Stop::resolved(StopKind::Dropoff, "d", Coordinates::new(lon, lat))
    }

    #[test]
    fn single_pickup_and_dropoff() {
        let route = compute_route(&[pickup(0.0, 0.0), dropoff(0.0, 1.0)]).unwrap();

        assert_eq!(route.sequence, vec![0, 1]);
        assert!((route.distance_km - 111.19).abs() < 0.01);
    }

    #[test]
    fn pickups_come_before_dropoffs_in_list_order() {
        let stops = vec![
            dropoff(0.0, 3.0),
            pickup(0.0, 0.0),
            dropoff(0.0, 4.0),
            pickup(0.0, 1.0),
        ];

        let route = compute_route(&stops).unwrap();

        assert_eq!(route.sequence, vec![1, 3, 0, 2]);
        // 0 -> 1 -> 3 -> 4 degrees of latitude
        assert!((route.distance_km - 4.0 * 111.19).abs() < 0.05);
    }

    #[test]
    fn unresolved_stops_are_skipped() {
        let stops = vec![
            pickup(0.0, 0.0),
            Stop::new(StopKind::Pickup),
            dropoff(0.0, 1.0),
            Stop::new(StopKind::Dropoff),
        ];

        let route = compute_route(&stops).unwrap();

        assert_eq!(route.sequence, vec![0, 2]);
    }

    #[test]
    fn no_route_without_both_kinds() {
        assert_eq!(compute_route(&[pickup(0.0, 0.0), pickup(1.0, 1.0)]), None);
        assert_eq!(compute_route(&[dropoff(0.0, 0.0), dropoff(1.0, 1.0)]), None);
        assert_eq!(
            compute_route(&[pickup(0.0, 0.0), Stop::new(StopKind::Dropoff)]),
            None
        );
        assert_eq!(compute_route(&[]), None);
    }

    #[test]
    fn path_length_of_nothing_is_zero() {
        assert_eq!(path_length_km(Vec::new()), 0.0);
        assert_eq!(path_length_km(vec![Coordinates::new(5.0, 5.0)]), 0.0);
    }

    #[test]
    fn path_length_matches_summed_segments() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 1.0);
        let c = Coordinates::new(1.0, 1.0);

        let summed = a.distance_km(&b) + b.distance_km(&c);

        assert!((path_length_km(vec![a, b, c]) - summed).abs() < 1e-6);
        assert!((a.distance_km(&b) - 111.19).abs() < 0.01);
    }
}
