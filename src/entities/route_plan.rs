use serde::{Deserialize, Serialize};

use crate::entities::Stop;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Visiting order, distance and fare of a submittable request. Never mutated
/// after it is built; a fresh plan is produced for every submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    sequence: Vec<usize>,
    total_distance_km: f64,
    price: f64,
}

impl RoutePlan {
    pub fn new(sequence: Vec<usize>, total_distance_km: f64, price: f64) -> Self {
        Self {
            sequence,
            total_distance_km,
            price,
        }
    }

    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    pub fn display_distance_km(&self) -> f64 {
        round2(self.total_distance_km)
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Walks `stops` in visiting order. Indices that fall outside `stops` are
    /// skipped.
    pub fn ordered_stops<'a>(&'a self, stops: &'a [Stop]) -> impl Iterator<Item = &'a Stop> + 'a {
        self.sequence.iter().filter_map(move |&index| stops.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round2(111.194_926), 111.19);
        assert_eq!(round2(33.000_000_000_000_004), 33.0);
        assert_eq!(round2(0.125), 0.13);
    }

    #[test]
    fn display_distance_is_rounded_but_total_is_not() {
        let plan = RoutePlan::new(vec![0, 1], 111.194_926, 232.39);

        assert_eq!(plan.display_distance_km(), 111.19);
        assert_eq!(plan.total_distance_km(), 111.194_926);
    }
}
