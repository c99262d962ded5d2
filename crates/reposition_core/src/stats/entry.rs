use serde::{Deserialize, Serialize};

/// Demand aggregate for one (region, time bin).
///
/// Only `sum_of_waiting_times` feeds repositioning scores; the other sums are
/// carried through merges untouched in meaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsEntry {
    pub sum_of_requested_rides: f64,
    pub sum_of_waiting_times: f64,
    pub sum_of_idling_vehicles: f64,
}

impl StatsEntry {
    pub fn new(
        sum_of_requested_rides: f64,
        sum_of_waiting_times: f64,
        sum_of_idling_vehicles: f64,
    ) -> Self {
        Self {
            sum_of_requested_rides,
            sum_of_waiting_times,
            sum_of_idling_vehicles,
        }
    }

    /// Entry carrying only a waiting-time sum.
    pub fn with_waiting_time(sum_of_waiting_times: f64) -> Self {
        Self {
            sum_of_waiting_times,
            ..Self::default()
        }
    }

    /// Field-wise arithmetic mean. Both entries must describe the same (region, bin).
    pub fn average(&self, other: &Self) -> Self {
        Self {
            sum_of_requested_rides: (self.sum_of_requested_rides + other.sum_of_requested_rides)
                / 2.0,
            sum_of_waiting_times: (self.sum_of_waiting_times + other.sum_of_waiting_times) / 2.0,
            sum_of_idling_vehicles: (self.sum_of_idling_vehicles + other.sum_of_idling_vehicles)
                / 2.0,
        }
    }

    /// Field-wise sum, used while accumulating observations within one iteration.
    pub fn aggregate(&self, other: &Self) -> Self {
        Self {
            sum_of_requested_rides: self.sum_of_requested_rides + other.sum_of_requested_rides,
            sum_of_waiting_times: self.sum_of_waiting_times + other.sum_of_waiting_times,
            sum_of_idling_vehicles: self.sum_of_idling_vehicles + other.sum_of_idling_vehicles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_is_field_wise_mean() {
        let a = StatsEntry::new(4.0, 20.0, 1.0);
        let b = StatsEntry::new(2.0, 0.0, 3.0);
        assert_eq!(a.average(&b), StatsEntry::new(3.0, 10.0, 2.0));
        assert_eq!(a.average(&b), b.average(&a));
        assert_eq!(a.average(&a), a);
    }

    #[test]
    fn aggregate_sums_fields() {
        let a = StatsEntry::new(1.0, 30.0, 0.0);
        let b = StatsEntry::new(1.0, 45.0, 2.0);
        assert_eq!(a.aggregate(&b), StatsEntry::new(2.0, 75.0, 2.0));
    }
}
