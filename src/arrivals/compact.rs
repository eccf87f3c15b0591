use std::collections::HashMap;

use super::Arrival;

/// Keeps only the soonest arrival for each route label, ordered by minutes.
///
/// On ties the arrival seen first wins.
pub fn soonest_per_route(arrivals: &[Arrival]) -> Vec<Arrival> {
    let mut slot_by_route: HashMap<&str, usize> = HashMap::new();
    let mut best: Vec<Arrival> = Vec::new();

    for arrival in arrivals {
        match slot_by_route.get(arrival.route.as_str()) {
            Some(&slot) => {
                if arrival.minutes < best[slot].minutes {
                    best[slot] = arrival.clone();
                }
            }
            None => {
                slot_by_route.insert(arrival.route.as_str(), best.len());
                best.push(arrival.clone());
            }
        }
    }

    best.sort_by_key(|a| a.minutes);
    best
}
