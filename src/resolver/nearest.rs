use tracing::debug;

use super::{distance_km, ResolveError};
use crate::models::{GeoPoint, NearestResult, VendingMachine};

/// Find the machine closest to `query`.
///
/// Single left-to-right scan with strict less-than, so on equal distances the
/// earliest machine in `machines` wins.
pub fn find_nearest(
    query: GeoPoint,
    machines: &[VendingMachine],
) -> Result<NearestResult, ResolveError> {
    if machines.is_empty() {
        return Err(ResolveError::EmptyCandidateSet);
    }
    query.validate()?;

    let mut best: Option<(usize, f64)> = None;
    for (idx, machine) in machines.iter().enumerate() {
        let d = distance_km(query, machine.point())?;
        if best.map_or(true, |(_, min)| d < min) {
            best = Some((idx, d));
        }
    }

    let (idx, distance_km) = best.ok_or(ResolveError::EmptyCandidateSet)?;

    debug!(
        "Nearest to {} of {} machines: #{} at {:.3} km",
        query,
        machines.len(),
        idx,
        distance_km
    );

    Ok(NearestResult {
        machine: machines[idx].clone(),
        distance_km,
    })
}
