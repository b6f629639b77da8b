//! Lostness Calculator.
//!
//! Lostness combines two efficiency terms over a stretch of play, with
//! R = minimum required steps, S = total steps visited, N = unique steps:
//!
//! ```text
//! lostness = sqrt((N/S - 1)^2 + (R/N - 1)^2)
//! ```
//!
//! A player who walks the shortest route without revisits scores 0.

use serde::{Deserialize, Serialize};
use storyline_core::tracing::metrics;

use crate::graph::{shortest_path, StoryGraph};

/// Lostness of one measured stretch together with the R it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveLostness {
    /// Shortest-path length capped at the unique steps observed.
    /// `None` when no path exists.
    pub min_steps: Option<u32>,
    pub lostness: Option<f64>,
}

fn formula(min_steps: f64, total_steps: f64, unique_steps: f64) -> f64 {
    let first_term = unique_steps / total_steps - 1.0;
    let second_term = min_steps / unique_steps - 1.0;
    (first_term * first_term + second_term * second_term).sqrt()
}

/// Lostness for R = `min_steps`, S = `total_steps`, N = `unique_steps`.
///
/// `None` when S is zero or R is unknown. N = 0 with S > 0 is not guarded:
/// the second term divides by zero and the non-finite result (infinity,
/// or NaN when R is also 0) is returned as-is.
pub fn lostness_value(min_steps: Option<u32>, total_steps: u32, unique_steps: u32) -> Option<f64> {
    let min_steps = min_steps?;
    if total_steps == 0 {
        return None;
    }
    Some(formula(
        f64::from(min_steps),
        f64::from(total_steps),
        f64::from(unique_steps),
    ))
}

/// Same formula over aggregated sums, which may exceed `u32`.
pub fn lostness_from_totals(min_steps: u64, total_steps: u64, unique_steps: u64) -> Option<f64> {
    if total_steps == 0 {
        return None;
    }
    Some(formula(
        min_steps as f64,
        total_steps as f64,
        unique_steps as f64,
    ))
}

/// Lostness between two nodes for an observed S and N.
///
/// R is the shortest-path length from `start` to `end`, capped at
/// `unique_steps` so a path longer than what the player actually covered
/// (edges changed since authoring) cannot inflate the score. An unset
/// endpoint or an unreachable `end` leaves both R and lostness undefined.
pub fn lostness_for_objective(
    graph: &StoryGraph,
    start: Option<&str>,
    end: Option<&str>,
    total_steps: u32,
    unique_steps: u32,
) -> ObjectiveLostness {
    let min_steps = match (start, end) {
        (Some(start), Some(end)) => {
            shortest_path(graph, start, end).map(|len| len.min(unique_steps))
        }
        _ => None,
    };
    let lostness = lostness_value(min_steps, total_steps, unique_steps);
    tracing::debug!(
        start,
        end,
        min_steps,
        total_steps,
        unique_steps,
        { metrics::LOSTNESS } = lostness,
        "Calculating lostness"
    );
    ObjectiveLostness {
        min_steps,
        lostness,
    }
}

/// Map a lostness score onto `[0, 1]` for progress-bar style display.
///
/// Undefined lostness reads as 0, non-finite lostness as 1.
pub fn normalized(lostness: Option<f64>, ceiling: f64) -> f64 {
    match lostness {
        None => 0.0,
        Some(l) if !l.is_finite() => 1.0,
        Some(l) => (l / ceiling).clamp(0.0, 1.0),
    }
}
