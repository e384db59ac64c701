//! Forward pass: earliest-occurrence (ASAP) dates for every step.

use rustc_hash::FxHashMap;

use crate::log_checks;

use super::assign::ArcPlan;
use super::EngineWarning;

/// Compute the ASAP date of each step from the completed arc set (real and
/// fictional arcs alike).
///
/// Step 1 starts at 0. Steps are processed in increasing numeric order:
/// `date(s)` = max over incoming arcs of `date(source) + duration`. A step
/// with no incoming arc keeps date 0 and yields a [`EngineWarning::DegenerateStep`] -
/// the computation continues, since the caller may still want the partial
/// network for display.
///
/// An arc whose source step is numbered higher than its target is flagged
/// as a [`EngineWarning::BackwardArc`]: its source date is still 0 when the
/// target is processed, so the target's date only reflects the remaining
/// incoming arcs.
pub fn starting_dates(
    arcs: &[ArcPlan],
    step_count: u32,
    verbosity: u8,
) -> (Vec<f64>, Vec<EngineWarning>) {
    let mut incoming: FxHashMap<u32, Vec<&ArcPlan>> = FxHashMap::default();
    for arc in arcs {
        incoming.entry(arc.target).or_default().push(arc);
    }

    let mut dates = vec![0.0; step_count as usize];
    let mut warnings = Vec::new();

    for arc in arcs {
        if arc.source > arc.target {
            log_checks!(
                verbosity,
                "arc {} runs backward: {} -> {}",
                arc.id,
                arc.source,
                arc.target
            );
            warnings.push(EngineWarning::BackwardArc {
                id: arc.id.clone(),
                source: arc.source,
                target: arc.target,
            });
        }
    }

    for step in 2..=step_count {
        match incoming.get(&step) {
            Some(arriving) if !arriving.is_empty() => {
                let date = arriving
                    .iter()
                    .map(|arc| dates[(arc.source - 1) as usize] + arc.duration)
                    .fold(0.0_f64, f64::max);
                log_checks!(verbosity, "step {}: ASAP date {}", step, date);
                dates[(step - 1) as usize] = date;
            }
            _ => {
                log_checks!(verbosity, "step {}: no incoming arc, date defaults to 0", step);
                warnings.push(EngineWarning::DegenerateStep { step });
            }
        }
    }

    (dates, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(id: &str, source: u32, target: u32, duration: f64) -> ArcPlan {
        ArcPlan {
            id: id.to_string(),
            source,
            target,
            duration,
            fictional: false,
        }
    }

    #[test]
    fn test_chain_accumulates() {
        let arcs = vec![arc("A", 1, 2, 4.0), arc("B", 2, 3, 2.0)];
        let (dates, warnings) = starting_dates(&arcs, 3, 0);
        assert_eq!(dates, vec![0.0, 4.0, 6.0]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_max_over_incoming_arcs() {
        let arcs = vec![arc("A", 1, 2, 4.0), arc("B", 1, 3, 2.0), arc("C", 2, 3, 5.0)];
        let (dates, _) = starting_dates(&arcs, 3, 0);
        // 4 + 5 beats 0 + 2
        assert_eq!(dates[2], 9.0);
    }

    #[test]
    fn test_dummy_arcs_propagate_without_inflating() {
        let mut dummy = arc("A\"", 2, 3, 0.0);
        dummy.fictional = true;
        let arcs = vec![arc("A", 1, 2, 4.0), arc("B", 1, 3, 2.0), dummy];
        let (dates, _) = starting_dates(&arcs, 3, 0);
        // Step 3 waits for A (via the dummy) even though B only takes 2
        assert_eq!(dates[2], 4.0);
    }

    #[test]
    fn test_degenerate_step_warns_and_defaults_to_zero() {
        let arcs = vec![arc("A", 1, 2, 4.0), arc("B", 3, 4, 1.0)];
        let (dates, warnings) = starting_dates(&arcs, 4, 0);
        assert_eq!(dates[2], 0.0);
        assert_eq!(warnings, vec![EngineWarning::DegenerateStep { step: 3 }]);
        // The pass keeps going past the degenerate step
        assert_eq!(dates[3], 1.0);
    }

    #[test]
    fn test_backward_arc_is_flagged_and_ignored_by_earlier_step() {
        // C's source (step 3) is processed after its target (step 2), so
        // only A contributes to step 2's date
        let arcs = vec![arc("A", 1, 2, 1.0), arc("B", 1, 3, 5.0), arc("C", 3, 2, 1.0)];
        let (dates, warnings) = starting_dates(&arcs, 3, 0);
        assert_eq!(dates[1], 1.0);
        assert_eq!(
            warnings,
            vec![EngineWarning::BackwardArc {
                id: "C".to_string(),
                source: 3,
                target: 2,
            }]
        );
    }

    #[test]
    fn test_empty_network() {
        let (dates, warnings) = starting_dates(&[], 0, 0);
        assert!(dates.is_empty());
        assert!(warnings.is_empty());
    }
}
