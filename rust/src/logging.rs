//! Logging macros for the network engine with verbosity level control.
//!
//! Provides zero-cost logging when disabled (verbosity=0).
//! - 0: SILENT (only errors)
//! - 1: CHANGES (arc assignments, step claims)
//! - 2: CHECKS (per-step date computation, dummy-arc checks)
//! - 3: DEBUG (full pipeline internals)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
///
/// Used for: arc assignments, step claims, dummy-arc insertion.
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
///
/// Used for: per-step date computation, convergence lookups.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// Used for: level construction, full pipeline internals.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(VERBOSITY_SILENT < VERBOSITY_CHANGES);
        assert!(VERBOSITY_CHANGES < VERBOSITY_CHECKS);
        assert!(VERBOSITY_CHECKS < VERBOSITY_DEBUG);
    }

    #[test]
    fn test_macros_accept_pipeline_format_args() {
        // The format strings the pipeline stages actually use
        let verbosity = VERBOSITY_SILENT;
        log_changes!(verbosity, "arc {}: {} -> {} ({})", "A", 1, 2, 4.0);
        log_checks!(verbosity, "step {}: ASAP date {}", 2, 4.0);
        log_debug!(verbosity, "level {}: {} expands to {:?}", 0, "A", ["C", "E"]);
    }
}
