//! core
//!
//! Core domain types and routing for Stagehand.
//!
//! # Modules
//!
//! - [`target`] - Platform/arch identification and binary naming
//! - [`paths`] - Centralized path routing for Stagehand storage
//! - [`config`] - Release source configuration and loading
//!
//! # Design Principles
//!
//! - One naming function serves both release assets and installed files
//! - All storage locations are computed in one place
//! - Configuration precedence is explicit and documented

pub mod config;
pub mod paths;
pub mod target;

/// Logical names of the delegate binaries this package manages.
pub const DELEGATES: &[&str] = &["commit_message", "pull_requests"];

/// Expand an explicit delegate list, defaulting to every known delegate.
pub fn resolve_delegates(names: &[String]) -> Vec<String> {
    if names.is_empty() {
        DELEGATES.iter().map(|s| s.to_string()).collect()
    } else {
        names.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_expands_to_all_delegates() {
        let resolved = resolve_delegates(&[]);
        assert_eq!(resolved, vec!["commit_message", "pull_requests"]);
    }

    #[test]
    fn explicit_list_passes_through() {
        let names = vec!["commit_message".to_string()];
        assert_eq!(resolve_delegates(&names), names);
    }

    #[test]
    fn unknown_names_are_not_filtered() {
        // Resolution happens downstream; the list is vocabulary, not a gate.
        let names = vec!["future_tool".to_string()];
        assert_eq!(resolve_delegates(&names), names);
    }
}
