//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All installer and manager output goes through this module so quiet and
//! debug modes behave consistently. The launcher shims deliberately bypass
//! it: their job is to leave the delegate's streams untouched.

pub mod output;
