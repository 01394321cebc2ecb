// src/target/mod.rs
// =============================================================================
// This module turns whatever the operator typed after -t into a URL we can
// actually request.
//
// Submodules:
// - validate: scheme defaulting, scheme check, rebuild, DNS check
// =============================================================================

mod validate;

pub use validate::validate_target;
