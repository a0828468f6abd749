//! Common settings in hmmtag.

/// Log-probability substituted for a missing lexical or tag statistic.
pub const PCONSTANT: f64 = -20.0;

/// Log-probability substituted for a missing phrase-tag transition, i.e., `ln(0.01)`.
pub const SF: f64 = -4.605_170_185_988_091;

/// The pseudo tag marking an eojeol boundary in the tag-transition table.
pub const BOUNDARY_TAG: &str = "bnk";

/// Default ceiling on the number of token positions per sentence,
/// including the synthetic end position.
pub const DEFAULT_MAX_POSITIONS: usize = 1 << 16;

/// Default ceiling on the number of lattice nodes per sentence,
/// including the synthetic end node.
pub const DEFAULT_MAX_NODES: usize = 1 << 20;
