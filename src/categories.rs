//! Well-known consent category tokens.
//!
//! Categories are opaque strings compared by exact, case-sensitive match.
//! These constants name the buckets the hosted banner ships with; any other
//! string is accepted just the same.

/// Strictly functional storage (preferences, load balancing).
pub const FUNCTIONAL: &str = "functional";

/// Statistics and analytics tooling.
pub const ANALYTICS: &str = "analytics";

/// Advertising and cross-site tracking.
pub const MARKETING: &str = "marketing";

/// Resources that are gated but belong to no particular purpose.
pub const NEUTRAL: &str = "neutral";

/// Every well-known category, in banner order.
pub const ALL: [&str; 4] = [FUNCTIONAL, ANALYTICS, MARKETING, NEUTRAL];
