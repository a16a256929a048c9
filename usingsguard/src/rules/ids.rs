//! Centralized Rule IDs for usingsguard.

/// Style: `using` directive outside the designated file
pub const RULE_ID_USINGS_PLACEMENT: &str = "USINGS001";
