//! Status icons for CLI output

/// Status icons for different component states
pub struct StatusIcon;

impl StatusIcon {
    /// Success icon (all pods ready)
    pub const SUCCESS: &'static str = "✓";

    /// Warning icon (partially ready)
    pub const WARNING: &'static str = "⚠";

    /// Error icon (nothing ready)
    pub const ERROR: &'static str = "✗";

    /// Active component marker
    pub const ACTIVE: &'static str = "*";

    /// Unknown icon (no deployment yet)
    pub const UNKNOWN: &'static str = "?";

    /// Get status icon based on ready/total pods
    pub fn get_readiness_icon(ready: u32, total: u32) -> &'static str {
        if total == 0 {
            Self::UNKNOWN
        } else if ready == total {
            Self::SUCCESS
        } else if ready > 0 {
            Self::WARNING
        } else {
            Self::ERROR
        }
    }

    /// Get state text based on ready/total pods
    pub fn get_state_text(ready: u32, total: u32) -> &'static str {
        if total == 0 {
            "NotPushed"
        } else if ready == total {
            "Running"
        } else if ready > 0 {
            "Degraded"
        } else {
            "Failed"
        }
    }
}
