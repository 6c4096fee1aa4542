//! Constants used throughout the application
//!
//! This module centralizes status labels, display colors and other constant
//! values so the calculator, the dashboard and the CLI agree on them.

use serde::Serialize;

/// Sentinel shown wherever a value cannot be computed
pub const NOT_AVAILABLE: &str = "N/A";

/// Rentals due within this many days (inclusive) are flagged as due soon
pub const DUE_SOON_DAYS: i64 = 7;

/// Days counted as one month when breaking durations down
pub const DAYS_PER_MONTH: i64 = 30;

pub const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

// Rental status labels
pub const LABEL_OVERDUE: &str = "Overdue";
pub const LABEL_DUE_SOON: &str = "Due Soon";
pub const LABEL_ON_SCHEDULE: &str = "On Schedule";
pub const LABEL_RETURNED: &str = "Returned";

// Service status labels
pub const LABEL_NOT_STARTED: &str = "Not Started";
pub const LABEL_IN_PROGRESS: &str = "In Progress";
pub const LABEL_COMPLETED: &str = "Completed";

// Status text
pub const TEXT_INVALID_DATE: &str = "invalid date";
pub const TEXT_DUE_TODAY: &str = "due today";
pub const TEXT_ENDS_TODAY: &str = "ends today";
pub const TEXT_SERVICE_ENDED: &str = "service ended";

/// Display colors attached to a status: background class, text class, border hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

pub const PALETTE_GRAY: Palette = Palette {
    background: "bg-gray-100 border-gray-300",
    text: "text-gray-700",
    border: "#6b7280",
};

/// Used for rentals whose expected return date cannot be parsed
pub const PALETTE_GRAY_PLAIN: Palette = Palette {
    background: "bg-gray-100",
    text: "text-gray-700",
    border: "#6b7280",
};

pub const PALETTE_RED: Palette = Palette {
    background: "bg-red-100 border-red-300",
    text: "text-red-700",
    border: "#ef4444",
};

pub const PALETTE_AMBER: Palette = Palette {
    background: "bg-yellow-100 border-yellow-300",
    text: "text-yellow-700",
    border: "#f59e0b",
};

pub const PALETTE_YELLOW: Palette = Palette {
    background: "bg-yellow-100 border-yellow-300",
    text: "text-yellow-700",
    border: "#eab308",
};

pub const PALETTE_GREEN: Palette = Palette {
    background: "bg-green-100 border-green-300",
    text: "text-green-700",
    border: "#22c55e",
};

pub const PALETTE_BLUE: Palette = Palette {
    background: "bg-blue-100 border-blue-300",
    text: "text-blue-700",
    border: "#3b82f6",
};

// CLI messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const LOG_FILE_NAME: &str = "requisitor.log";
pub const CONFIG_FILE_NAME: &str = "requisitor.toml";
pub const APP_DIR_NAME: &str = "requisitor";

/// Upper bound accepted for the configurable due-soon window
pub const DUE_SOON_MAX_DAYS: i64 = 90;
