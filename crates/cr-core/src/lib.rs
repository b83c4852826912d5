//! civic-reporter/crates/cr-core/src/lib.rs
//!
//! The rule pipeline that turns an image label and optional location into a
//! structured civic issue report, plus the port definitions the boundary
//! layer plugs into.

pub mod classifier;
pub mod clock;
pub mod complaint;
pub mod error;
pub mod models;
pub mod priority;
pub mod report;
pub mod traits;

// Re-exporting for easier access in other crates
pub use classifier::classify;
pub use clock::{FixedClock, SystemClock};
pub use complaint::{complaint_for, department_for, feedback_for, ComplaintDetails};
pub use error::*;
pub use models::*;
pub use priority::{priority_of, severity_of};
pub use report::{generate_report_id, ReportPipeline};
pub use traits::*;
