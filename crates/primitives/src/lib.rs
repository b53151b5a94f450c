#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/nozawa-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod bond;
pub use bond::{BondDateKey, Cusip};

mod decile;
pub use decile::{DecileError, DecileLabel};

mod metrics;
pub use metrics::{AnalysisRecord, SeriesSummary};

pub mod columns;

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
