//! # nozawa
//!
//! Corporate bond decile portfolios sorted on yield spread, and the
//! comparison of their value-weighted returns with a published benchmark.
//!
//! This crate provides a unified interface to the nozawa crates.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Core type definitions
//! - `traits`: Source abstraction
//! - `math`: Quantile binning, regression and statistics
//! - `sources`: Raw file normalizers
//! - `model`: Merge, deciles, portfolio returns, split and analysis
//! - `utils`: Date and frame utilities
//! - `cli`: The `replicate` binary
//!
//! ## Example
//!
//! ```rust,ignore
//! use nozawa::model::prelude::*;
//!
//! let data = process_all_data(treasury_raw, bond_raw, &PipelineConfig::default())?;
//! let returns = DecilePortfolioBuilder::new().calculate_decile_returns(&data.merged)?;
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/nozawa-rs/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use nozawa_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use nozawa_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use nozawa_math as math;
#[cfg(feature = "sources")]
#[doc(inline)]
pub use nozawa_sources as sources;
#[cfg(feature = "model")]
#[doc(inline)]
pub use nozawa_model as model;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use nozawa_utils as utils;
