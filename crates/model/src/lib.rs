#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/nozawa-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
pub use config::{AnalysisConfig, MissingReturnPolicy, PortfolioConfig};

mod error;
pub use error::ModelError;

mod merge;
pub use merge::{TREASURY_SUFFIX, merge_bond_data};

mod portfolio;
pub use portfolio::{DecilePortfolioBuilder, DecileReturns, process_merged_bond_data};

mod split;
pub use split::{SplitSamples, align_to_start, split_decile_returns};

mod analysis;
pub use analysis::{DecileAnalyzer, analysis_frame};

mod summary;
pub use summary::{average_yields, cumulative_return_paths, summary_frame, summary_statistics};

mod pipeline;
pub use pipeline::{PipelineConfig, ProcessedBondData, process_all_data};

/// Re-export commonly used types.
pub mod prelude {
    pub use nozawa_traits::BondSource;

    pub use super::{
        DecileAnalyzer, DecilePortfolioBuilder, ModelError, PipelineConfig, PortfolioConfig,
        process_all_data, split_decile_returns,
    };
}
