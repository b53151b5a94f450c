#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/nozawa-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod key;

mod treasury;
pub use treasury::{TreasuryConfig, TreasurySource};

mod bond_returns;
pub use bond_returns::{BondReturnsConfig, BondReturnsSource};

mod benchmark;
pub use benchmark::{BenchmarkConfig, BenchmarkSeries, process_benchmark_factors};
