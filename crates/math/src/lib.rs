#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/nozawa-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod cross_section;
pub use cross_section::{QuantileBinner, value_weight_xsection};

mod linalg;
pub use linalg::{LinearFit, linear_fit};

mod stats;
pub use stats::{
    cumulative_path, cumulative_return, mean, mean_absolute, pearson, root_mean_square, std_dev,
};

mod error;
pub use error::MathError;
