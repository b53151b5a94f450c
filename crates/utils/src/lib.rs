#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/nozawa-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod dates;
pub use dates::{
    add_months, date_column, date_to_days, date_values, day_values, days_to_date, month_end,
    parse_date, parse_date_column, parse_year_month_column, parse_year_month_end,
    restrict_to_window,
};

mod frame;
pub use frame::{has_column, move_columns_to_front, require_columns};

mod shift;
pub use shift::forward_values;

mod error;
pub use error::UtilsError;
