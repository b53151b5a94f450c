//! Canonical column names.
//!
//! Raw treasury-matched files use upper-case `DATE`/`CUSIP`; the bond-returns
//! side uses lower case. After the merge only the lower-case names remain.

/// Observation date of the bond-returns source (and of every derived table).
pub const DATE: &str = "date";
/// Bond identifier of the bond-returns source.
pub const CUSIP: &str = "cusip";
/// Observation date of the treasury-matched source.
pub const TREASURY_DATE: &str = "DATE";
/// Bond identifier of the treasury-matched source.
pub const TREASURY_CUSIP: &str = "CUSIP";
/// Composite `<cusip>_<YYYYMMDD>` join key.
pub const CUSIP_DATE: &str = "cusip_date";

/// Calendar year of the observation.
pub const YEAR: &str = "year";
/// Quoted bond yield.
pub const YIELD: &str = "yield";
/// Trade-weighted yield point.
pub const YIELD_POINT: &str = "t_yld_pt";
/// Month-end clean price.
pub const PRICE: &str = "price_eom";
/// Time to maturity in years (bond-returns side).
pub const TIME_TO_MATURITY: &str = "tmt";
/// Amount outstanding, the value weight.
pub const AMOUNT_OUTSTANDING: &str = "amount_outstanding";
/// Month-end return realized over the period ending at `date`.
pub const RETURN: &str = "ret_eom";
/// Return realized over the period after `date`.
pub const FORWARD_RETURN: &str = "ret_eom_fwd";

/// Maturity-matched treasury return.
pub const TREASURY_RETURN: &str = "tr_return";
/// Maturity-matched treasury yield to maturity.
pub const TREASURY_YTM: &str = "tr_ytm_match";
/// Time to maturity in years (treasury side).
pub const TREASURY_TAU: &str = "tau";

/// Yield minus maturity-matched treasury yield.
pub const YIELD_SPREAD: &str = "yield_spread";
/// Maturity difference between the two sources.
pub const TTM_DIFF: &str = "TTM_diff";
/// Yield-spread decile label.
pub const DECILE: &str = "decile";
/// Value weight within a (date, decile) group.
pub const WEIGHT: &str = "weight";
/// Weighted forward return of a (date, decile) portfolio.
pub const WEIGHTED_RETURN: &str = "weighted_ret";

/// Year-month column of the benchmark factor file.
pub const BENCHMARK_YYYYMM: &str = "yyyymm";
/// Prefix of the benchmark test-asset columns.
pub const BENCHMARK_PREFIX: &str = "US_bonds_";
