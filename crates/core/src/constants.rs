/// Explicit projection horizon for the DCF variants.
pub const PROJECTION_PERIODS: usize = 5;

/// Default P/E exit multiple applied to final-period net income.
pub const DEFAULT_EXIT_PE: f64 = 20.0;

/// Fallback statutory tax rate when the effective rate cannot be derived.
pub const FALLBACK_TAX_RATE: f64 = 0.21;

/// Upper clamp on the derived effective tax rate.
pub const MAX_EFFECTIVE_TAX_RATE: f64 = 0.50;

/// Symmetric clamp on the derived share-count growth rate.
pub const SHARES_GROWTH_CLAMP: f64 = 0.15;

/// Beta used when neither the profile nor the quote supplies one.
pub const DEFAULT_BETA: f64 = 1.0;

/// Fallback CAPM inputs when live market rates are unavailable.
pub const FALLBACK_RISK_FREE_RATE: f64 = 0.043;
pub const FALLBACK_EQUITY_RISK_PREMIUM: f64 = 0.055;

/// Allowed range for the two-stage model's high-growth phase length.
pub const MIN_STAGE_ONE_YEARS: u32 = 1;
pub const MAX_STAGE_ONE_YEARS: u32 = 15;
pub const DEFAULT_STAGE_ONE_YEARS: u32 = 5;

/// Dividend y/y growth observations outside this band are discarded as
/// outliers before averaging.
pub const DPS_GROWTH_OUTLIER_LOW: f64 = -0.50;
pub const DPS_GROWTH_OUTLIER_HIGH: f64 = 1.00;

/// GGM requires g < Re; the derived growth rate is kept at least this far
/// below the cost of equity.
pub const GGM_GROWTH_MARGIN: f64 = 0.005;

/// Clamp on the two-stage high-growth rate.
pub const STAGE_ONE_GROWTH_MIN: f64 = -0.10;
pub const STAGE_ONE_GROWTH_MAX: f64 = 0.25;

/// Terminal growth defaults to ~3%, always at least this far below Re.
pub const TERMINAL_GROWTH_CEILING: f64 = 0.03;
pub const TERMINAL_GROWTH_RE_MARGIN: f64 = 0.01;
