//! System-wide constants for the OpenPack settlement core.

/// Cards minted per purchased pack.
pub const CARDS_PER_PACK: usize = 5;

/// Best quality finish (diamond).
pub const QUALITY_DIAMOND: u8 = 1;

/// Gold finish.
pub const QUALITY_GOLD: u8 = 2;

/// Shadow finish.
pub const QUALITY_SHADOW: u8 = 3;

/// Plain finish (no premium treatment).
pub const QUALITY_PLAIN: u8 = 4;

/// Highest (numerically) quality still counted as shiny.
pub const SHINY_QUALITY_MAX: u8 = 3;

/// Guaranteed shiny legendaries per pack.
pub const MIN_SHINY_LEGENDARY_PER_PACK: usize = 1;

/// Guaranteed rare-or-better cards per pack.
pub const MIN_RARE_OR_BETTER_PER_PACK: usize = 2;

/// Default seller share of a settled payment, in percent.
pub const DEFAULT_SELLER_SHARE_PERCENT: u8 = 90;

/// Default referrer share of a settled payment, in percent.
pub const DEFAULT_REFERRER_SHARE_PERCENT: u8 = 10;

/// The referral split denominator: shares are expressed in percent.
pub const SPLIT_DENOMINATOR: u64 = 100;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenPack";
