//! Domain types for investors and their commitments.

mod asset_class;
mod currency;
mod investor;
mod investor_type;

pub use asset_class::AssetClass;
pub use currency::Currency;
pub use investor::{Commitment, Investor, InvestorId};
pub use investor_type::InvestorType;

/// Canonical form of an enumeration label: trimmed, lowercased, `_` and `-`
/// read as spaces, whitespace runs collapsed.
pub(crate) fn normalize_label(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(|c: char| c == '_' || c == '-', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
