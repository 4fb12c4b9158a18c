//! The denomination catalogue.
//!
//! Coin kinds are declared from the highest to the lowest value. The change
//! search relies on that ordering, so `Coin::DESCENDING` must stay in sync
//! with the enum declaration.

use std::fmt;
use std::str::FromStr;

/// One kind of euro coin.
///
/// The derived `Ord` follows declaration order, so `Coin::TwoEuro` sorts
/// first. Ledgers keyed by `Coin` therefore iterate highest value first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Coin {
    TwoEuro,
    OneEuro,
    FiftyCent,
    TwentyCent,
    TenCent,
    FiveCent,
    TwoCent,
    OneCent,
}

impl Coin {
    /// Every coin kind, highest value first.
    pub const DESCENDING: [Coin; 8] = [
        Coin::TwoEuro,
        Coin::OneEuro,
        Coin::FiftyCent,
        Coin::TwentyCent,
        Coin::TenCent,
        Coin::FiveCent,
        Coin::TwoCent,
        Coin::OneCent,
    ];

    /// Value of one coin in minor units (cents).
    pub const fn minor_value(self) -> u64 {
        match self {
            Coin::TwoEuro => 200,
            Coin::OneEuro => 100,
            Coin::FiftyCent => 50,
            Coin::TwentyCent => 20,
            Coin::TenCent => 10,
            Coin::FiveCent => 5,
            Coin::TwoCent => 2,
            Coin::OneCent => 1,
        }
    }

    /// Short label used in CSV headers and float files.
    pub const fn label(self) -> &'static str {
        match self {
            Coin::TwoEuro => "2e",
            Coin::OneEuro => "1e",
            Coin::FiftyCent => "50c",
            Coin::TwentyCent => "20c",
            Coin::TenCent => "10c",
            Coin::FiveCent => "5c",
            Coin::TwoCent => "2c",
            Coin::OneCent => "1c",
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Coin {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        Coin::DESCENDING
            .into_iter()
            .find(|coin| coin.label() == label)
            .ok_or_else(|| s.trim().to_string())
    }
}
