use serde::{Deserialize, Serialize};
use std::fmt;

/// The chain families the send flow supports.
///
/// Everything downstream (decimal precision, address shape, gas units)
/// keys off the family, not the individual network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainFamily {
    Ethereum,
    Solana,
    Bitcoin,
}

impl ChainFamily {
    /// Parse a user- or config-supplied chain name. Accepts the full name
    /// or the native ticker, case-insensitive. Unknown names return None.
    pub fn parse(input: &str) -> Option<ChainFamily> {
        match input.trim().to_ascii_lowercase().as_str() {
            "eth" | "ethereum" => Some(ChainFamily::Ethereum),
            "sol" | "solana" => Some(ChainFamily::Solana),
            "btc" | "bitcoin" => Some(ChainFamily::Bitcoin),
            _ => None,
        }
    }

    /// Asset-side display precision for this family.
    pub fn decimals(&self) -> u32 {
        match self {
            ChainFamily::Ethereum | ChainFamily::Solana => 6,
            ChainFamily::Bitcoin => 8,
        }
    }

    /// Ticker of the family's native asset.
    pub fn native_symbol(&self) -> &'static str {
        match self {
            ChainFamily::Ethereum => "ETH",
            ChainFamily::Solana => "SOL",
            ChainFamily::Bitcoin => "BTC",
        }
    }

    /// Unit the gas/fee estimate is quoted in.
    pub fn gas_unit(&self) -> &'static str {
        match self {
            ChainFamily::Ethereum => "gwei",
            ChainFamily::Solana => "lamports",
            ChainFamily::Bitcoin => "sat/vB",
        }
    }

    /// True if `symbol` names this family's native asset (case-insensitive).
    pub fn matches_asset(&self, symbol: &str) -> bool {
        symbol.trim().eq_ignore_ascii_case(self.native_symbol())
    }
}

impl fmt::Display for ChainFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChainFamily::Ethereum => "Ethereum",
            ChainFamily::Solana => "Solana",
            ChainFamily::Bitcoin => "Bitcoin",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_names_and_tickers() {
        assert_eq!(ChainFamily::parse("Ethereum"), Some(ChainFamily::Ethereum));
        assert_eq!(ChainFamily::parse("eth"), Some(ChainFamily::Ethereum));
        assert_eq!(ChainFamily::parse(" SOL "), Some(ChainFamily::Solana));
        assert_eq!(ChainFamily::parse("bitcoin"), Some(ChainFamily::Bitcoin));
        assert_eq!(ChainFamily::parse("dogecoin"), None);
        assert_eq!(ChainFamily::parse(""), None);
    }

    #[test]
    fn decimals_per_family() {
        assert_eq!(ChainFamily::Ethereum.decimals(), 6);
        assert_eq!(ChainFamily::Solana.decimals(), 6);
        assert_eq!(ChainFamily::Bitcoin.decimals(), 8);
    }

    #[test]
    fn asset_match_is_case_insensitive() {
        assert!(ChainFamily::Ethereum.matches_asset("eth"));
        assert!(ChainFamily::Bitcoin.matches_asset(" BTC "));
        assert!(!ChainFamily::Solana.matches_asset("ETH"));
    }
}
