//! Coin table loaded from TOML.
//!
//! ```toml
//! [[coins]]
//! ticker = "WRKZ"
//! family = "cryptonote"
//! decimals = 2
//! confirm_depth = 10
//! min_tip = "1"
//! max_tip = "100000000"
//! min_withdraw = "1000"
//! max_withdraw = "100000000"
//! node_fee = "0.1"
//! ```

use std::{collections::HashSet, fs, path::Path};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Chain family of a coin. Decides which fee details apply.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CoinFamily {
    Cryptonote,
    Doge,
    Xmr,
    Nano,
    Erc20,
    Trc20,
    Xch,
}

impl CoinFamily {
    /// Position of the family in the coin list.
    fn list_rank(self) -> u8 {
        match self {
            Self::Cryptonote => 0,
            Self::Doge => 1,
            Self::Xmr => 2,
            Self::Nano => 3,
            Self::Erc20 => 4,
            Self::Trc20 => 5,
            Self::Xch => 6,
        }
    }

    pub fn is_token(self) -> bool {
        matches!(self, Self::Erc20 | Self::Trc20)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TradeLimits {
    pub min_sell: Decimal,
    pub max_sell: Decimal,
}

fn enabled() -> bool {
    true
}

fn default_decimals() -> u32 {
    8
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CoinInfo {
    pub ticker: String,
    pub family: CoinFamily,
    #[serde(default = "enabled")]
    pub enabled: bool,
    #[serde(default = "default_decimals")]
    pub decimals: u32,
    pub confirm_depth: u32,
    #[serde(default = "enabled")]
    pub enable_tip: bool,
    #[serde(default = "enabled")]
    pub enable_deposit: bool,
    #[serde(default = "enabled")]
    pub enable_withdraw: bool,
    #[serde(default)]
    pub maintenance: bool,
    pub min_tip: Decimal,
    pub max_tip: Decimal,
    pub min_withdraw: Decimal,
    pub max_withdraw: Decimal,
    #[serde(default)]
    pub node_fee: Decimal,
    /// Withdraw fee is charged per byte by the node.
    #[serde(default)]
    pub fee_per_byte: bool,
    /// Token contract address or token id.
    pub contract: Option<String>,
    /// Token withdraw fee.
    pub withdraw_fee: Option<Decimal>,
    /// Token deposit fee.
    pub deposit_fee: Option<Decimal>,
    /// Present when the coin can be traded.
    pub trade: Option<TradeLimits>,
    pub note: Option<String>,
}

impl CoinInfo {
    pub fn is_tradeable(&self) -> bool {
        self.trade.is_some()
    }
}

/// Read-only lookup of coins and their limits.
pub trait CoinRegistry: Send + Sync {
    /// Enabled coin by ticker, case-insensitive.
    fn coin(&self, ticker: &str) -> Option<&CoinInfo>;

    /// Every enabled coin in list order.
    fn enabled_coins(&self) -> Vec<&CoinInfo>;
}

#[derive(Debug, Error)]
pub enum CoinTableError {
    #[error("failed to read coin table: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse coin table: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("coin {0} is listed more than once")]
    Duplicate(String),
}

#[derive(Deserialize)]
struct CoinFile {
    #[serde(default)]
    coins: Vec<CoinInfo>,
}

/// [`CoinRegistry`] backed by a TOML file.
#[derive(Clone, Debug, Default)]
pub struct CoinTable {
    coins: Vec<CoinInfo>,
}

impl CoinTable {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoinTableError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CoinTableError> {
        let file: CoinFile = toml::from_str(content)?;
        Self::from_coins(file.coins)
    }

    pub fn from_coins(coins: Vec<CoinInfo>) -> Result<Self, CoinTableError> {
        let mut seen = HashSet::new();
        let mut coins = coins
            .into_iter()
            .map(|mut coin| {
                coin.ticker = coin.ticker.trim().to_uppercase();
                coin
            })
            .collect::<Vec<_>>();

        for coin in &coins {
            if !seen.insert(coin.ticker.clone()) {
                return Err(CoinTableError::Duplicate(coin.ticker.clone()));
            }
        }

        coins.sort_by_key(|coin| coin.family.list_rank());
        Ok(Self { coins })
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}

impl CoinRegistry for CoinTable {
    fn coin(&self, ticker: &str) -> Option<&CoinInfo> {
        self.coins
            .iter()
            .find(|coin| coin.enabled && coin.ticker.eq_ignore_ascii_case(ticker.trim()))
    }

    fn enabled_coins(&self) -> Vec<&CoinInfo> {
        self.coins.iter().filter(|coin| coin.enabled).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
[[coins]]
ticker = "usdt"
family = "erc20"
decimals = 6
confirm_depth = 64
min_tip = "1"
max_tip = "10000"
min_withdraw = "10"
max_withdraw = "10000"
contract = "0xdac17f958d2ee523a2206206994597c13d831ec7"
withdraw_fee = "5"
note = "ERC-20 deposits take a while."

[[coins]]
ticker = "WRKZ"
family = "cryptonote"
decimals = 2
confirm_depth = 10
min_tip = "1"
max_tip = "100000000"
min_withdraw = "1000"
max_withdraw = "100000000"
node_fee = "0.1"

[coins.trade]
min_sell = "1000"
max_sell = "100000000"

[[coins]]
ticker = "DOGE"
family = "doge"
enabled = false
confirm_depth = 6
min_tip = "1"
max_tip = "1000"
min_withdraw = "5"
max_withdraw = "1000"
"#;

    #[test]
    fn loads_and_orders_by_family() {
        let table = CoinTable::from_toml_str(TABLE).expect("table parses");
        let tickers: Vec<_> = table
            .enabled_coins()
            .iter()
            .map(|coin| coin.ticker.as_str())
            .collect();

        assert_eq!(tickers, ["WRKZ", "USDT"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn lookup_is_case_insensitive_and_skips_disabled() {
        let table = CoinTable::from_toml_str(TABLE).expect("table parses");

        let wrkz = table.coin("wrkz").expect("WRKZ listed");
        assert!(wrkz.is_tradeable());
        assert!(wrkz.enable_tip);
        assert_eq!(wrkz.node_fee, Decimal::new(1, 1));

        assert!(table.coin("DOGE").is_none());
        assert!(table.coin("BTC").is_none());
    }

    #[test]
    fn duplicate_tickers_are_rejected() {
        let entry = r#"
[[coins]]
ticker = "TRTL"
family = "cryptonote"
confirm_depth = 10
min_tip = "1"
max_tip = "10"
min_withdraw = "1"
max_withdraw = "10"
"#;
        let doubled = format!("{entry}{}", entry.replace("TRTL", "trtl"));

        let err = CoinTable::from_toml_str(&doubled).expect_err("duplicate TRTL");
        assert!(matches!(err, CoinTableError::Duplicate(ticker) if ticker == "TRTL"));
    }
}
