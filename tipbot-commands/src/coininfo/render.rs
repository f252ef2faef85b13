use std::fmt::Write as _;

use rust_decimal::Decimal;
use tabled::{
    Table, Tabled,
    settings::{Modify, Padding, Style, object::Segment},
};

use tipbot_core::{CoinFamily, CoinInfo};
use tipbot_database::trades::TradeStat;
use tipbot_utils::format::{format_amount, format_thousands};

const MAINTENANCE_MARK: &str = "***";

#[derive(Tabled)]
pub struct CoinListRow {
    #[tabled(rename = "TICKER")]
    pub ticker: String,
    #[tabled(rename = "Height")]
    pub height: String,
    #[tabled(rename = "Tip")]
    pub tip: String,
    #[tabled(rename = "Wdraw")]
    pub withdraw: String,
    #[tabled(rename = "Depth")]
    pub depth: u32,
}

fn on_off(enabled: bool) -> String {
    if enabled { "ON" } else { "OFF" }.to_owned()
}

impl CoinListRow {
    pub fn new(coin: &CoinInfo, height: u64) -> Self {
        if coin.maintenance {
            return Self {
                ticker: coin.ticker.clone(),
                height: MAINTENANCE_MARK.to_owned(),
                tip: MAINTENANCE_MARK.to_owned(),
                withdraw: MAINTENANCE_MARK.to_owned(),
                depth: coin.confirm_depth,
            };
        }

        Self {
            ticker: coin.ticker.clone(),
            height: format_thousands(height),
            tip: on_off(coin.enable_tip),
            withdraw: on_off(coin.enable_withdraw),
            depth: coin.confirm_depth,
        }
    }
}

/// The full coin list message.
pub fn coin_list_message(rows: Vec<CoinListRow>) -> String {
    let table = Table::new(rows)
        .with(Style::ascii())
        .with(Modify::new(Segment::all()).with(Padding::zero()))
        .to_string();

    format!("**[ TIPBOT COIN LIST ]**\n```{table}```")
}

/// Trade details shown under a coin, depending on where it was asked.
#[derive(Clone, Debug, PartialEq)]
pub enum TradeDisplay {
    Hidden,
    Limits,
    LimitsWithVolume(TradeStat),
}

fn amount(coin: &CoinInfo, value: Decimal) -> String {
    format!("{} {}", format_amount(value, coin.decimals), coin.ticker)
}

/// The `coininfo <coin>` reply.
pub fn coin_detail_message(coin: &CoinInfo, height: Option<u64>, trade: &TradeDisplay) -> String {
    let ticker = &coin.ticker;
    let mut out = format!("**[ COIN INFO {ticker} ]**```");

    if let Some(height) = height {
        let _ = writeln!(out, "Height: {}", format_thousands(height));
    }
    let _ = writeln!(out, "Confirmation: {} Blocks", coin.confirm_depth);
    let _ = writeln!(
        out,
        "Tipping / Depositing / Withdraw:\n   {} / {} / {}",
        on_off(coin.enable_tip),
        on_off(coin.enable_deposit),
        on_off(coin.enable_withdraw)
    );
    let _ = writeln!(
        out,
        "Tip Min/Max:\n   {} / {}",
        format_amount(coin.min_tip, coin.decimals),
        amount(coin, coin.max_tip)
    );
    let _ = writeln!(
        out,
        "Withdraw Min/Max:\n   {} / {}",
        format_amount(coin.min_withdraw, coin.decimals),
        amount(coin, coin.max_withdraw)
    );

    push_fee_section(&mut out, coin);

    if let (Some(limits), TradeDisplay::Limits | TradeDisplay::LimitsWithVolume(_)) =
        (coin.trade.as_ref(), trade)
    {
        let _ = writeln!(
            out,
            "Trade Min/Max: {} / {}",
            amount(coin, limits.min_sell),
            amount(coin, limits.max_sell)
        );
        if let TradeDisplay::LimitsWithVolume(stat) = trade {
            let _ = writeln!(out, "Trade volume:\n   24h: {}", amount(coin, stat.trade_24h));
            let _ = writeln!(out, "   7d: {}", amount(coin, stat.trade_7d));
            let _ = writeln!(out, "   30d: {}", amount(coin, stat.trade_30d));
        }
    }

    if coin.family.is_token()
        && let Some(note) = coin.note.as_deref().filter(|note| !note.trim().is_empty())
    {
        let _ = writeln!(out, "\nNote:\n   {note}");
    }

    out.push_str("```");
    out
}

fn push_fee_section(out: &mut String, coin: &CoinInfo) {
    match coin.family {
        family
            if coin.fee_per_byte
                || matches!(family, CoinFamily::Doge | CoinFamily::Xch | CoinFamily::Xmr) =>
        {
            let _ = writeln!(out, "Withdraw Tx Node Fee: {}", amount(coin, coin.node_fee));
        }
        CoinFamily::Erc20 | CoinFamily::Trc20 => {
            match coin.contract.as_deref() {
                Some(contract) if contract.len() == 42 => {
                    let _ = writeln!(out, "Contract:\n   {contract}");
                }
                Some(contract) if coin.family == CoinFamily::Trc20 && contract.len() > 4 => {
                    let _ = writeln!(out, "Contract/Token ID:\n   {contract}");
                }
                _ => {}
            }
            let _ = writeln!(
                out,
                "Withdraw Tx Fee: {}",
                amount(coin, coin.withdraw_fee.unwrap_or_default())
            );
            if let Some(fee) = coin.deposit_fee.filter(|fee| *fee > Decimal::ZERO) {
                let _ = writeln!(out, "Deposit Tx Fee: {}", amount(coin, fee));
            }
        }
        CoinFamily::Nano => out.push_str("Withdraw Tx Fee: Zero\n"),
        _ => {
            let _ = writeln!(out, "Withdraw Tx Fee: {}", amount(coin, coin.node_fee));
        }
    }
}

#[cfg(test)]
mod tests {
    use tipbot_core::coins::TradeLimits;

    use super::*;

    fn coin(ticker: &str, family: CoinFamily) -> CoinInfo {
        CoinInfo {
            ticker: ticker.to_owned(),
            family,
            enabled: true,
            decimals: 2,
            confirm_depth: 10,
            enable_tip: true,
            enable_deposit: true,
            enable_withdraw: false,
            maintenance: false,
            min_tip: Decimal::ONE,
            max_tip: Decimal::new(1_000_000, 0),
            min_withdraw: Decimal::new(1_000, 0),
            max_withdraw: Decimal::new(5_000_000, 0),
            node_fee: Decimal::new(25, 2),
            fee_per_byte: false,
            contract: None,
            withdraw_fee: None,
            deposit_fee: None,
            trade: None,
            note: None,
        }
    }

    #[test]
    fn list_marks_maintenance_rows() {
        let mut broken = coin("TRTL", CoinFamily::Cryptonote);
        broken.maintenance = true;

        let message = coin_list_message(vec![
            CoinListRow::new(&coin("WRKZ", CoinFamily::Cryptonote), 1_234_567),
            CoinListRow::new(&broken, 99),
        ]);

        assert!(message.starts_with("**[ TIPBOT COIN LIST ]**\n```"));
        assert!(message.contains("TICKER"));
        assert!(message.contains("1,234,567"));
        assert!(message.contains("OFF"));

        let trtl_line = message
            .lines()
            .find(|line| line.contains("TRTL"))
            .expect("TRTL row");
        assert_eq!(trtl_line.matches(MAINTENANCE_MARK).count(), 3);
        assert!(!message.contains("99"));
    }

    #[test]
    fn cryptonote_detail_uses_node_fee() {
        let message = coin_detail_message(
            &coin("WRKZ", CoinFamily::Cryptonote),
            Some(1_000),
            &TradeDisplay::Hidden,
        );

        assert!(message.starts_with("**[ COIN INFO WRKZ ]**```Height: 1,000\n"));
        assert!(message.contains("Confirmation: 10 Blocks\n"));
        assert!(message.contains("Tipping / Depositing / Withdraw:\n   ON / ON / OFF\n"));
        assert!(message.contains("Tip Min/Max:\n   1 / 1,000,000 WRKZ\n"));
        assert!(message.contains("Withdraw Tx Fee: 0.25 WRKZ\n"));
        assert!(message.ends_with("```"));
    }

    #[test]
    fn doge_family_and_fee_per_byte_show_node_fee() {
        let doge = coin_detail_message(&coin("DOGE", CoinFamily::Doge), None, &TradeDisplay::Hidden);
        assert!(doge.contains("Withdraw Tx Node Fee: 0.25 DOGE"));
        assert!(!doge.contains("Height:"));

        let mut btc_like = coin("XYZ", CoinFamily::Cryptonote);
        btc_like.fee_per_byte = true;
        let message = coin_detail_message(&btc_like, None, &TradeDisplay::Hidden);
        assert!(message.contains("Withdraw Tx Node Fee:"));
    }

    #[test]
    fn nano_withdraw_is_free() {
        let message = coin_detail_message(&coin("BAN", CoinFamily::Nano), None, &TradeDisplay::Hidden);
        assert!(message.contains("Withdraw Tx Fee: Zero\n"));
    }

    #[test]
    fn token_detail_shows_contract_fees_and_note() {
        let mut usdt = coin("USDT", CoinFamily::Erc20);
        usdt.contract = Some("0xdac17f958d2ee523a2206206994597c13d831ec7".to_owned());
        usdt.withdraw_fee = Some(Decimal::new(5, 0));
        usdt.deposit_fee = Some(Decimal::new(15, 1));
        usdt.note = Some("Deposits need 64 confirmations.".to_owned());

        let message = coin_detail_message(&usdt, None, &TradeDisplay::Hidden);
        assert!(message.contains("Contract:\n   0xdac17f958d2ee523a2206206994597c13d831ec7\n"));
        assert!(message.contains("Withdraw Tx Fee: 5 USDT\n"));
        assert!(message.contains("Deposit Tx Fee: 1.5 USDT\n"));
        assert!(message.contains("\nNote:\n   Deposits need 64 confirmations.\n"));

        let mut trc = coin("BTT", CoinFamily::Trc20);
        trc.contract = Some("1002000".to_owned());
        let message = coin_detail_message(&trc, None, &TradeDisplay::Hidden);
        assert!(message.contains("Contract/Token ID:\n   1002000\n"));
        assert!(message.contains("Withdraw Tx Fee: 0 BTT\n"));
        assert!(!message.contains("Deposit Tx Fee"));
    }

    #[test]
    fn trade_limits_and_volume() {
        let mut wrkz = coin("WRKZ", CoinFamily::Cryptonote);
        wrkz.trade = Some(TradeLimits {
            min_sell: Decimal::new(1_000, 0),
            max_sell: Decimal::new(10_000_000, 0),
        });

        let hidden = coin_detail_message(&wrkz, None, &TradeDisplay::Hidden);
        assert!(!hidden.contains("Trade Min/Max"));

        let limits = coin_detail_message(&wrkz, None, &TradeDisplay::Limits);
        assert!(limits.contains("Trade Min/Max: 1,000 WRKZ / 10,000,000 WRKZ\n"));
        assert!(!limits.contains("Trade volume"));

        let stat = TradeStat {
            trade_24h: Decimal::new(12_345, 0),
            trade_7d: Decimal::new(50_000, 0),
            trade_30d: Decimal::new(200_000, 0),
        };
        let volume = coin_detail_message(&wrkz, None, &TradeDisplay::LimitsWithVolume(stat));
        assert!(volume.contains("Trade volume:\n   24h: 12,345 WRKZ\n   7d: 50,000 WRKZ\n   30d: 200,000 WRKZ\n"));
    }
}
