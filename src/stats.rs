use ethers_core::types::U256;

use crate::models::{Tx, TxStats};

/// Aggregates gas and fee statistics for `account` over a transaction list.
///
/// All amounts are in wei. Only transactions sent *from* `account` are
/// counted; hex addresses are compared case-insensitively and everything
/// else is skipped. Failed transactions (`isError == "1"`) feed the failed
/// totals in addition to the overall ones. Returns `None` when no account
/// is connected.
///
/// `avg_gas_price` is zero when no transactions match, and numeric fields
/// that fail to parse contribute zero instead of aborting the scan. Fees
/// are `gas_used * gas_price` accumulated in `U256`, so values past the
/// 64-bit range stay exact.
pub fn compute_tx_stats(account: Option<&str>, txs: &[Tx]) -> Option<TxStats> {
    let account = account?;

    let mut stats = TxStats::default();
    for tx in txs {
        // Only interested in transactions originating from the account.
        if !tx.from.eq_ignore_ascii_case(account) {
            continue;
        }

        let gas_used = dec_or_zero(&tx.gas_used);
        let gas_price = dec_or_zero(&tx.gas_price);
        let fee = gas_used.saturating_mul(gas_price);

        stats.count += 1;
        stats.total_gas_used = stats.total_gas_used.saturating_add(gas_used);
        stats.total_gas_price = stats.total_gas_price.saturating_add(gas_price);
        stats.total_fees_paid = stats.total_fees_paid.saturating_add(fee);

        if tx.is_error == "1" {
            stats.failed_count += 1;
            stats.failed_total_gas_used = stats.failed_total_gas_used.saturating_add(gas_used);
            stats.failed_total_fees_paid = stats.failed_total_fees_paid.saturating_add(fee);
        }
    }

    if stats.count > 0 {
        stats.avg_gas_price = stats.total_gas_price / U256::from(stats.count);
    }

    Some(stats)
}

fn dec_or_zero(value: &str) -> U256 {
    U256::from_dec_str(value).unwrap_or_default()
}
