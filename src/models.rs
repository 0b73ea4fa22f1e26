use ethers_core::types::U256;
use serde::{Deserialize, Serialize, Serializer};

/// One transaction record from the Etherscan `account/txlist` endpoint.
///
/// The explorer serialises every field as a string, numerics included, so
/// the record is kept verbatim and parsed where it is consumed. Fields the
/// aggregator does not read are carried through untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tx {
    pub block_hash: String,
    pub block_number: String,
    pub confirmations: String,
    pub contract_address: String,
    pub cumulative_gas_used: String,
    pub from: String,
    pub gas: String,
    pub gas_price: String,
    pub gas_used: String,
    pub hash: String,
    pub input: String,
    pub is_error: String,
    pub nonce: String,
    pub time_stamp: String,
    pub to: String,
    pub transaction_index: String,
    #[serde(rename = "txreceipt_status")]
    pub txreceipt_status: String,
    pub value: String,
}

/// Response envelope for `account/txlist` queries.
#[derive(Debug, Clone, Deserialize)]
pub struct TxListResponse {
    pub status: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<TxListResult>,
}

/// The `result` field is a transaction array on success but a bare notice
/// string on API-level failures such as rate limiting.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TxListResult {
    Txs(Vec<Tx>),
    Notice(String),
}

/// Aggregate gas/fee statistics for a single account.
///
/// All amounts are denominated in wei. The failed totals are a subset of
/// the overall totals, not a disjoint partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TxStats {
    pub count: u64,
    #[serde(serialize_with = "serialize_u256_dec")]
    pub total_gas_used: U256,
    #[serde(serialize_with = "serialize_u256_dec")]
    pub total_gas_price: U256,
    #[serde(serialize_with = "serialize_u256_dec")]
    pub avg_gas_price: U256,
    #[serde(serialize_with = "serialize_u256_dec")]
    pub total_fees_paid: U256,
    pub failed_count: u64,
    #[serde(serialize_with = "serialize_u256_dec")]
    pub failed_total_gas_used: U256,
    #[serde(serialize_with = "serialize_u256_dec")]
    pub failed_total_fees_paid: U256,
}

// U256 serialises as hex by default; explorer-style decimal strings are
// friendlier to consumers and round-trip exactly.
fn serialize_u256_dec<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_deserializes_etherscan_record() {
        let raw = r#"{
            "blockNumber": "14923692",
            "timeStamp": "1654646411",
            "hash": "0x88c42cd46ec72e2ccc8f3f6f1dbf13e5dcb200b462e1b2e8055c0a4a9f3f0d0c",
            "nonce": "7",
            "blockHash": "0x06a2fa55a8c2a1c4552dd791ff10e52ba8c36ae9e0ee63ca1dcd89c0f69f7d9b",
            "transactionIndex": "104",
            "from": "0xAbCdEf0123456789abcdef0123456789ABCDEF01",
            "to": "0x7a250d5630b4cf539739df2c5dacb4c659f2488d",
            "value": "100000000000000000",
            "gas": "21000",
            "gasPrice": "43760538963",
            "isError": "0",
            "txreceipt_status": "1",
            "input": "0x",
            "contractAddress": "",
            "cumulativeGasUsed": "7806543",
            "gasUsed": "21000",
            "confirmations": "3712941"
        }"#;

        let tx: Tx = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.from, "0xAbCdEf0123456789abcdef0123456789ABCDEF01");
        assert_eq!(tx.gas_used, "21000");
        assert_eq!(tx.gas_price, "43760538963");
        assert_eq!(tx.is_error, "0");
        assert_eq!(tx.txreceipt_status, "1");
    }

    #[test]
    fn tx_tolerates_missing_fields() {
        let tx: Tx = serde_json::from_str(r#"{"from": "0xabc", "gasUsed": "5"}"#).unwrap();
        assert_eq!(tx.from, "0xabc");
        assert_eq!(tx.gas_used, "5");
        assert_eq!(tx.gas_price, "");
        assert_eq!(tx.is_error, "");
    }

    #[test]
    fn result_field_accepts_array_or_notice() {
        let ok: TxListResponse =
            serde_json::from_str(r#"{"status":"1","message":"OK","result":[]}"#).unwrap();
        assert!(matches!(ok.result, Some(TxListResult::Txs(ref txs)) if txs.is_empty()));

        let notice: TxListResponse = serde_json::from_str(
            r#"{"status":"0","message":"NOTOK","result":"Max rate limit reached"}"#,
        )
        .unwrap();
        assert!(
            matches!(notice.result, Some(TxListResult::Notice(ref msg)) if msg == "Max rate limit reached")
        );

        let absent: TxListResponse = serde_json::from_str(r#"{"status":"0"}"#).unwrap();
        assert!(absent.result.is_none());
    }

    #[test]
    fn stats_serialize_wei_fields_as_decimal_strings() {
        let stats = TxStats {
            count: 2,
            total_gas_used: U256::from(300u64),
            total_gas_price: U256::from(300u64),
            avg_gas_price: U256::from(150u64),
            total_fees_paid: U256::from_dec_str("30000000000000000000").unwrap(),
            failed_count: 1,
            failed_total_gas_used: U256::from(100u64),
            failed_total_fees_paid: U256::from(10_000u64),
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["total_fees_paid"], "30000000000000000000");
        assert_eq!(json["avg_gas_price"], "150");
        assert_eq!(json["failed_total_fees_paid"], "10000");
    }
}
