use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::transaction::{TransactionState, TxReceipt};

#[derive(Debug, Serialize)]
struct RpcRequest {
    jsonrpc: String,
    id: u64,
    method: String,
    params: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

/// Receipt as returned by `eth_getTransactionReceipt`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcReceipt {
    pub transaction_hash: String,
    pub block_number: Option<String>,
    pub gas_used: Option<String>,
    /// "0x1" on success, "0x0" when reverted
    pub status: Option<String>,
}

impl RpcReceipt {
    pub fn succeeded(&self) -> bool {
        match self.status.as_deref() {
            Some(status) => parse_hex_u64(status).map(|s| s == 1).unwrap_or(false),
            // pre-Byzantium receipts carry no status
            None => true,
        }
    }

    pub fn to_receipt(&self) -> TxReceipt {
        TxReceipt {
            transaction_hash: self.transaction_hash.clone(),
            block_number: self.block_number.as_deref().and_then(|b| parse_hex_u64(b).ok()),
            gas_used: self.gas_used.as_deref().and_then(|g| parse_hex_u64(g).ok()),
        }
    }

    /// Terminal transaction state described by this receipt
    pub fn to_state(&self) -> TransactionState {
        if self.succeeded() {
            TransactionState::success(self.to_receipt())
        } else {
            TransactionState::fail(self.to_receipt())
        }
    }
}

pub fn parse_hex_u64(value: &str) -> Result<u64, String> {
    let digits = value.trim_start_matches("0x");
    if digits.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(digits, 16).map_err(|e| format!("Invalid hex quantity {}: {}", value, e))
}

pub fn decode_hex_data(value: &str) -> Result<Vec<u8>, String> {
    hex::decode(value.trim_start_matches("0x")).map_err(|e| format!("Invalid hex data: {}", e))
}

/// JSON-RPC client for an Ethereum node
#[derive(Clone)]
pub struct RpcClient {
    client: Client,
    rpc_url: String,
}

impl RpcClient {
    pub fn new(rpc_url: &str) -> Self {
        Self {
            client: Client::new(),
            rpc_url: rpc_url.to_string(),
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, String> {
        let request = RpcRequest {
            jsonrpc: "2.0".to_string(),
            id: 1,
            method: method.to_string(),
            params,
        };

        let response = self
            .client
            .post(&self.rpc_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("RPC error: {}", response.status()));
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        if let Some(error) = body.error {
            return Err(format!("RPC error {}: {}", error.code, error.message));
        }

        serde_json::from_value(body.result.unwrap_or(Value::Null))
            .map_err(|e| format!("Unexpected {} result: {}", method, e))
    }

    pub async fn chain_id(&self) -> Result<u64, String> {
        let id: String = self.request("eth_chainId", vec![]).await?;
        parse_hex_u64(&id)
    }

    pub async fn accounts(&self) -> Result<Vec<String>, String> {
        self.request("eth_accounts", vec![]).await
    }

    /// Read-only contract call against the latest block
    pub async fn call(&self, to: &str, data: &[u8]) -> Result<Vec<u8>, String> {
        let result: String = self
            .request(
                "eth_call",
                vec![
                    json!({ "to": to, "data": format!("0x{}", hex::encode(data)) }),
                    json!("latest"),
                ],
            )
            .await?;
        decode_hex_data(&result)
    }

    /// Submit a transaction signed by the node's unlocked `from` account
    pub async fn send_transaction(
        &self,
        from: &str,
        to: &str,
        data: &[u8],
    ) -> Result<String, String> {
        self.request(
            "eth_sendTransaction",
            vec![json!({
                "from": from,
                "to": to,
                "data": format!("0x{}", hex::encode(data)),
            })],
        )
        .await
    }

    pub async fn get_transaction_receipt(&self, hash: &str) -> Result<Option<RpcReceipt>, String> {
        self.request("eth_getTransactionReceipt", vec![json!(hash)]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionStatus;

    #[test]
    fn test_parse_hex_u64() {
        assert_eq!(parse_hex_u64("0x539").unwrap(), 1337);
        assert_eq!(parse_hex_u64("0x").unwrap(), 0);
        assert!(parse_hex_u64("0xzz").is_err());
    }

    #[test]
    fn test_receipt_status() {
        let receipt: RpcReceipt = serde_json::from_value(json!({
            "transactionHash": "0xabc",
            "blockNumber": "0x10",
            "gasUsed": "0x5208",
            "status": "0x1"
        }))
        .unwrap();
        let state = receipt.to_state();
        assert_eq!(state.status, TransactionStatus::Success);
        let tx = state.receipt.unwrap();
        assert_eq!(tx.block_number, Some(16));
        assert_eq!(tx.gas_used, Some(21_000));

        let reverted: RpcReceipt = serde_json::from_value(json!({
            "transactionHash": "0xdef",
            "status": "0x0"
        }))
        .unwrap();
        assert_eq!(reverted.to_state().status, TransactionStatus::Fail);
    }

    #[test]
    fn test_error_response_parses() {
        let body: RpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": 4001, "message": "User denied transaction signature" }
        }))
        .unwrap();
        assert!(body.result.is_none());
        assert_eq!(body.error.unwrap().code, 4001);
    }

    #[tokio::test]
    async fn test_unreachable_node_is_error() {
        let client = RpcClient::new("http://127.0.0.1:1");
        let result = client.chain_id().await;
        assert!(result.unwrap_err().contains("Failed to send request"));
    }
}
