//! Soroban RPC client: polls `getEvents` and decodes donation ledger events.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, LedgerEvent, Subject};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

/// JSON-RPC codes that will not succeed on retry.
const HARD_ERROR_CODES: [i64; 3] = [-32600, -32601, -32602];

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawEvent {
    /// XDR-encoded topic list
    pub topic: Vec<String>,
    /// XDR-encoded event value / data
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
    #[serde(rename = "pagingToken")]
    pub paging_token: Option<String>,
}

/// One page of `getEvents` output.
#[derive(Debug)]
pub struct EventPage {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    pub latest_ledger: Option<u64>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events from the RPC.
///
/// * `start_ledger` is the ledger sequence to scan from (inclusive).
/// * `cursor` is an opaque pagination cursor from a previous response; when
///   present it takes precedence over `start_ledger`.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<EventPage> {
    let mut backoff = INITIAL_BACKOFF_SECS;
    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "getEvents",
        "params": build_params(contract_id, start_ledger, cursor, limit),
    });

    loop {
        let resp = match client.post(rpc_url).json(&request).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("RPC request failed (will retry in {backoff}s): {e}");
                backoff = sleep_and_grow(backoff).await;
                continue;
            }
        };

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Rate-limited by RPC (will retry in {backoff}s)");
            backoff = sleep_and_grow(backoff).await;
            continue;
        }

        let body: RpcResponse = resp.json().await?;

        if let Some(err) = body.error {
            if HARD_ERROR_CODES.contains(&err.code) {
                return Err(IndexerError::Rpc {
                    code: err.code,
                    message: err.message,
                });
            }
            warn!(
                code = err.code,
                "RPC soft error (will retry in {backoff}s): {}", err.message
            );
            backoff = sleep_and_grow(backoff).await;
            continue;
        }

        let result = body
            .result
            .ok_or_else(|| IndexerError::EventParse("Empty result from getEvents".to_string()))?;

        debug!(
            count = result.events.len(),
            latest_ledger = ?result.latest_ledger,
            "Fetched events"
        );

        return Ok(EventPage {
            events: result.events,
            cursor: result.cursor,
            latest_ledger: result.latest_ledger,
        });
    }
}

async fn sleep_and_grow(backoff: u64) -> u64 {
    tokio::time::sleep(Duration::from_secs(backoff)).await;
    (backoff * 2).min(MAX_BACKOFF_SECS)
}

fn build_params(contract_id: &str, start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": [contract_id]
            }
        ],
        "pagination": {
            "limit": limit
        }
    });

    match cursor {
        Some(cur) => params["pagination"]["cursor"] = json!(cur),
        None => params["startLedger"] = json!(start_ledger),
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Fields pulled out of an event's data payload.
#[derive(Debug, Default, PartialEq, Eq)]
struct DataFields {
    actor: Option<String>,
    amount: Option<String>,
    charity_id: Option<String>,
}

/// Decode a page of raw RPC events into [`LedgerEvent`]s.
///
/// Events from failed contract calls are dropped; their state changes were
/// rolled back.
pub fn decode_events(raw: &[RawEvent], contract_id: &str) -> Vec<LedgerEvent> {
    raw.iter()
        .enumerate()
        .filter(|(_, e)| e.in_successful_contract_call != Some(false))
        .filter_map(|(position, e)| decode_single(e, contract_id, position))
        .collect()
}

fn decode_single(raw: &RawEvent, contract_id: &str, position: usize) -> Option<LedgerEvent> {
    let first_topic = raw.topic.first()?;
    let kind = EventKind::from_topic(&extract_symbol(first_topic));

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let subject = raw.topic.get(1).map(|t| extract_u64_or_raw(t));
    let fields = decode_data(&raw.value, kind);

    let (project_id, charity_id, actor) = match kind.subject() {
        Subject::Project => (subject, fields.charity_id, fields.actor),
        Subject::Charity => (None, subject.or(fields.charity_id), fields.actor),
        // Address-subject events are indexed under the address they are about.
        Subject::Address => (None, None, subject.or(fields.actor)),
        Subject::None => (None, None, fields.actor),
    };

    let event_id = raw
        .id
        .clone()
        .or_else(|| raw.paging_token.clone())
        .unwrap_or_else(|| {
            format!(
                "{ledger}-{}-{position}",
                raw.tx_hash.as_deref().unwrap_or("none")
            )
        });

    Some(LedgerEvent {
        event_id,
        event_type: kind.as_str().to_string(),
        project_id,
        charity_id,
        actor,
        amount: fields.amount,
        ledger,
        timestamp,
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| contract_id.to_string()),
        tx_hash: raw.tx_hash.clone(),
    })
}

/// Pull apart the JSON `value` blob that Soroban returns for event data.
fn decode_data(value: &Value, kind: EventKind) -> DataFields {
    let charity_id = extract_field(value, &["charity_id"]);
    match kind {
        EventKind::CharityRegistered
        | EventKind::WalletLocked
        | EventKind::WalletUnlocked => DataFields {
            actor: extract_field(value, &["owner"]),
            amount: None,
            charity_id,
        },
        EventKind::Withdrawal => DataFields {
            actor: extract_field(value, &["owner"]),
            amount: extract_field(value, &["amount"]),
            charity_id,
        },
        EventKind::UnverifiedExceeded => DataFields {
            actor: None,
            amount: extract_field(value, &["exposure"]),
            charity_id,
        },
        EventKind::ProjectListed => DataFields {
            actor: None,
            amount: extract_field(value, &["target_amount"]),
            charity_id,
        },
        EventKind::ProjectUnlisted | EventKind::ProjectRelisted => DataFields {
            charity_id,
            ..DataFields::default()
        },
        EventKind::DonationMade | EventKind::DonationVerified => DataFields {
            actor: extract_field(value, &["donor"]),
            amount: extract_field(value, &["amount"]),
            charity_id,
        },
        EventKind::ProofVerified => DataFields {
            actor: extract_field(value, &["verifier"]),
            amount: extract_field(value, &["applied", "amount"]),
            charity_id,
        },
        EventKind::DonorRegistered | EventKind::DonorDeregistered => DataFields {
            actor: extract_field(value, &["donor"]),
            ..DataFields::default()
        },
        EventKind::LockPolicySet => DataFields {
            amount: extract_field(value, &["threshold"]),
            ..DataFields::default()
        },
        EventKind::RoleSet | EventKind::RoleDel => DataFields {
            // Role events carry the caller address as bare data.
            actor: value.as_str().map(String::from),
            ..DataFields::default()
        },
        EventKind::Unknown => DataFields::default(),
    }
}

fn extract_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Extract a Soroban Symbol from the XDR-decoded topic string.
/// The RPC may return `{"type":"symbol","value":"donated"}` or just the raw string.
fn extract_symbol(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(s) = v.get("value").and_then(|x| x.as_str()) {
            return s.to_string();
        }
    }
    raw.to_string()
}

/// Extract a topic id or address that might be a JSON object or a raw number/string.
fn extract_u64_or_raw(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(n) = v.get("value").and_then(|x| x.as_u64()) {
            return n.to_string();
        }
        if let Some(s) = v.get("value").and_then(|x| x.as_str()) {
            return s.to_string();
        }
    }
    raw.to_string()
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
