/*
    codec.rs - Durable textual codec for channel history

    Converts lists of ContentMessage to/from the persisted blob format:
    one JSON array per channel, binary fields as lowercase hex text,
    the Lamport clock as a base-10 decimal string so values survive
    decoders without 128-bit integers.

    Absent optional byte fields are omitted from the record, never
    written as empty strings; decode preserves the distinction
    (omitted comes back as None, not as a zero-length vec).

    Failure model is two-layered:
    - the blob itself failing to parse is an error (the persistent
      history treats it as corrupt state and self-heals);
    - a malformed individual record (schema mismatch, bad hex,
      non-numeric timestamp) is dropped and decoding continues.
*/

use crate::core_history::errors::{HistoryError, HistoryResult};
use crate::core_history::model::{
    ChannelId, ContentMessage, HistoryEntry, LamportTimestamp, MessageId, SenderId,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Persisted form of a causal dependency pointer
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCausalEntry {
    message_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    retrieval_hint: Option<String>,
}

/// Persisted form of a ContentMessage
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredContentMessage {
    message_id: String,
    channel_id: String,
    sender_id: String,

    /// Decimal string, not a JSON number
    lamport_timestamp: String,

    causal_history: Vec<StoredCausalEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    bloom_filter: Option<String>,

    /// Hex text; always present (content is not optional)
    content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    retrieval_hint: Option<String>,
}

/// Encode a message list into one aggregate blob
pub fn encode_messages(messages: &[ContentMessage]) -> HistoryResult<String> {
    let stored: Vec<StoredContentMessage> = messages.iter().map(serialize_message).collect();
    Ok(serde_json::to_string(&stored)?)
}

/// Decode an aggregate blob back into a message list.
///
/// Returns an error only if the blob itself does not parse; malformed
/// individual records are dropped and the rest are kept.
pub fn decode_messages(blob: &str) -> HistoryResult<Vec<ContentMessage>> {
    let records: Vec<serde_json::Value> = serde_json::from_str(blob)
        .map_err(|e| HistoryError::CorruptedData(e.to_string()))?;

    let mut messages = Vec::with_capacity(records.len());
    for record in records {
        match deserialize_message(record) {
            Ok(message) => messages.push(message),
            Err(e) => {
                // Expected degraded state, not an error condition
                debug!("Dropping undecodable history record: {}", e);
            }
        }
    }
    Ok(messages)
}

fn serialize_message(message: &ContentMessage) -> StoredContentMessage {
    StoredContentMessage {
        message_id: message.message_id.0.clone(),
        channel_id: message.channel_id.0.clone(),
        sender_id: message.sender_id.0.clone(),
        lamport_timestamp: message.lamport_timestamp.to_string(),
        causal_history: message
            .causal_history
            .iter()
            .map(|entry| StoredCausalEntry {
                message_id: entry.message_id.0.clone(),
                retrieval_hint: to_hex(entry.retrieval_hint.as_deref()),
            })
            .collect(),
        bloom_filter: to_hex(message.bloom_filter.as_deref()),
        content: hex::encode(&message.content),
        retrieval_hint: to_hex(message.retrieval_hint.as_deref()),
    }
}

fn deserialize_message(record: serde_json::Value) -> HistoryResult<ContentMessage> {
    let stored: StoredContentMessage = serde_json::from_value(record)
        .map_err(|e| HistoryError::Serialization(e.to_string()))?;

    let lamport_timestamp: LamportTimestamp = stored
        .lamport_timestamp
        .parse()
        .map_err(|_| {
            HistoryError::Serialization(format!(
                "non-numeric lamport timestamp: {}",
                stored.lamport_timestamp
            ))
        })?;

    let causal_history = stored
        .causal_history
        .into_iter()
        .map(|entry| {
            Ok(HistoryEntry {
                message_id: MessageId::new(entry.message_id),
                retrieval_hint: from_hex(entry.retrieval_hint.as_deref())?,
            })
        })
        .collect::<HistoryResult<Vec<_>>>()?;

    Ok(ContentMessage {
        message_id: MessageId::new(stored.message_id),
        channel_id: ChannelId::new(stored.channel_id),
        sender_id: SenderId::new(stored.sender_id),
        causal_history,
        lamport_timestamp,
        bloom_filter: from_hex(stored.bloom_filter.as_deref())?,
        content: decode_hex(&stored.content)?,
        retrieval_hint: from_hex(stored.retrieval_hint.as_deref())?,
    })
}

/// Absent and present-empty both round to an omitted field
fn to_hex(data: Option<&[u8]>) -> Option<String> {
    match data {
        Some(bytes) if !bytes.is_empty() => Some(hex::encode(bytes)),
        _ => None,
    }
}

/// Omitted (or empty) comes back as None, never as an empty vec
fn from_hex(value: Option<&str>) -> HistoryResult<Option<Vec<u8>>> {
    match value {
        Some(text) if !text.is_empty() => Ok(Some(decode_hex(text)?)),
        _ => Ok(None),
    }
}

fn decode_hex(text: &str) -> HistoryResult<Vec<u8>> {
    hex::decode(text).map_err(|e| HistoryError::Serialization(format!("bad hex: {}", e)))
}
