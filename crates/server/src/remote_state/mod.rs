// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote state data source pipeline.
//!
//! ```text
//! fetch → decode_raw_state → reconstruct_outputs → build_aggregate
//! ```
//!
//! Only the fetch suspends. Everything after it is synchronous and keeps no
//! state between reads.

mod error;
mod raw;
mod reconstruct;
mod reencode;
pub mod schema;

pub use error::RemoteStateError;
pub use raw::{MalformedStateError, RawOutputRecord, decode_raw_state};
pub use reconstruct::{OutputCollection, TypedOutput, reconstruct_output, reconstruct_outputs};
pub use reencode::{AggregateStateValue, ReencodingError, build_aggregate, reencode_value};
pub use schema::data_source_schema;

use crate::tfe::StateFetcher;

/// Turn a fetched state snapshot into the data source result.
pub fn decode_remote_state(
    organization: &str,
    workspace: &str,
    state: &[u8],
) -> Result<AggregateStateValue, RemoteStateError> {
    let records = decode_raw_state(state)?;
    tracing::debug!(outputs = records.len(), "Decoded raw state");

    let outputs = reconstruct_outputs(&records)?;
    let aggregate = build_aggregate(organization, workspace, &outputs)?;

    if !aggregate.sensitive_outputs.is_empty() {
        tracing::debug!(
            sensitive = aggregate.sensitive_outputs.len(),
            "State contains sensitive outputs"
        );
    }
    Ok(aggregate)
}

/// Fetch the current state of `organization/workspace` and decode it.
pub async fn read_remote_state(
    fetcher: &dyn StateFetcher,
    organization: &str,
    workspace: &str,
) -> Result<AggregateStateValue, RemoteStateError> {
    let state = fetcher.fetch_current_state(organization, workspace).await?;
    tracing::debug!(bytes = state.len(), "Fetched remote state");
    decode_remote_state(organization, workspace, &state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Type, Value};
    use crate::tfe::FetchError;
    use async_trait::async_trait;

    struct FixedState(&'static str);

    #[async_trait]
    impl StateFetcher for FixedState {
        async fn fetch_current_state(&self, _: &str, _: &str) -> Result<Vec<u8>, FetchError> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    struct NoState;

    #[async_trait]
    impl StateFetcher for NoState {
        async fn fetch_current_state(&self, _: &str, workspace: &str) -> Result<Vec<u8>, FetchError> {
            Err(FetchError::StateNotFound {
                workspace: workspace.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn reads_single_string_output() {
        let fetcher = FixedState(r#"{"outputs":{"greeting":{"value":"hi","type":"string"}}}"#);
        let aggregate = read_remote_state(&fetcher, "org1", "ws1").await.unwrap();

        assert_eq!(aggregate.organization, "org1");
        assert_eq!(aggregate.workspace, "ws1");
        assert_eq!(
            aggregate.values.get("greeting").and_then(Value::as_str),
            Some("hi")
        );
    }

    #[tokio::test]
    async fn list_output_keeps_its_type() {
        let fetcher = FixedState(r#"{"outputs":{"nums":{"value":[1,2,3],"type":["list","number"]}}}"#);
        let aggregate = read_remote_state(&fetcher, "org1", "ws1").await.unwrap();

        let nums = aggregate.values.get("nums").unwrap();
        assert_eq!(nums.ty(), &Type::list(Type::Number));
    }

    #[tokio::test]
    async fn missing_state_is_not_found() {
        let err = read_remote_state(&NoState, "org1", "ws1").await.unwrap_err();
        assert_eq!(err.summary(), "Remote state not found");
    }

    #[test]
    fn mismatched_output_produces_nothing() {
        let state = br#"{"outputs":{
            "ok":{"value":"fine","type":"string"},
            "bad":{"value":{"a":1,"extra":2},"type":["object",{"a":"number"}]}
        }}"#;
        let err = decode_remote_state("org", "ws", state).unwrap_err();
        assert!(matches!(err, RemoteStateError::TypeMismatch { output, .. } if output == "bad"));
    }

    #[test]
    fn sensitive_outputs_are_tracked() {
        let state = br#"{"outputs":{"pw":{"value":"x","type":"string","sensitive":true}}}"#;
        let aggregate = decode_remote_state("org", "ws", state).unwrap();
        assert!(aggregate.sensitive_outputs.contains("pw"));
    }

    #[test]
    fn numbers_keep_their_decimal_text() {
        let state = br#"{"outputs":{
            "n":{"value":18446744073709551617,"type":"number"},
            "f":{"value":0.1,"type":"number"},
            "d":{"value":[2.50,1e300],"type":"dynamic"}
        }}"#;
        let aggregate = decode_remote_state("org", "ws", state).unwrap();

        let dynamic = aggregate.into_dynamic_value().unwrap();
        let json: serde_json::Value = serde_json::from_slice(dynamic.as_bytes()).unwrap();
        let values = &json["values"]["value"];
        assert_eq!(values["n"].to_string(), "18446744073709551617");
        assert_eq!(values["f"].to_string(), "0.1");
        assert_eq!(values["d"].to_string(), "[2.50,1e300]");
    }
}
