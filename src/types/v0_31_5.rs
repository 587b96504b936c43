//! Message types for the v0.31.5 schema snapshot.
//!
//! Hand-maintained in the shape protobuf codegen would produce, with field
//! tags matching the upstream `types.proto` for this release. Note the
//! historical quirk: `Request.deliver_tx` sits at tag 19, not 10.
//!
//! `Request` and `Response` are discriminated unions: exactly one oneof
//! variant is populated per message. A `Request` whose `value` is `None`
//! is the unknown-method case and is answered with a
//! [`ResponseException`], never dropped.

/// A single request from the consensus engine.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Request {
    #[prost(oneof = "request::Value", tags = "2, 3, 4, 5, 6, 7, 8, 9, 19, 11, 12")]
    pub value: ::core::option::Option<request::Value>,
}

/// Nested types for [`Request`].
pub mod request {
    /// The populated request variant.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(message, tag = "2")]
        Echo(super::RequestEcho),
        #[prost(message, tag = "3")]
        Flush(super::RequestFlush),
        #[prost(message, tag = "4")]
        Info(super::RequestInfo),
        #[prost(message, tag = "5")]
        SetOption(super::RequestSetOption),
        #[prost(message, tag = "6")]
        InitChain(super::RequestInitChain),
        #[prost(message, tag = "7")]
        Query(super::RequestQuery),
        #[prost(message, tag = "8")]
        BeginBlock(super::RequestBeginBlock),
        #[prost(message, tag = "9")]
        CheckTx(super::RequestCheckTx),
        #[prost(message, tag = "19")]
        DeliverTx(super::RequestDeliverTx),
        #[prost(message, tag = "11")]
        EndBlock(super::RequestEndBlock),
        #[prost(message, tag = "12")]
        Commit(super::RequestCommit),
    }
}

/// A single response to the consensus engine.
///
/// Carries one extra variant the request side does not have: `exception`,
/// used by the server to report dispatch failures in-band.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Response {
    #[prost(oneof = "response::Value", tags = "1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12")]
    pub value: ::core::option::Option<response::Value>,
}

/// Nested types for [`Response`].
pub mod response {
    /// The populated response variant.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(message, tag = "1")]
        Exception(super::ResponseException),
        #[prost(message, tag = "2")]
        Echo(super::ResponseEcho),
        #[prost(message, tag = "3")]
        Flush(super::ResponseFlush),
        #[prost(message, tag = "4")]
        Info(super::ResponseInfo),
        #[prost(message, tag = "5")]
        SetOption(super::ResponseSetOption),
        #[prost(message, tag = "6")]
        InitChain(super::ResponseInitChain),
        #[prost(message, tag = "7")]
        Query(super::ResponseQuery),
        #[prost(message, tag = "8")]
        BeginBlock(super::ResponseBeginBlock),
        #[prost(message, tag = "9")]
        CheckTx(super::ResponseCheckTx),
        #[prost(message, tag = "10")]
        DeliverTx(super::ResponseDeliverTx),
        #[prost(message, tag = "11")]
        EndBlock(super::ResponseEndBlock),
        #[prost(message, tag = "12")]
        Commit(super::ResponseCommit),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequestEcho {
    #[prost(string, tag = "1")]
    pub message: ::std::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequestFlush {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequestInfo {
    /// Version of the connecting engine.
    #[prost(string, tag = "1")]
    pub version: ::std::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequestSetOption {
    #[prost(string, tag = "1")]
    pub key: ::std::string::String,
    #[prost(string, tag = "2")]
    pub value: ::std::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequestInitChain {
    #[prost(message, optional, tag = "1")]
    pub time: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(string, tag = "2")]
    pub chain_id: ::std::string::String,
    /// Initial validator set proposed by the engine.
    #[prost(message, repeated, tag = "4")]
    pub validators: ::std::vec::Vec<ValidatorUpdate>,
    #[prost(bytes = "bytes", tag = "5")]
    pub app_state_bytes: ::bytes::Bytes,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequestQuery {
    #[prost(bytes = "bytes", tag = "1")]
    pub data: ::bytes::Bytes,
    #[prost(string, tag = "2")]
    pub path: ::std::string::String,
    #[prost(int64, tag = "3")]
    pub height: i64,
    #[prost(bool, tag = "4")]
    pub prove: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequestBeginBlock {
    /// Hash of the block about to be executed.
    #[prost(bytes = "bytes", tag = "1")]
    pub hash: ::bytes::Bytes,
    #[prost(message, optional, tag = "2")]
    pub header: ::core::option::Option<Header>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequestCheckTx {
    #[prost(bytes = "bytes", tag = "1")]
    pub tx: ::bytes::Bytes,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequestDeliverTx {
    #[prost(bytes = "bytes", tag = "1")]
    pub tx: ::bytes::Bytes,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequestEndBlock {
    #[prost(int64, tag = "1")]
    pub height: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequestCommit {}

/// Server-side failure report, the only response without a request twin.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseException {
    #[prost(string, tag = "1")]
    pub error: ::std::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseEcho {
    #[prost(string, tag = "1")]
    pub message: ::std::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseFlush {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseInfo {
    #[prost(string, tag = "1")]
    pub data: ::std::string::String,
    #[prost(string, tag = "2")]
    pub version: ::std::string::String,
    #[prost(int64, tag = "3")]
    pub last_block_height: i64,
    #[prost(bytes = "bytes", tag = "4")]
    pub last_block_app_hash: ::bytes::Bytes,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseSetOption {
    /// Status code; zero means OK.
    #[prost(uint32, tag = "1")]
    pub code: u32,
    #[prost(string, tag = "3")]
    pub log: ::std::string::String,
    #[prost(string, tag = "4")]
    pub info: ::std::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseInitChain {
    /// Optional override of the initial validator set. Empty keeps the
    /// engine's proposal.
    #[prost(message, repeated, tag = "2")]
    pub validators: ::std::vec::Vec<ValidatorUpdate>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseQuery {
    #[prost(uint32, tag = "1")]
    pub code: u32,
    #[prost(string, tag = "3")]
    pub log: ::std::string::String,
    #[prost(string, tag = "4")]
    pub info: ::std::string::String,
    #[prost(int64, tag = "5")]
    pub index: i64,
    #[prost(bytes = "bytes", tag = "6")]
    pub key: ::bytes::Bytes,
    #[prost(bytes = "bytes", tag = "7")]
    pub value: ::bytes::Bytes,
    #[prost(int64, tag = "9")]
    pub height: i64,
    #[prost(string, tag = "10")]
    pub codespace: ::std::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseBeginBlock {
    #[prost(message, repeated, tag = "1")]
    pub tags: ::std::vec::Vec<KvPair>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseCheckTx {
    #[prost(uint32, tag = "1")]
    pub code: u32,
    #[prost(bytes = "bytes", tag = "2")]
    pub data: ::bytes::Bytes,
    #[prost(string, tag = "3")]
    pub log: ::std::string::String,
    #[prost(string, tag = "4")]
    pub info: ::std::string::String,
    #[prost(int64, tag = "5")]
    pub gas_wanted: i64,
    #[prost(int64, tag = "6")]
    pub gas_used: i64,
    #[prost(message, repeated, tag = "7")]
    pub tags: ::std::vec::Vec<KvPair>,
    #[prost(string, tag = "8")]
    pub codespace: ::std::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseDeliverTx {
    #[prost(uint32, tag = "1")]
    pub code: u32,
    #[prost(bytes = "bytes", tag = "2")]
    pub data: ::bytes::Bytes,
    #[prost(string, tag = "3")]
    pub log: ::std::string::String,
    #[prost(string, tag = "4")]
    pub info: ::std::string::String,
    #[prost(int64, tag = "5")]
    pub gas_wanted: i64,
    #[prost(int64, tag = "6")]
    pub gas_used: i64,
    #[prost(message, repeated, tag = "7")]
    pub tags: ::std::vec::Vec<KvPair>,
    #[prost(string, tag = "8")]
    pub codespace: ::std::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseEndBlock {
    /// Validator set changes to apply for the next block, in order.
    #[prost(message, repeated, tag = "1")]
    pub validator_updates: ::std::vec::Vec<ValidatorUpdate>,
    #[prost(message, repeated, tag = "3")]
    pub tags: ::std::vec::Vec<KvPair>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseCommit {
    /// Opaque commitment over the application state.
    #[prost(bytes = "bytes", tag = "2")]
    pub data: ::bytes::Bytes,
}

/// A validator and its voting power.
///
/// Owned by whichever message embeds it; always copied across the
/// boundary, never aliased.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ValidatorUpdate {
    #[prost(message, optional, tag = "1")]
    pub pub_key: ::core::option::Option<PubKey>,
    #[prost(int64, tag = "2")]
    pub power: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PubKey {
    /// Key scheme identifier, e.g. `"ed25519"`.
    #[prost(string, tag = "1")]
    pub r#type: ::std::string::String,
    #[prost(bytes = "bytes", tag = "2")]
    pub data: ::bytes::Bytes,
}

/// Block header, trimmed to the scalar fields applications consume.
/// Tags match the upstream layout so the kept fields decode correctly.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Header {
    #[prost(string, tag = "2")]
    pub chain_id: ::std::string::String,
    #[prost(int64, tag = "3")]
    pub height: i64,
    #[prost(message, optional, tag = "4")]
    pub time: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(int64, tag = "5")]
    pub num_txs: i64,
    #[prost(int64, tag = "6")]
    pub total_txs: i64,
    #[prost(bytes = "bytes", tag = "8")]
    pub last_commit_hash: ::bytes::Bytes,
    #[prost(bytes = "bytes", tag = "9")]
    pub data_hash: ::bytes::Bytes,
    #[prost(bytes = "bytes", tag = "10")]
    pub validators_hash: ::bytes::Bytes,
    #[prost(bytes = "bytes", tag = "11")]
    pub next_validators_hash: ::bytes::Bytes,
    #[prost(bytes = "bytes", tag = "12")]
    pub consensus_hash: ::bytes::Bytes,
    #[prost(bytes = "bytes", tag = "13")]
    pub app_hash: ::bytes::Bytes,
    #[prost(bytes = "bytes", tag = "14")]
    pub last_results_hash: ::bytes::Bytes,
    #[prost(bytes = "bytes", tag = "15")]
    pub evidence_hash: ::bytes::Bytes,
    #[prost(bytes = "bytes", tag = "16")]
    pub proposer_address: ::bytes::Bytes,
}

/// Key/value event tag attached to block and transaction responses.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KvPair {
    #[prost(bytes = "bytes", tag = "1")]
    pub key: ::bytes::Bytes,
    #[prost(bytes = "bytes", tag = "2")]
    pub value: ::bytes::Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_request_oneof_roundtrip() {
        let original = Request {
            value: Some(request::Value::Echo(RequestEcho {
                message: "hello".to_string(),
            })),
        };

        let encoded = original.encode_to_vec();
        let decoded = Request::decode(encoded.as_slice()).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_echo_request_wire_tag() {
        // Field 2, wire type 2 (length-delimited) => key byte 0x12.
        let request = Request {
            value: Some(request::Value::Echo(RequestEcho {
                message: "x".to_string(),
            })),
        };
        let encoded = request.encode_to_vec();
        assert_eq!(encoded[0], 0x12);
    }

    #[test]
    fn test_exception_response_wire_tag() {
        // The exception variant sits at field 1 => key byte 0x0A.
        let response = Response {
            value: Some(response::Value::Exception(ResponseException {
                error: "boom".to_string(),
            })),
        };
        let encoded = response.encode_to_vec();
        assert_eq!(encoded[0], 0x0A);
    }

    #[test]
    fn test_deliver_tx_request_uses_historical_tag() {
        // deliver_tx lives at field 19 in this snapshot: key = (19 << 3) | 2.
        let request = Request {
            value: Some(request::Value::DeliverTx(RequestDeliverTx {
                tx: bytes::Bytes::from_static(b"tx"),
            })),
        };
        let encoded = request.encode_to_vec();
        assert_eq!(encoded[0], (19 << 3) | 2);
    }

    #[test]
    fn test_empty_request_decodes_to_unpopulated_oneof() {
        let decoded = Request::decode(&[][..]).unwrap();
        assert!(decoded.value.is_none());
    }

    #[test]
    fn test_validator_update_roundtrip() {
        let original = ValidatorUpdate {
            pub_key: Some(PubKey {
                r#type: "ed25519".to_string(),
                data: bytes::Bytes::from_static(b"a_pub_key"),
            }),
            power: 10,
        };

        let encoded = original.encode_to_vec();
        let decoded = ValidatorUpdate::decode(encoded.as_slice()).unwrap();

        assert_eq!(decoded, original);
    }
}
