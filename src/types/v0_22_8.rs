//! Message types for the v0.22.8 schema snapshot.
//!
//! Older wire shapes than [`super::v0_31_5`]: block time is a plain unix
//! seconds integer, validator entries carry an address and are named
//! `Validator` rather than `ValidatorUpdate`, and the transaction
//! responses have no `codespace`. The oneof layout is the same, including
//! `Request.deliver_tx` at tag 19.
//!
//! Applications are written against the latest snapshot; the `From` impls
//! at the bottom widen inbound requests and narrow outbound responses, so
//! an unchanged application can serve engines speaking this release.
//! Fields the newer schema added are dropped on the way out.

use super::v0_31_5 as latest;

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
    /// Genesis time in unix seconds.
    #[prost(int64, tag = "1")]
    pub time: i64,
    #[prost(string, tag = "2")]
    pub chain_id: ::std::string::String,
    #[prost(message, repeated, tag = "4")]
    pub validators: ::std::vec::Vec<Validator>,
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
    #[prost(uint32, tag = "1")]
    pub code: u32,
    #[prost(string, tag = "3")]
    pub log: ::std::string::String,
    #[prost(string, tag = "4")]
    pub info: ::std::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseInitChain {
    #[prost(message, repeated, tag = "2")]
    pub validators: ::std::vec::Vec<Validator>,
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
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseEndBlock {
    #[prost(message, repeated, tag = "1")]
    pub validator_updates: ::std::vec::Vec<Validator>,
    #[prost(message, repeated, tag = "3")]
    pub tags: ::std::vec::Vec<KvPair>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseCommit {
    #[prost(bytes = "bytes", tag = "2")]
    pub data: ::bytes::Bytes,
}

/// A validator and its voting power. This snapshot still carries the
/// validator address alongside the key.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Validator {
    #[prost(bytes = "bytes", tag = "1")]
    pub address: ::bytes::Bytes,
    #[prost(message, optional, tag = "2")]
    pub pub_key: ::core::option::Option<PubKey>,
    #[prost(int64, tag = "3")]
    pub power: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PubKey {
    #[prost(string, tag = "1")]
    pub r#type: ::std::string::String,
    #[prost(bytes = "bytes", tag = "2")]
    pub data: ::bytes::Bytes,
}

/// Block header, trimmed to the scalar fields applications consume.
/// Time is unix seconds here, not a timestamp message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Header {
    #[prost(string, tag = "1")]
    pub chain_id: ::std::string::String,
    #[prost(int64, tag = "2")]
    pub height: i64,
    #[prost(int64, tag = "3")]
    pub time: i64,
    #[prost(int64, tag = "4")]
    pub num_txs: i64,
    #[prost(int64, tag = "6")]
    pub total_txs: i64,
    #[prost(bytes = "bytes", tag = "7")]
    pub last_commit_hash: ::bytes::Bytes,
    #[prost(bytes = "bytes", tag = "8")]
    pub data_hash: ::bytes::Bytes,
    #[prost(bytes = "bytes", tag = "9")]
    pub validators_hash: ::bytes::Bytes,
    #[prost(bytes = "bytes", tag = "10")]
    pub app_hash: ::bytes::Bytes,
}

/// Key/value event tag attached to block and transaction responses.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KvPair {
    #[prost(bytes = "bytes", tag = "1")]
    pub key: ::bytes::Bytes,
    #[prost(bytes = "bytes", tag = "2")]
    pub value: ::bytes::Bytes,
}

fn timestamp(seconds: i64) -> ::prost_types::Timestamp {
    ::prost_types::Timestamp { seconds, nanos: 0 }
}

impl From<PubKey> for latest::PubKey {
    fn from(value: PubKey) -> Self {
        Self {
            r#type: value.r#type,
            data: value.data,
        }
    }
}

impl From<latest::PubKey> for PubKey {
    fn from(value: latest::PubKey) -> Self {
        Self {
            r#type: value.r#type,
            data: value.data,
        }
    }
}

impl From<Validator> for latest::ValidatorUpdate {
    fn from(value: Validator) -> Self {
        Self {
            pub_key: value.pub_key.map(Into::into),
            power: value.power,
        }
    }
}

impl From<latest::ValidatorUpdate> for Validator {
    fn from(value: latest::ValidatorUpdate) -> Self {
        Self {
            // The newer schema dropped the address; engines of this era
            // derive it from the key.
            address: ::bytes::Bytes::new(),
            pub_key: value.pub_key.map(Into::into),
            power: value.power,
        }
    }
}

impl From<latest::KvPair> for KvPair {
    fn from(value: latest::KvPair) -> Self {
        Self {
            key: value.key,
            value: value.value,
        }
    }
}

impl From<Header> for latest::Header {
    fn from(value: Header) -> Self {
        Self {
            chain_id: value.chain_id,
            height: value.height,
            time: Some(timestamp(value.time)),
            num_txs: value.num_txs,
            total_txs: value.total_txs,
            last_commit_hash: value.last_commit_hash,
            data_hash: value.data_hash,
            validators_hash: value.validators_hash,
            app_hash: value.app_hash,
            ..Default::default()
        }
    }
}

impl From<RequestEcho> for latest::RequestEcho {
    fn from(value: RequestEcho) -> Self {
        Self {
            message: value.message,
        }
    }
}

impl From<RequestInfo> for latest::RequestInfo {
    fn from(value: RequestInfo) -> Self {
        Self {
            version: value.version,
        }
    }
}

impl From<RequestSetOption> for latest::RequestSetOption {
    fn from(value: RequestSetOption) -> Self {
        Self {
            key: value.key,
            value: value.value,
        }
    }
}

impl From<RequestInitChain> for latest::RequestInitChain {
    fn from(value: RequestInitChain) -> Self {
        Self {
            time: Some(timestamp(value.time)),
            chain_id: value.chain_id,
            validators: value.validators.into_iter().map(Into::into).collect(),
            app_state_bytes: value.app_state_bytes,
        }
    }
}

impl From<RequestQuery> for latest::RequestQuery {
    fn from(value: RequestQuery) -> Self {
        Self {
            data: value.data,
            path: value.path,
            height: value.height,
            prove: value.prove,
        }
    }
}

impl From<RequestBeginBlock> for latest::RequestBeginBlock {
    fn from(value: RequestBeginBlock) -> Self {
        Self {
            hash: value.hash,
            header: value.header.map(Into::into),
        }
    }
}

impl From<RequestEndBlock> for latest::RequestEndBlock {
    fn from(value: RequestEndBlock) -> Self {
        Self {
            height: value.height,
        }
    }
}

impl From<latest::ResponseEcho> for ResponseEcho {
    fn from(value: latest::ResponseEcho) -> Self {
        Self {
            message: value.message,
        }
    }
}

impl From<latest::ResponseFlush> for ResponseFlush {
    fn from(_: latest::ResponseFlush) -> Self {
        Self {}
    }
}

impl From<latest::ResponseInfo> for ResponseInfo {
    fn from(value: latest::ResponseInfo) -> Self {
        Self {
            data: value.data,
            version: value.version,
            last_block_height: value.last_block_height,
            last_block_app_hash: value.last_block_app_hash,
        }
    }
}

impl From<latest::ResponseSetOption> for ResponseSetOption {
    fn from(value: latest::ResponseSetOption) -> Self {
        Self {
            code: value.code,
            log: value.log,
            info: value.info,
        }
    }
}

impl From<latest::ResponseInitChain> for ResponseInitChain {
    fn from(value: latest::ResponseInitChain) -> Self {
        Self {
            validators: value.validators.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<latest::ResponseQuery> for ResponseQuery {
    fn from(value: latest::ResponseQuery) -> Self {
        Self {
            code: value.code,
            log: value.log,
            info: value.info,
            index: value.index,
            key: value.key,
            value: value.value,
            height: value.height,
        }
    }
}

impl From<latest::ResponseBeginBlock> for ResponseBeginBlock {
    fn from(value: latest::ResponseBeginBlock) -> Self {
        Self {
            tags: value.tags.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<latest::ResponseCheckTx> for ResponseCheckTx {
    fn from(value: latest::ResponseCheckTx) -> Self {
        Self {
            code: value.code,
            data: value.data,
            log: value.log,
            info: value.info,
            gas_wanted: value.gas_wanted,
            gas_used: value.gas_used,
            tags: value.tags.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<latest::ResponseDeliverTx> for ResponseDeliverTx {
    fn from(value: latest::ResponseDeliverTx) -> Self {
        Self {
            code: value.code,
            data: value.data,
            log: value.log,
            info: value.info,
            gas_wanted: value.gas_wanted,
            gas_used: value.gas_used,
            tags: value.tags.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<latest::ResponseEndBlock> for ResponseEndBlock {
    fn from(value: latest::ResponseEndBlock) -> Self {
        Self {
            validator_updates: value
                .validator_updates
                .into_iter()
                .map(Into::into)
                .collect(),
            tags: value.tags.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<latest::ResponseCommit> for ResponseCommit {
    fn from(value: latest::ResponseCommit) -> Self {
        Self { data: value.data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_deliver_tx_request_uses_historical_tag() {
        let request = Request {
            value: Some(request::Value::DeliverTx(RequestDeliverTx {
                tx: bytes::Bytes::from_static(b"tx"),
            })),
        };
        let encoded = request.encode_to_vec();
        assert_eq!(encoded[0], (19 << 3) | 2);
    }

    #[test]
    fn test_init_chain_time_widens_to_timestamp() {
        let request = RequestInitChain {
            time: 1_500_000_000,
            chain_id: "test-chain".to_string(),
            ..Default::default()
        };

        let widened: latest::RequestInitChain = request.into();

        let time = widened.time.unwrap();
        assert_eq!(time.seconds, 1_500_000_000);
        assert_eq!(time.nanos, 0);
        assert_eq!(widened.chain_id, "test-chain");
    }

    #[test]
    fn test_validator_conversion_preserves_key_and_power() {
        let validator = Validator {
            address: bytes::Bytes::from_static(b"addr"),
            pub_key: Some(PubKey {
                r#type: "ed25519".to_string(),
                data: bytes::Bytes::from_static(b"a_pub_key"),
            }),
            power: 10,
        };

        let update: latest::ValidatorUpdate = validator.into();
        assert_eq!(&update.pub_key.as_ref().unwrap().data[..], b"a_pub_key");
        assert_eq!(update.power, 10);

        let narrowed: Validator = update.into();
        assert!(narrowed.address.is_empty());
        assert_eq!(&narrowed.pub_key.unwrap().data[..], b"a_pub_key");
    }

    #[test]
    fn test_check_tx_response_narrows_without_losing_status() {
        let response = latest::ResponseCheckTx {
            code: 7,
            data: bytes::Bytes::from_static(b"payload"),
            log: "nope".to_string(),
            gas_wanted: 3,
            codespace: "mempool".to_string(),
            ..Default::default()
        };

        let narrowed: ResponseCheckTx = response.into();
        assert_eq!(narrowed.code, 7);
        assert_eq!(&narrowed.data[..], b"payload");
        assert_eq!(narrowed.log, "nope");
        assert_eq!(narrowed.gas_wanted, 3);
    }
}
