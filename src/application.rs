//! Application callback contract.
//!
//! [`Application`] is the capability set a concrete application implements,
//! one method per request variant. Every method has a neutral default body
//! (status code OK, empty payloads), so a minimal application overrides
//! only what its logic needs:
//!
//! ```
//! use abci_server::types::ResponseCommit;
//! use abci_server::Application;
//! use bytes::Bytes;
//!
//! struct FixedHashApp;
//!
//! impl Application for FixedHashApp {
//!     fn commit(&self) -> ResponseCommit {
//!         ResponseCommit {
//!             data: Bytes::from_static(b"0x1234"),
//!         }
//!     }
//! }
//! ```

use bytes::Bytes;

use crate::types::{
    RequestBeginBlock, RequestEcho, RequestEndBlock, RequestInfo, RequestInitChain, RequestQuery,
    RequestSetOption, ResponseBeginBlock, ResponseCheckTx, ResponseCommit, ResponseDeliverTx,
    ResponseEcho, ResponseEndBlock, ResponseFlush, ResponseInfo, ResponseInitChain, ResponseQuery,
    ResponseSetOption,
};

/// Distinguished success sentinel for status-bearing responses.
///
/// Any nonzero code is an application-defined failure and is propagated to
/// the engine verbatim, never interpreted by the server.
pub const CODE_TYPE_OK: u32 = 0;

/// Callback set invoked by the protocol handler.
///
/// # State and concurrency
///
/// The application instance is shared across every connection the server
/// accepts, so methods take `&self`; implementations own their state and
/// must guard it against concurrent mutation. The reference deployment
/// issues all mutating calls (`init_chain`, `check_tx`, `deliver_tx`,
/// `begin_block`, `end_block`, `commit`) over a single connection, which
/// serializes them by construction, while other connections stay
/// read-only (`info`, `query`). The server does not enforce that split.
///
/// # Durability
///
/// `commit` is the durability boundary: everything mutated since the last
/// `commit` must be reflected in the value it returns, and is defined to
/// survive a restart only once `commit` has returned.
pub trait Application: Send + Sync + 'static {
    /// Echo the message back to the engine. Used as a connection liveness
    /// probe.
    fn echo(&self, request: RequestEcho) -> ResponseEcho {
        ResponseEcho {
            message: request.message,
        }
    }

    /// Acknowledge a flush. The server already writes responses in request
    /// order, so the default is a bare acknowledgement.
    fn flush(&self) -> ResponseFlush {
        ResponseFlush {}
    }

    /// Report application name/version, last committed block height and
    /// last committed state hash.
    fn info(&self, _request: RequestInfo) -> ResponseInfo {
        ResponseInfo::default()
    }

    /// Apply a non-consensus configuration option.
    fn set_option(&self, _request: RequestSetOption) -> ResponseSetOption {
        ResponseSetOption {
            code: CODE_TYPE_OK,
            ..Default::default()
        }
    }

    /// Initialize state from the genesis validator set. Returning a
    /// non-empty validator list overrides the engine's proposal.
    fn init_chain(&self, _request: RequestInitChain) -> ResponseInitChain {
        ResponseInitChain::default()
    }

    /// Answer a read-only query against committed state.
    fn query(&self, _request: RequestQuery) -> ResponseQuery {
        ResponseQuery {
            code: CODE_TYPE_OK,
            ..Default::default()
        }
    }

    /// Validate a transaction for mempool admission.
    fn check_tx(&self, _tx: Bytes) -> ResponseCheckTx {
        ResponseCheckTx {
            code: CODE_TYPE_OK,
            ..Default::default()
        }
    }

    /// Execute a transaction against working state.
    fn deliver_tx(&self, _tx: Bytes) -> ResponseDeliverTx {
        ResponseDeliverTx {
            code: CODE_TYPE_OK,
            ..Default::default()
        }
    }

    /// Mark the start of a block.
    fn begin_block(&self, _request: RequestBeginBlock) -> ResponseBeginBlock {
        ResponseBeginBlock::default()
    }

    /// Mark the end of a block; returns validator set updates for the next
    /// block.
    fn end_block(&self, _request: RequestEndBlock) -> ResponseEndBlock {
        ResponseEndBlock::default()
    }

    /// Persist working state and return the commitment other peers use to
    /// verify state agreement.
    fn commit(&self) -> ResponseCommit {
        ResponseCommit::default()
    }
}

/// Application that answers every call with its neutral default.
///
/// Useful as a stand-in during wiring and as a base for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopApplication;

impl Application for NoopApplication {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_echo_returns_message() {
        let app = NoopApplication;
        let response = app.echo(RequestEcho {
            message: "ping".to_string(),
        });
        assert_eq!(response.message, "ping");
    }

    #[test]
    fn test_defaults_report_ok() {
        let app = NoopApplication;

        assert_eq!(app.check_tx(Bytes::from_static(b"tx")).code, CODE_TYPE_OK);
        assert_eq!(app.deliver_tx(Bytes::from_static(b"tx")).code, CODE_TYPE_OK);
        assert_eq!(app.query(RequestQuery::default()).code, CODE_TYPE_OK);
        assert_eq!(app.set_option(RequestSetOption::default()).code, CODE_TYPE_OK);
    }

    #[test]
    fn test_default_end_block_has_no_updates() {
        let app = NoopApplication;
        let response = app.end_block(RequestEndBlock { height: 1 });
        assert!(response.validator_updates.is_empty());
    }

    #[test]
    fn test_default_commit_is_empty() {
        let app = NoopApplication;
        assert!(app.commit().data.is_empty());
    }
}
