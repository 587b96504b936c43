//! Counter application: serial-number transactions over ABCI.
//!
//! Each transaction is a big-endian `u64` that must equal the current
//! count plus one. `check_tx` rejects out-of-sequence values at the
//! mempool, `deliver_tx` enforces the same rule during block execution,
//! `commit` returns the committed count as the state commitment and
//! `query` exposes it.
//!
//! Run with an optional listen address:
//!
//! ```text
//! cargo run --example counter -- tcp://127.0.0.1:26658
//! ```

use std::sync::Mutex;

use abci_server::types::{
    RequestInfo, RequestQuery, ResponseCheckTx, ResponseCommit, ResponseDeliverTx, ResponseInfo,
    ResponseQuery,
};
use abci_server::{Application, Server, CODE_TYPE_OK};
use bytes::Bytes;

/// Nonzero status codes reported by the counter.
const CODE_BAD_ENCODING: u32 = 1;
const CODE_BAD_NONCE: u32 = 2;
const CODE_UNKNOWN_PATH: u32 = 3;

#[derive(Default)]
struct State {
    /// Count established by the last commit.
    committed: u64,
    /// Count including transactions delivered in the open block.
    pending: u64,
}

#[derive(Default)]
struct CounterApp {
    state: Mutex<State>,
}

fn parse_tx(tx: &[u8]) -> Option<u64> {
    let bytes: [u8; 8] = tx.try_into().ok()?;
    Some(u64::from_be_bytes(bytes))
}

impl Application for CounterApp {
    fn info(&self, _request: RequestInfo) -> ResponseInfo {
        let state = self.state.lock().unwrap();
        ResponseInfo {
            data: "counter".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            last_block_height: state.committed as i64,
            last_block_app_hash: Bytes::copy_from_slice(&state.committed.to_be_bytes()),
        }
    }

    fn check_tx(&self, tx: Bytes) -> ResponseCheckTx {
        let Some(value) = parse_tx(&tx) else {
            return ResponseCheckTx {
                code: CODE_BAD_ENCODING,
                log: "transaction must be 8 big-endian bytes".to_string(),
                ..Default::default()
            };
        };

        let state = self.state.lock().unwrap();
        if value != state.pending + 1 {
            return ResponseCheckTx {
                code: CODE_BAD_NONCE,
                log: format!("expected {}, got {}", state.pending + 1, value),
                ..Default::default()
            };
        }

        ResponseCheckTx {
            code: CODE_TYPE_OK,
            ..Default::default()
        }
    }

    fn deliver_tx(&self, tx: Bytes) -> ResponseDeliverTx {
        let Some(value) = parse_tx(&tx) else {
            return ResponseDeliverTx {
                code: CODE_BAD_ENCODING,
                log: "transaction must be 8 big-endian bytes".to_string(),
                ..Default::default()
            };
        };

        let mut state = self.state.lock().unwrap();
        if value != state.pending + 1 {
            return ResponseDeliverTx {
                code: CODE_BAD_NONCE,
                log: format!("expected {}, got {}", state.pending + 1, value),
                ..Default::default()
            };
        }

        state.pending = value;
        ResponseDeliverTx {
            code: CODE_TYPE_OK,
            ..Default::default()
        }
    }

    fn query(&self, request: RequestQuery) -> ResponseQuery {
        let state = self.state.lock().unwrap();
        match request.path.as_str() {
            "count" => ResponseQuery {
                code: CODE_TYPE_OK,
                value: Bytes::copy_from_slice(&state.committed.to_be_bytes()),
                ..Default::default()
            },
            path => ResponseQuery {
                code: CODE_UNKNOWN_PATH,
                log: format!("unknown query path: {}", path),
                ..Default::default()
            },
        }
    }

    fn commit(&self) -> ResponseCommit {
        let mut state = self.state.lock().unwrap();
        state.committed = state.pending;
        ResponseCommit {
            data: Bytes::copy_from_slice(&state.committed.to_be_bytes()),
        }
    }
}

#[tokio::main]
async fn main() -> abci_server::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let address = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tcp://127.0.0.1:26658".to_string())
        .parse()?;

    let server = Server::bind(CounterApp::default(), &address).await?;
    server.serve().await
}
