//! Protocol handler: maps an inbound typed request to an application
//! callback and wraps the result back into a typed, encoded response.
//!
//! Which schema snapshot a handler speaks is a construction-time choice:
//! [`ProtocolHandler`] takes a [`ProtocolVersion`] marker as a type
//! parameter, and the marker pins the wire `Request`/`Response` pair and
//! the routing between its oneof variants and the [`Application`]
//! callbacks. Routing is an exhaustive `match` per snapshot, so adding a
//! variant to a snapshot fails compilation here until it is routed. The
//! handler is stateless apart from the shared application reference; each
//! dispatch is an independent transaction.

use std::any::Any;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use bytes::Bytes;
use prost::Message;

use crate::application::Application;
use crate::codec::encode_frame;
use crate::error::Result;
use crate::types::{v0_22_8, v0_31_5};

/// Error string answered when a request carries no recognized method.
pub const UNKNOWN_REQUEST_ERROR: &str = "ABCI request not found";

/// Schema snapshot marker.
///
/// Pins the wire message pair a handler speaks and routes request variants
/// to the [`Application`] callbacks, converting where the snapshot's
/// shapes differ from the types the application is written against.
pub trait ProtocolVersion: Send + Sync + 'static {
    /// Wire type read from the engine.
    type Request: Message + Default + Send;
    /// Wire type written back.
    type Response: Message + Send;

    /// Map one request to its response, invoking the matching callback.
    /// Callback panics propagate; [`ProtocolHandler`] absorbs them.
    fn respond<A: Application>(app: &A, request: Self::Request) -> Self::Response;

    /// Build an in-band failure report.
    fn exception(error: String) -> Self::Response;
}

/// The v0.31.5 snapshot, [`crate::types::v0_31_5`]. Applications are
/// written against these types, so routing is direct.
pub enum V0_31_5 {}

/// The v0.22.8 snapshot, [`crate::types::v0_22_8`]. Requests are widened
/// to the latest types before the callback and responses narrowed back.
pub enum V0_22_8 {}

impl ProtocolVersion for V0_31_5 {
    type Request = v0_31_5::Request;
    type Response = v0_31_5::Response;

    fn respond<A: Application>(app: &A, request: Self::Request) -> Self::Response {
        use v0_31_5::{request::Value, response};

        let Some(value) = request.value else {
            tracing::warn!("request with no populated variant");
            return Self::exception(UNKNOWN_REQUEST_ERROR.to_string());
        };

        let value = match value {
            Value::Echo(req) => response::Value::Echo(app.echo(req)),
            Value::Flush(_) => response::Value::Flush(app.flush()),
            Value::Info(req) => response::Value::Info(app.info(req)),
            Value::SetOption(req) => response::Value::SetOption(app.set_option(req)),
            Value::InitChain(req) => response::Value::InitChain(app.init_chain(req)),
            Value::Query(req) => response::Value::Query(app.query(req)),
            Value::BeginBlock(req) => response::Value::BeginBlock(app.begin_block(req)),
            Value::CheckTx(req) => response::Value::CheckTx(app.check_tx(req.tx)),
            Value::DeliverTx(req) => response::Value::DeliverTx(app.deliver_tx(req.tx)),
            Value::EndBlock(req) => response::Value::EndBlock(app.end_block(req)),
            Value::Commit(_) => response::Value::Commit(app.commit()),
        };

        v0_31_5::Response { value: Some(value) }
    }

    fn exception(error: String) -> Self::Response {
        v0_31_5::Response {
            value: Some(v0_31_5::response::Value::Exception(
                v0_31_5::ResponseException { error },
            )),
        }
    }
}

impl ProtocolVersion for V0_22_8 {
    type Request = v0_22_8::Request;
    type Response = v0_22_8::Response;

    fn respond<A: Application>(app: &A, request: Self::Request) -> Self::Response {
        use v0_22_8::{request::Value, response};

        let Some(value) = request.value else {
            tracing::warn!("request with no populated variant");
            return Self::exception(UNKNOWN_REQUEST_ERROR.to_string());
        };

        let value = match value {
            Value::Echo(req) => response::Value::Echo(app.echo(req.into()).into()),
            Value::Flush(_) => response::Value::Flush(app.flush().into()),
            Value::Info(req) => response::Value::Info(app.info(req.into()).into()),
            Value::SetOption(req) => {
                response::Value::SetOption(app.set_option(req.into()).into())
            }
            Value::InitChain(req) => {
                response::Value::InitChain(app.init_chain(req.into()).into())
            }
            Value::Query(req) => response::Value::Query(app.query(req.into()).into()),
            Value::BeginBlock(req) => {
                response::Value::BeginBlock(app.begin_block(req.into()).into())
            }
            Value::CheckTx(req) => response::Value::CheckTx(app.check_tx(req.tx).into()),
            Value::DeliverTx(req) => response::Value::DeliverTx(app.deliver_tx(req.tx).into()),
            Value::EndBlock(req) => response::Value::EndBlock(app.end_block(req.into()).into()),
            Value::Commit(_) => response::Value::Commit(app.commit().into()),
        };

        v0_22_8::Response { value: Some(value) }
    }

    fn exception(error: String) -> Self::Response {
        v0_22_8::Response {
            value: Some(v0_22_8::response::Value::Exception(
                v0_22_8::ResponseException { error },
            )),
        }
    }
}

/// Dispatches requests to an [`Application`] and encodes the replies.
pub struct ProtocolHandler<A, V = V0_31_5> {
    app: Arc<A>,
    _version: PhantomData<fn() -> V>,
}

impl<A, V> Clone for ProtocolHandler<A, V> {
    fn clone(&self) -> Self {
        Self {
            app: Arc::clone(&self.app),
            _version: PhantomData,
        }
    }
}

impl<A: Application, V: ProtocolVersion> ProtocolHandler<A, V> {
    /// Create a handler over a shared application.
    pub fn new(app: Arc<A>) -> Self {
        Self {
            app,
            _version: PhantomData,
        }
    }

    /// Dispatch one request and return the fully encoded response frame.
    ///
    /// Always produces a length-prefixed frame, never a bare message.
    /// Unknown methods and panicking callbacks come back as `exception`
    /// responses; the only error this returns is an encoding failure.
    pub fn dispatch(&self, request: V::Request) -> Result<Bytes> {
        let respond = AssertUnwindSafe(|| V::respond(self.app.as_ref(), request));
        let response = match panic::catch_unwind(respond) {
            Ok(response) => response,
            Err(payload) => {
                let error = panic_message(payload.as_ref());
                tracing::error!(%error, "application callback panicked");
                V::exception(error)
            }
        };

        encode_frame(&response)
    }
}

/// Best-effort description of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "application callback panicked".to_string()
    }
}
