//! # abci-server
//!
//! Server side of the Application Blockchain Interface: an external
//! consensus engine drives application logic over persistent socket
//! connections carrying length-prefixed protobuf messages.
//!
//! ## Architecture
//!
//! - [`codec`] - varint-length framing over any [`prost::Message`]
//! - [`types`] - wire message definitions, one module per schema snapshot
//! - [`application`] - the callback contract applications implement
//! - [`handler`] - typed request in, encoded typed response out; the
//!   schema snapshot is a construction-time type parameter
//! - [`server`] - concurrent acceptor, strictly sequential per connection
//!
//! ## Example
//!
//! ```ignore
//! use abci_server::types::{RequestEcho, ResponseEcho};
//! use abci_server::{Application, Server};
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn echo(&self, request: RequestEcho) -> ResponseEcho {
//!         ResponseEcho { message: request.message }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> abci_server::Result<()> {
//!     let server = Server::bind(MyApp, &"tcp://127.0.0.1:26658".parse()?).await?;
//!     server.serve().await
//! }
//! ```

pub mod application;
pub mod codec;
pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use application::{Application, NoopApplication, CODE_TYPE_OK};
pub use error::{AbciError, Result};
pub use handler::{ProtocolHandler, ProtocolVersion, V0_22_8, V0_31_5};
pub use server::{Address, Server, ServerConfig};
