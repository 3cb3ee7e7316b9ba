//! TCP+msgpack IPC transport layer.
//!
//! The host invocation surface: length-prefixed msgpack framing over a local
//! TCP socket. Requests name a method (`CallTool`, `ListTools`); responses
//! carry a JSON-serializable body or a coded error.

pub mod codec;
pub mod router;
pub mod server;

pub use router::Router;
pub use server::IpcServer;
