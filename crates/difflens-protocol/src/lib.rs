//! Wire protocol for difflens workers.
//!
//! Defines the request and response messages exchanged between a
//! foreground caller and a background diff worker, and the length-prefixed
//! framing used when they travel over a byte stream.
//!
//! # Key Types
//!
//! - [`DiffRequest`]: both texts plus options, tagged with a [`RequestId`]
//! - [`DiffResponse`]: progress, a completed result, or a failure
//! - [`Message`]: the framed envelope (`Hello`, `Request`, `Cancel`, `Response`)
//! - [`DiffCodec`] / [`FrameDecoder`]: framing over byte buffers
//! - [`FrameReader`] / [`FrameWriter`]: framing over tokio streams

pub mod codec;
pub mod error;
pub mod io;
pub mod message;

pub use codec::{DiffCodec, FrameDecoder, HEADER_LEN, MAX_FRAME_PAYLOAD};
pub use error::{ProtocolError, ProtocolResult};
pub use io::{FrameReader, FrameWriter};
pub use message::{
    check_version, DiffRequest, DiffResponse, FailureKind, Message, RequestId, MAX_MESSAGE_SIZE,
    PROTOCOL_VERSION,
};
