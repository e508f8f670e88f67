use bytes::{BufMut, BytesMut};
use tracing::trace;

use crate::error::{ProtocolError, ProtocolResult};
use crate::message::{Message, MAX_MESSAGE_SIZE};

/// Length of the frame header: 4 bytes length, 1 byte tag.
pub const HEADER_LEN: usize = 5;

/// Largest payload the `u32` length field can describe (it also counts the
/// tag byte).
pub const MAX_FRAME_PAYLOAD: usize = u32::MAX as usize - 1;

/// Codec for difflens worker messages.
///
/// Frame layout: `[4 bytes BE len][1 byte tag][bincode payload]`, where
/// `len` counts the tag and the payload.
#[derive(Clone, Copy, Debug)]
pub struct DiffCodec {
    max_message_size: usize,
}

impl Default for DiffCodec {
    fn default() -> Self {
        Self::new(MAX_MESSAGE_SIZE)
    }
}

impl DiffCodec {
    /// Sizes beyond [`MAX_FRAME_PAYLOAD`] are clamped to it.
    pub fn new(max_message_size: usize) -> Self {
        Self {
            max_message_size: max_message_size.min(MAX_FRAME_PAYLOAD),
        }
    }

    pub fn max_message_size(&self) -> usize {
        self.max_message_size
    }

    /// Encode a message with framing.
    pub fn encode(&self, msg: &Message) -> ProtocolResult<Vec<u8>> {
        let mut buf = BytesMut::new();
        self.encode_into(msg, &mut buf)?;
        Ok(buf.to_vec())
    }

    /// Append a framed message to `buf`.
    pub fn encode_into(&self, msg: &Message, buf: &mut BytesMut) -> ProtocolResult<()> {
        let payload = Self::encode_payload(msg)?;
        if payload.len() > self.max_message_size {
            return Err(ProtocolError::MessageTooLarge {
                size: payload.len(),
                max: self.max_message_size,
            });
        }
        let len =
            u32::try_from(payload.len() + 1).map_err(|_| ProtocolError::MessageTooLarge {
                size: payload.len(),
                max: MAX_FRAME_PAYLOAD,
            })?;
        buf.reserve(HEADER_LEN + payload.len());
        buf.put_u32(len);
        buf.put_u8(msg.type_tag());
        buf.put_slice(&payload);
        trace!(kind = msg.type_name(), bytes = payload.len(), "encoded frame");
        Ok(())
    }

    /// Decode a framed message. Returns (message, bytes_consumed).
    pub fn decode(&self, data: &[u8]) -> ProtocolResult<(Message, usize)> {
        let total = match self.frame_len(data)? {
            Some(total) => total,
            None => {
                return Err(ProtocolError::FramingError(format!(
                    "incomplete: have {} bytes",
                    data.len()
                )))
            }
        };
        let msg = self.decode_frame(&data[..total])?;
        Ok((msg, total))
    }

    /// Encode payload only (no framing).
    pub fn encode_payload(msg: &Message) -> ProtocolResult<Vec<u8>> {
        bincode::serialize(msg).map_err(|e| ProtocolError::Serialization(e.to_string()))
    }

    /// Decode payload only (no framing).
    pub fn decode_payload(data: &[u8]) -> ProtocolResult<Message> {
        bincode::deserialize(data).map_err(|e| ProtocolError::Deserialization(e.to_string()))
    }

    /// Total length of the frame at the start of `data`, or `None` if more
    /// bytes are needed to know or to hold it. Validates the header.
    fn frame_len(&self, data: &[u8]) -> ProtocolResult<Option<usize>> {
        if data.len() < HEADER_LEN {
            return Ok(None);
        }
        let len = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
        if len < 1 {
            return Err(ProtocolError::FramingError("zero-length frame".into()));
        }
        if len - 1 > self.max_message_size {
            return Err(ProtocolError::MessageTooLarge {
                size: len - 1,
                max: self.max_message_size,
            });
        }
        if !Message::is_known_tag(data[4]) {
            return Err(ProtocolError::InvalidMessageType(data[4]));
        }
        let total = 4 + len;
        Ok((data.len() >= total).then_some(total))
    }

    /// Decode exactly one complete frame.
    fn decode_frame(&self, frame: &[u8]) -> ProtocolResult<Message> {
        let tag = frame[4];
        let msg = Self::decode_payload(&frame[HEADER_LEN..])?;
        if msg.type_tag() != tag {
            return Err(ProtocolError::FramingError(format!(
                "tag {tag} does not match {} payload",
                msg.type_name()
            )));
        }
        Ok(msg)
    }
}

/// Incremental decoder for a byte stream carrying back-to-back frames.
///
/// Bytes are fed with [`extend`](Self::extend) as they arrive; complete
/// frames are taken off the front with [`next_message`](Self::next_message).
#[derive(Debug, Default)]
pub struct FrameDecoder {
    codec: DiffCodec,
    buf: BytesMut,
}

impl FrameDecoder {
    pub fn new(codec: DiffCodec) -> Self {
        Self {
            codec,
            buf: BytesMut::new(),
        }
    }

    pub fn extend(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Bytes received but not yet consumed by a complete frame.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Writable tail for reads that fill the buffer directly.
    pub fn buffer_mut(&mut self) -> &mut BytesMut {
        &mut self.buf
    }

    /// Take the next complete message, or `None` if it has not fully
    /// arrived yet. A malformed header is an error; the stream cannot be
    /// resynchronized after one.
    pub fn next_message(&mut self) -> ProtocolResult<Option<Message>> {
        let Some(total) = self.codec.frame_len(&self.buf)? else {
            return Ok(None);
        };
        let frame = self.buf.split_to(total);
        self.codec.decode_frame(&frame).map(Some)
    }
}
