//! Reading and writing frames over async byte streams.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::codec::{DiffCodec, FrameDecoder};
use crate::error::{ProtocolError, ProtocolResult};
use crate::message::Message;

/// Reads messages from an async byte stream.
pub struct FrameReader<R> {
    inner: R,
    decoder: FrameDecoder,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    pub fn new(inner: R, codec: DiffCodec) -> Self {
        Self {
            inner,
            decoder: FrameDecoder::new(codec),
        }
    }

    /// Next message, or `None` at a clean end of stream. End of stream in
    /// the middle of a frame is an error.
    pub async fn read_message(&mut self) -> ProtocolResult<Option<Message>> {
        loop {
            if let Some(msg) = self.decoder.next_message()? {
                return Ok(Some(msg));
            }
            let read = self.inner.read_buf(self.decoder.buffer_mut()).await?;
            if read == 0 {
                if self.decoder.buffered() == 0 {
                    return Ok(None);
                }
                return Err(ProtocolError::FramingError(format!(
                    "stream ended inside a frame ({} bytes buffered)",
                    self.decoder.buffered()
                )));
            }
        }
    }
}

/// Writes messages to an async byte stream, flushing after each one.
pub struct FrameWriter<W> {
    inner: W,
    codec: DiffCodec,
}

impl<W: AsyncWrite + Unpin> FrameWriter<W> {
    pub fn new(inner: W, codec: DiffCodec) -> Self {
        Self { inner, codec }
    }

    pub async fn write_message(&mut self, msg: &Message) -> ProtocolResult<()> {
        let frame = self.codec.encode(msg)?;
        self.inner.write_all(&frame).await?;
        self.inner.flush().await?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
