//! Serving a worker over a framed byte stream, e.g. stdin/stdout.
//!
//! The worker greets with `Hello`, then reads `Request` and `Cancel`
//! messages until end of input and writes every response as it is
//! produced. At end of input the latest request is finished before the
//! output is closed.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, warn};

use difflens_engine::DiffEngine;
use difflens_protocol::{check_version, FrameReader, FrameWriter, Message, ProtocolError};

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::worker::DiffWorker;

pub async fn serve<R, W>(
    input: R,
    output: W,
    engine: DiffEngine,
    config: &WorkerConfig,
) -> WorkerResult<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    config.validate()?;
    let codec = config.codec();
    let mut reader = FrameReader::new(input, codec);
    let mut writer = FrameWriter::new(output, codec);
    writer.write_message(&Message::hello()).await?;

    let (worker, mut responses) = DiffWorker::spawn(engine, config);
    let forward = tokio::spawn(async move {
        let mut written = 0usize;
        while let Some(response) = responses.recv().await {
            writer.write_message(&Message::Response(response)).await?;
            written += 1;
        }
        Ok::<_, ProtocolError>(written)
    });

    let mut received = 0usize;
    while let Some(msg) = reader.read_message().await? {
        debug!(kind = msg.type_name(), "message received");
        match msg {
            Message::Hello { version } => check_version(version)?,
            Message::Request(request) => {
                received += 1;
                worker.submit(request).await?;
            }
            Message::Cancel => worker.cancel().await?,
            Message::Response(response) => {
                warn!(kind = response.type_name(), "ignoring response sent to worker");
            }
        }
    }

    worker.shutdown().await?;
    let written = forward
        .await
        .map_err(|e| WorkerError::Internal(e.to_string()))??;
    info!(received, written, "worker input closed");
    Ok(())
}
