use crate::{IngestError, MessageHandler, Outcome};
use async_trait::async_trait;
use domain::Message;
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

/// 消息来源抽象。
#[async_trait]
pub trait Source: Send + Sync {
    async fn run(&self, handler: Arc<dyn MessageHandler>) -> Result<(), IngestError>;
}

/// 行式 JSON 数据源：每行一个消息对象，转发结果按行写出。
pub struct JsonLinesSource<R, W> {
    reader: Mutex<R>,
    writer: Mutex<W>,
}

impl<R, W> JsonLinesSource<R, W>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: Mutex::new(reader),
            writer: Mutex::new(writer),
        }
    }

    pub fn into_writer(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<R, W> Source for JsonLinesSource<R, W>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    /// 读到 EOF 为止；只有读写失败才返回错误。
    async fn run(&self, handler: Arc<dyn MessageHandler>) -> Result<(), IngestError> {
        let mut reader = self.reader.lock().await;
        let mut writer = self.writer.lock().await;
        let mut buffer = Vec::new();
        let mut line_no: u64 = 0;

        loop {
            buffer.clear();
            let read = reader
                .read_until(b'\n', &mut buffer)
                .await
                .map_err(|err| IngestError::Source(err.to_string()))?;
            if read == 0 {
                break;
            }
            line_no += 1;

            // 非 UTF-8 行与非法 JSON 行一样跳过
            let Ok(line) = std::str::from_utf8(&buffer) else {
                warn!(target: "dish.ingest", line = line_no, "invalid_message_line");
                continue;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let message = match serde_json::from_str::<Value>(line)
                .ok()
                .and_then(Message::from_value)
            {
                Some(message) => message,
                None => {
                    warn!(target: "dish.ingest", line = line_no, "invalid_message_line");
                    continue;
                }
            };

            match handler.handle(message) {
                Outcome::Forwarded(message) => {
                    let mut encoded = serde_json::to_vec(&message)
                        .map_err(|err| IngestError::Source(err.to_string()))?;
                    encoded.push(b'\n');
                    writer
                        .write_all(&encoded)
                        .await
                        .map_err(|err| IngestError::Source(err.to_string()))?;
                    writer
                        .flush()
                        .await
                        .map_err(|err| IngestError::Source(err.to_string()))?;
                }
                Outcome::Dropped(reason) => {
                    debug!(target: "dish.ingest", line = line_no, reason = %reason, "message_dropped");
                }
                Outcome::Fatal(err) => {
                    error!(target: "dish.ingest", line = line_no, error = %err, "message_fatal");
                }
            }
        }
        Ok(())
    }
}
