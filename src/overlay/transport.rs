use crate::overlay::messages::OutboundMessage;
use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::sync::mpsc::Sender;

/// Outbound half of the message channel to the server. Implementations must
/// deliver messages in the order they are emitted.
pub trait Transport {
    fn emit(&mut self, message: &OutboundMessage) -> Result<()>;
}

impl Transport for Vec<OutboundMessage> {
    fn emit(&mut self, message: &OutboundMessage) -> Result<()> {
        self.push(message.clone());
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn emit(&mut self, message: &OutboundMessage) -> Result<()> {
        (**self).emit(message)
    }
}

/// Writes each message as one JSON line.
#[derive(Debug)]
pub struct JsonLinesTransport<W> {
    writer: W,
}

impl<W: Write> JsonLinesTransport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for JsonLinesTransport<W> {
    fn emit(&mut self, message: &OutboundMessage) -> Result<()> {
        serde_json::to_writer(&mut self.writer, message)
            .with_context(|| format!("serialize {}", message.event_name()))?;
        self.writer
            .write_all(b"\n")
            .context("terminate outbound message line")?;
        self.writer.flush().context("flush outbound message")
    }
}

/// Forwards messages to an in-process receiver, such as a stroke canvas loop.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: Sender<OutboundMessage>,
}

impl ChannelTransport {
    pub fn new(tx: Sender<OutboundMessage>) -> Self {
        Self { tx }
    }
}

impl Transport for ChannelTransport {
    fn emit(&mut self, message: &OutboundMessage) -> Result<()> {
        self.tx
            .send(message.clone())
            .map_err(|_| anyhow!("outbound channel disconnected"))
    }
}
