use tokio::io::{
    split, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
    ReadHalf, WriteHalf,
};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::protocol::frame::{self, MAX_FRAME_LEN};
use crate::protocol::{Message, TransportErrorKind};
use crate::transport::{FrameError, Transport};

/// Default timeout for a single send (5 seconds).
const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Default time to wait for the peer's next frame (5 minutes).
const DEFAULT_RECV_TIMEOUT: Duration = Duration::from_secs(300);

/// Line-framed transport over any byte stream: a TCP socket, a serial
/// device, or an in-process duplex pipe.
pub struct LineTransport<S> {
    reader: BufReader<ReadHalf<S>>,
    writer: WriteHalf<S>,
    send_timeout: Duration,
    recv_timeout: Duration,
}

impl<S> LineTransport<S>
where
    S: AsyncRead + AsyncWrite + Send + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self::with_timeouts(stream, DEFAULT_SEND_TIMEOUT, DEFAULT_RECV_TIMEOUT)
    }

    pub fn with_timeouts(stream: S, send_timeout: Duration, recv_timeout: Duration) -> Self {
        let (read_half, writer) = split(stream);
        Self {
            reader: BufReader::new(read_half),
            writer,
            send_timeout,
            recv_timeout,
        }
    }

    /// Read one raw line, at most [`MAX_FRAME_LEN`] bytes.
    async fn read_line(&mut self) -> anyhow::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(MAX_FRAME_LEN);
        let n = (&mut self.reader)
            .take(MAX_FRAME_LEN as u64)
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::ConnectionReset {
                    anyhow::anyhow!("Connection reset by peer")
                } else {
                    anyhow::anyhow!("Read error: {}", e)
                }
            })?;
        if n == 0 {
            return Err(anyhow::anyhow!("Connection closed by peer"));
        }
        if buf.last() != Some(&b'\n') {
            if n < MAX_FRAME_LEN {
                return Err(anyhow::anyhow!("Connection closed mid-frame"));
            }
            self.discard_rest_of_line().await?;
            return Err(FrameError::new(TransportErrorKind::PayloadLengthExceeded).into());
        }
        Ok(buf)
    }

    /// Skip to the end of an oversized line so the next read starts on a frame boundary.
    async fn discard_rest_of_line(&mut self) -> anyhow::Result<()> {
        let mut sink = Vec::new();
        loop {
            sink.clear();
            let n = (&mut self.reader)
                .take(MAX_FRAME_LEN as u64)
                .read_until(b'\n', &mut sink)
                .await?;
            if n == 0 || sink.last() == Some(&b'\n') {
                return Ok(());
            }
        }
    }
}

impl LineTransport<TcpStream> {
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        Ok(Self::new(stream))
    }
}

#[async_trait::async_trait]
impl<S> Transport for LineTransport<S>
where
    S: AsyncRead + AsyncWrite + Send + Sync + Unpin,
{
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let Some(line) = frame::encode(&msg) else {
            return Ok(());
        };
        let send_timeout = self.send_timeout;
        let writer = &mut self.writer;
        let send_op = async {
            writer.write_all(line.as_bytes()).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::BrokenPipe
                    || e.kind() == std::io::ErrorKind::ConnectionReset
                {
                    anyhow::anyhow!("Connection closed by peer")
                } else {
                    anyhow::anyhow!("Write error: {}", e)
                }
            })?;
            writer.flush().await?;
            anyhow::Ok(())
        };
        timeout(send_timeout, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", send_timeout))?
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        let recv_timeout = self.recv_timeout;
        let raw = timeout(recv_timeout, self.read_line())
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", recv_timeout))??;
        let text = std::str::from_utf8(&raw)
            .map_err(|_| FrameError::new(TransportErrorKind::ParseFailure))?;
        let msg = frame::decode(text).map_err(FrameError::new)?;
        log::trace!("received {:?}", msg);
        Ok(msg)
    }
}
