use crate::mux::MuxSender;
use crate::MuxError;
use bytes::Bytes;
use log::{trace, warn};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};
use tokio::time::Instant;

/// Largest number of payloads a session queue can hold
pub const MAX_QUEUE_CAPACITY: usize = 1 << 16;

/// Producer side of the queue of one remote peer. It is owned by the
/// demultiplexer task and is never shared with consumers.
#[derive(Debug)]
pub struct CandidateSession {
    peer_addr: SocketAddr,
    last_recv: Instant,
    tx: broadcast::Sender<Bytes>,
}

impl CandidateSession {
    /// Creates a session for `peer_addr` whose queue holds `capacity`
    /// payloads before dropping the oldest one. `capacity` is clamped to
    /// `1..=`[`MAX_QUEUE_CAPACITY`].
    /// # Returns:
    /// The session and the receiver its consumer reads from.
    pub fn new(peer_addr: SocketAddr, capacity: usize) -> (Self, SessionReceiver) {
        let capacity = capacity.clamp(1, MAX_QUEUE_CAPACITY);
        // The channel rounds its size up to a power of two, the receiver
        // trims the queue down to `capacity`
        let (tx, rx) = broadcast::channel(capacity);
        let session = CandidateSession {
            peer_addr,
            last_recv: Instant::now(),
            tx,
        };
        let receiver = SessionReceiver {
            peer_addr,
            capacity,
            rx,
        };
        (session, receiver)
    }

    /// Last address the peer sent a datagram from
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Time the last datagram was received
    pub fn last_recv(&self) -> Instant {
        self.last_recv
    }

    /// Records `addr` as the current peer address and enqueues `payload`.
    /// It never waits: when the queue is full the oldest payload is lost.
    /// # Returns:
    /// `false` if nobody is reading from this session anymore.
    pub fn on_recv(&mut self, payload: Bytes, addr: SocketAddr) -> bool {
        self.peer_addr = addr;
        self.last_recv = Instant::now();
        trace!("Enqueue {} bytes for {}", payload.len(), addr);
        self.tx.send(payload).is_ok()
    }

    /// Returns `true` if no datagram arrived within `timeout` before `now`
    pub fn is_idle(&self, now: Instant, timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_recv) >= timeout
    }
}

/// Consumer side of the queue of one remote peer
#[derive(Debug)]
pub struct SessionReceiver {
    peer_addr: SocketAddr,
    capacity: usize,
    rx: broadcast::Receiver<Bytes>,
}

impl SessionReceiver {
    /// Waits for the next payload. When more than the session capacity is
    /// queued, the oldest payloads are dropped first.
    /// # Returns:
    /// The payloads in the order they were received, or `None` once the
    /// session has been destroyed and its queue drained.
    pub async fn recv(&mut self) -> Option<Bytes> {
        loop {
            self.drop_excess();
            match self.rx.recv().await {
                // A burst arrived while waiting, this one is among the oldest
                Ok(_) if self.rx.len() >= self.capacity => {
                    warn!("Session {} lagged, 1 payload dropped", self.peer_addr);
                }
                Ok(payload) => return Some(payload),
                Err(RecvError::Lagged(lost)) => {
                    warn!("Session {} lagged, {} payloads dropped", self.peer_addr, lost);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    fn drop_excess(&mut self) {
        let mut lost = 0;
        while self.rx.len() > self.capacity {
            match self.rx.try_recv() {
                Ok(_) => lost += 1,
                Err(TryRecvError::Lagged(n)) => lost += n,
                Err(_) => break,
            }
        }
        if lost > 0 {
            warn!("Session {} lagged, {} payloads dropped", self.peer_addr, lost);
        }
    }
}

/// A remote peer announced by [`UdpMux::accept`](crate::UdpMux::accept).
///
/// # Examples
///```rust,no_run
/// # use stun_mux::{MuxConfig, UdpMux};
/// # use std::error::Error;
/// #
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn Error>> {
/// let mut mux = UdpMux::bind(MuxConfig::default()).await?;
/// while let Some(mut candidate) = mux.accept().await {
///     tokio::spawn(async move {
///         while let Some(payload) = candidate.recv().await {
///             let _ = candidate.send(payload).await;
///         }
///     });
/// }
/// #
/// #   Ok(())
/// # }
///```
#[derive(Debug)]
pub struct Candidate {
    receiver: SessionReceiver,
    sender: MuxSender,
}

impl Candidate {
    pub(crate) fn new(receiver: SessionReceiver, sender: MuxSender) -> Self {
        Candidate { receiver, sender }
    }

    /// Address of the remote peer
    pub fn peer_addr(&self) -> SocketAddr {
        self.receiver.peer_addr
    }

    /// Waits for the next datagram sent by the peer. See
    /// [`SessionReceiver::recv`].
    pub async fn recv(&mut self) -> Option<Bytes> {
        self.receiver.recv().await
    }

    /// Sends `payload` to the peer through the demultiplexer's socket
    /// # Returns:
    /// The number of bytes sent.
    pub async fn send<T>(&self, payload: T) -> Result<usize, MuxError>
    where
        T: Into<Bytes>,
    {
        self.sender.send_to(payload, self.peer_addr()).await
    }
}
