use crate::config::MuxConfig;
use crate::session::{Candidate, CandidateSession};
use crate::MuxError;
use bytes::Bytes;
use log::{debug, info, trace, warn};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

const COMMAND_CHANNEL_SIZE: usize = 32;
const MIN_SWEEP_PERIOD: Duration = Duration::from_millis(1);

type SendResult = Result<usize, MuxError>;

/// State of the demultiplexer socket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuxState {
    /// No socket has been bound yet
    Unbound,
    /// The socket is bound and datagrams are dispatched
    Bound,
    /// The socket is closed, nothing else will be dispatched
    Closed,
}

impl fmt::Display for MuxState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MuxState::Unbound => write!(f, "unbound"),
            MuxState::Bound => write!(f, "bound"),
            MuxState::Closed => write!(f, "closed"),
        }
    }
}

#[derive(Debug)]
struct SendDatagram {
    payload: Bytes,
    addr: SocketAddr,
    tx: oneshot::Sender<SendResult>,
}

/// Handle used to send datagrams through the demultiplexer's socket.
/// It can be cloned and moved to other tasks.
#[derive(Debug, Clone)]
pub struct MuxSender {
    tx: mpsc::Sender<SendDatagram>,
}

impl MuxSender {
    /// Sends `payload` to `addr`
    /// # Returns:
    /// The number of bytes sent, [`MuxError::Socket`] if the socket failed
    /// or [`MuxError::Closed`] if the demultiplexer is closed.
    pub async fn send_to<T>(&self, payload: T, addr: SocketAddr) -> SendResult
    where
        T: Into<Bytes>,
    {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(SendDatagram {
                payload: payload.into(),
                addr,
                tx,
            })
            .await
            .map_err(|_| MuxError::Closed)?;
        rx.await.map_err(|_| MuxError::Closed)?
    }
}

struct UdpMuxActor {
    config: MuxConfig,
    socket: Arc<UdpSocket>,
    sessions: HashMap<SocketAddr, CandidateSession>,
    sender: MuxSender,
    rx: mpsc::Receiver<SendDatagram>,
    accept_tx: mpsc::Sender<Candidate>,
    shutdown: oneshot::Receiver<()>,
    state: watch::Sender<MuxState>,
    socket_errors: usize,
}

impl UdpMuxActor {
    fn on_datagram(&mut self, payload: &[u8], addr: SocketAddr) {
        trace!("Received {} bytes from {}", payload.len(), addr);

        if self.config.validate_attributes() {
            if let Err(e) = stun_attrs::decode_attributes(payload, None) {
                debug!("Dropping datagram from {}: {}", addr, e);
                return;
            }
        }

        let payload = Bytes::copy_from_slice(payload);
        if let Some(session) = self.sessions.get_mut(&addr) {
            if session.on_recv(payload.clone(), addr) {
                return;
            }
            debug!("Session {} has no consumer, replacing it", addr);
            self.sessions.remove(&addr);
        }
        self.open_session(payload, addr);
    }

    fn open_session(&mut self, payload: Bytes, addr: SocketAddr) {
        let (mut session, receiver) = CandidateSession::new(addr, self.config.queue_capacity());
        // Queued before the candidate is announced, the receiver is alive
        session.on_recv(payload, addr);

        let candidate = Candidate::new(receiver, self.sender.clone());
        match self.accept_tx.try_send(candidate) {
            Ok(()) => {
                debug!("New session for {}", addr);
                self.sessions.insert(addr, session);
            }
            Err(TrySendError::Full(_)) => {
                debug!("Accept backlog full, dropping datagram from {}", addr);
            }
            Err(TrySendError::Closed(_)) => {
                debug!("Nobody accepts sessions, dropping datagram from {}", addr);
            }
        }
    }

    // Returns false when the socket must be closed
    fn on_recv(&mut self, result: io::Result<(usize, SocketAddr)>, buffer: &[u8]) -> bool {
        match result {
            Ok((size, addr)) => {
                self.socket_errors = 0;
                // The buffer holds one byte more than the largest datagram
                if size >= buffer.len() {
                    debug!("Dropping oversized datagram from {}", addr);
                } else {
                    self.on_datagram(&buffer[..size], addr);
                }
                true
            }
            Err(e) => {
                self.socket_errors += 1;
                warn!(
                    "Receive error ({}/{}): {}",
                    self.socket_errors,
                    self.config.max_socket_errors(),
                    e
                );
                self.socket_errors < self.config.max_socket_errors()
            }
        }
    }

    fn send_datagram(&mut self, msg: SendDatagram) {
        trace!("Sending {} bytes to {}", msg.payload.len(), msg.addr);
        match self.socket.try_send_to(&msg.payload, msg.addr) {
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                // Wait for the socket outside the dispatch loop
                let socket = self.socket.clone();
                tokio::spawn(async move {
                    let result = socket.send_to(&msg.payload, msg.addr).await;
                    reply_send(msg, result);
                });
            }
            result => reply_send(msg, result),
        }
    }

    fn expire_sessions(&mut self) {
        let now = Instant::now();
        let timeout = self.config.idle_timeout();
        self.sessions.retain(|addr, session| {
            let idle = session.is_idle(now, timeout);
            if idle {
                debug!("Session {} expired", addr);
            }
            !idle
        });
    }

    async fn main_loop(&mut self) {
        // One extra byte tells truncated datagrams apart
        let mut buffer = vec![0u8; self.config.recv_buffer_size() + 1];

        let period = (self.config.idle_timeout() / 2).max(MIN_SWEEP_PERIOD);
        let mut sweep = tokio::time::interval(period);
        sweep.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut self.shutdown => {
                    debug!("Shutdown requested");
                    break;
                }
                result = self.socket.recv_from(&mut buffer) => {
                    if !self.on_recv(result, &buffer) {
                        warn!("Too many receive errors, closing socket");
                        break;
                    }
                }
                Some(msg) = self.rx.recv() => {
                    self.send_datagram(msg);
                }
                _ = sweep.tick() => {
                    self.expire_sessions();
                }
            }
        }

        // Dropping the sessions releases every pending consumer
        self.sessions.clear();
        self.state.send_replace(MuxState::Closed);
        info!("Socket closed");
    }
}

fn reply_send(msg: SendDatagram, result: io::Result<usize>) {
    let result = result.map_err(MuxError::Socket);
    if let Err(e) = &result {
        warn!("Can not send datagram to {}: {}", msg.addr, e);
    }
    // The caller may have given up waiting
    let _ = msg.tx.send(result);
}

/// Demultiplexer that owns one UDP socket and routes every inbound
/// datagram to the [`Candidate`] of its sender address.
///
/// All sockets and session state live in a single task. Consumers only
/// talk to it through channels, so no locks are involved. Dropping the
/// [`UdpMux`] closes it as [`UdpMux::close`] does.
///
/// # Examples
///```rust
/// # use stun_mux::{MuxConfig, MuxState, UdpMux};
/// # use tokio::net::UdpSocket;
/// # use std::error::Error;
/// #
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn Error>> {
/// let mut mux = UdpMux::bind(MuxConfig::default()).await?;
/// assert_eq!(mux.state(), MuxState::Bound);
///
/// let peer = UdpSocket::bind("127.0.0.1:0").await?;
/// peer.send_to(b"ping", mux.local_addr()).await?;
///
/// let mut candidate = mux.accept().await.expect("Candidate expected");
/// assert_eq!(candidate.peer_addr(), peer.local_addr()?);
/// assert_eq!(candidate.recv().await.as_deref(), Some(&b"ping"[..]));
///
/// mux.close().await;
/// assert_eq!(mux.state(), MuxState::Closed);
/// assert_eq!(candidate.recv().await, None);
/// #
/// #   Ok(())
/// # }
///```
#[derive(Debug)]
pub struct UdpMux {
    local_addr: SocketAddr,
    sender: MuxSender,
    accept_rx: mpsc::Receiver<Candidate>,
    state: watch::Receiver<MuxState>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl UdpMux {
    /// Binds the socket and spawns the task that serves it. It must be
    /// called within a tokio runtime.
    /// # Returns:
    /// The demultiplexer or [`MuxError::Socket`] if the socket can not
    /// be bound.
    pub async fn bind(config: MuxConfig) -> Result<Self, MuxError> {
        let (state_tx, state_rx) = watch::channel(MuxState::Unbound);

        let socket = UdpSocket::bind(config.bind_addr())
            .await
            .map_err(MuxError::Socket)?;
        let local_addr = socket.local_addr().map_err(MuxError::Socket)?;
        state_tx.send_replace(MuxState::Bound);
        info!("Bound to {}", local_addr);

        let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        let (accept_tx, accept_rx) = mpsc::channel(config.accept_backlog().max(1));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let sender = MuxSender { tx };

        let mut actor = UdpMuxActor {
            config,
            socket: Arc::new(socket),
            sessions: HashMap::new(),
            sender: sender.clone(),
            rx,
            accept_tx,
            shutdown: shutdown_rx,
            state: state_tx,
            socket_errors: 0,
        };
        let handle = tokio::spawn(async move {
            actor.main_loop().await;
        });

        Ok(UdpMux {
            local_addr,
            sender,
            accept_rx,
            state: state_rx,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Local address the socket is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Current state of the socket
    pub fn state(&self) -> MuxState {
        *self.state.borrow()
    }

    /// Waits for the first datagram of a new peer.
    /// # Returns:
    /// The [`Candidate`] of that peer, or `None` once the demultiplexer
    /// is closed.
    pub async fn accept(&mut self) -> Option<Candidate> {
        self.accept_rx.recv().await
    }

    /// Returns a handle to send datagrams through the socket
    pub fn sender(&self) -> MuxSender {
        self.sender.clone()
    }

    /// Closes the socket. Dispatching stops, every session is dropped and
    /// pending [`Candidate::recv`] calls complete with `None`. Calling it
    /// more than once has no effect.
    pub async fn close(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // The task may already be gone after too many socket errors
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Demultiplexer task failed: {}", e);
            }
        }

        // Sessions announced but never accepted are dead already
        self.accept_rx.close();
        while self.accept_rx.try_recv().is_ok() {}
    }
}
