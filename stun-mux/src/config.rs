use crate::session::MAX_QUEUE_CAPACITY;
use crate::MuxError;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_QUEUE_CAPACITY: usize = 1024;
const DEFAULT_ACCEPT_BACKLOG: usize = 128;
const DEFAULT_RECV_BUFFER_SIZE: usize = 2048;
const DEFAULT_MAX_SOCKET_ERRORS: usize = 16;

const MAX_ACCEPT_BACKLOG: usize = 1 << 16;
// Largest UDP payload
const MAX_RECV_BUFFER_SIZE: usize = 65535;

/// Settings used by [`UdpMux`](crate::UdpMux). Use [`MuxConfigBuilder`]
/// to create one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuxConfig {
    bind_addr: SocketAddr,
    idle_timeout: Duration,
    queue_capacity: usize,
    accept_backlog: usize,
    recv_buffer_size: usize,
    max_socket_errors: usize,
    validate_attributes: bool,
}

impl MuxConfig {
    /// Local address the socket is bound to
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Time without datagrams after which a session expires
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Number of payloads a session keeps before dropping the oldest,
    /// between 1 and [`MAX_QUEUE_CAPACITY`](crate::MAX_QUEUE_CAPACITY)
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    /// Number of new sessions waiting to be accepted
    pub fn accept_backlog(&self) -> usize {
        self.accept_backlog
    }

    /// Size of the buffer used to receive datagrams
    pub fn recv_buffer_size(&self) -> usize {
        self.recv_buffer_size
    }

    /// Consecutive receive errors tolerated before closing
    pub fn max_socket_errors(&self) -> usize {
        self.max_socket_errors
    }

    /// Whether datagrams must decode as a sequence of STUN attributes
    pub fn validate_attributes(&self) -> bool {
        self.validate_attributes
    }
}

impl Default for MuxConfig {
    fn default() -> Self {
        MuxConfig {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            accept_backlog: DEFAULT_ACCEPT_BACKLOG,
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
            max_socket_errors: DEFAULT_MAX_SOCKET_ERRORS,
            validate_attributes: false,
        }
    }
}

/// Builder class used to construct [`MuxConfig`] objects
///
/// # Examples
///```rust
/// # use stun_mux::MuxConfigBuilder;
/// # use std::time::Duration;
/// # use std::error::Error;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let config = MuxConfigBuilder::default()
///     .with_bind_addr("127.0.0.1:3478".parse()?)
///     .with_idle_timeout(Duration::from_secs(5))
///     .with_attribute_validation()
///     .build()?;
///
/// assert_eq!(config.bind_addr().port(), 3478);
/// assert_eq!(config.queue_capacity(), 1024);
/// assert!(config.validate_attributes());
/// #
/// #   Ok(())
/// # }
///```
#[derive(Debug, Default)]
pub struct MuxConfigBuilder(MuxConfig);

impl MuxConfigBuilder {
    /// Sets the local address to bind the socket to
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.0.bind_addr = addr;
        self
    }

    /// Sets the session idle timeout
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.0.idle_timeout = timeout;
        self
    }

    /// Sets the per-session queue capacity
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.0.queue_capacity = capacity;
        self
    }

    /// Sets how many new sessions can wait to be accepted
    pub fn with_accept_backlog(mut self, backlog: usize) -> Self {
        self.0.accept_backlog = backlog;
        self
    }

    /// Sets the receive buffer size
    pub fn with_recv_buffer_size(mut self, size: usize) -> Self {
        self.0.recv_buffer_size = size;
        self
    }

    /// Sets the number of consecutive receive errors tolerated
    pub fn with_max_socket_errors(mut self, errors: usize) -> Self {
        self.0.max_socket_errors = errors;
        self
    }

    /// Drops datagrams that do not decode as a sequence of STUN attributes
    pub fn with_attribute_validation(mut self) -> Self {
        self.0.validate_attributes = true;
        self
    }

    /// Creates the [`MuxConfig`]
    /// # Returns:
    /// The configuration or [`MuxError::InvalidConfig`] if any of the
    /// sizes or timeouts is zero, or the queue capacity exceeds
    /// [`MAX_QUEUE_CAPACITY`](crate::MAX_QUEUE_CAPACITY).
    pub fn build(self) -> Result<MuxConfig, MuxError> {
        let config = self.0;
        if config.queue_capacity == 0 {
            return Err(MuxError::InvalidConfig(String::from(
                "Queue capacity must be greater than zero",
            )));
        }
        if config.queue_capacity > MAX_QUEUE_CAPACITY {
            return Err(MuxError::InvalidConfig(format!(
                "Queue capacity {} > max. capacity {}",
                config.queue_capacity, MAX_QUEUE_CAPACITY
            )));
        }
        if config.accept_backlog == 0 {
            return Err(MuxError::InvalidConfig(String::from(
                "Accept backlog must be greater than zero",
            )));
        }
        if config.accept_backlog > MAX_ACCEPT_BACKLOG {
            return Err(MuxError::InvalidConfig(format!(
                "Accept backlog {} > max. backlog {}",
                config.accept_backlog, MAX_ACCEPT_BACKLOG
            )));
        }
        if config.recv_buffer_size == 0 {
            return Err(MuxError::InvalidConfig(String::from(
                "Receive buffer size must be greater than zero",
            )));
        }
        if config.recv_buffer_size > MAX_RECV_BUFFER_SIZE {
            return Err(MuxError::InvalidConfig(format!(
                "Receive buffer size {} > max. size {}",
                config.recv_buffer_size, MAX_RECV_BUFFER_SIZE
            )));
        }
        if config.idle_timeout.is_zero() {
            return Err(MuxError::InvalidConfig(String::from(
                "Idle timeout must be greater than zero",
            )));
        }
        Ok(config)
    }
}
