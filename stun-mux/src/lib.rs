//! UDP demultiplexer for ICE candidates.
//!
//! This crate owns one UDP socket and routes every inbound datagram to a
//! per-peer [`Candidate`] keyed by the sender address. Each candidate reads
//! its payloads in the order the socket received them; there is no
//! ordering across different peers.
//!
//! The dispatch path never waits for a consumer. Every session keeps a
//! bounded queue that drops its oldest payload when full, and sessions
//! that receive nothing for [`MuxConfig::idle_timeout`] are forgotten.
//!
//! Datagrams can optionally be checked with the [`stun_attrs`] codec: a
//! payload that does not decode as a sequence of STUN attributes is
//! dropped without affecting any other peer.
//!
//! # Usage
//!```rust
//! # use stun_mux::{MuxConfigBuilder, UdpMux};
//! # use stun_attrs::attributes::stun::Username;
//! # use stun_attrs::AttributeCodec;
//! # use tokio::net::UdpSocket;
//! # use std::error::Error;
//! #
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn Error>> {
//! let config = MuxConfigBuilder::default()
//!     .with_attribute_validation()
//!     .build()?;
//! let mut mux = UdpMux::bind(config).await?;
//!
//! let peer = UdpSocket::bind("127.0.0.1:0").await?;
//! let record = Username::new("evtj", "h6vY")?.to_record();
//! peer.send_to(&record, mux.local_addr()).await?;
//!
//! let mut candidate = mux.accept().await.expect("Candidate expected");
//! let payload = candidate.recv().await.expect("Payload expected");
//! assert_eq!(payload, record);
//!
//! // Reply through the demultiplexer's socket
//! candidate.send(payload).await?;
//! let mut buffer = [0u8; 64];
//! let (size, from) = peer.recv_from(&mut buffer).await?;
//! assert_eq!(&buffer[..size], record);
//! assert_eq!(from, mux.local_addr());
//!
//! mux.close().await;
//! #
//! #   Ok(())
//! # }
//!```

#![deny(missing_docs)]

mod config;
mod mux;
mod session;

pub use crate::config::{MuxConfig, MuxConfigBuilder};
pub use crate::mux::{MuxSender, MuxState, UdpMux};
pub use crate::session::{
    Candidate, CandidateSession, SessionReceiver, MAX_QUEUE_CAPACITY,
};

use std::error::Error;
use std::fmt;
use std::io;

/// Errors returned by the demultiplexer
#[derive(Debug)]
pub enum MuxError {
    /// Transport-level failure
    Socket(io::Error),
    /// The configuration can not be used
    InvalidConfig(String),
    /// The demultiplexer is closed
    Closed,
}

impl fmt::Display for MuxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MuxError::Socket(e) => write!(f, "socket error: {}", e),
            MuxError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            MuxError::Closed => write!(f, "demultiplexer closed"),
        }
    }
}

impl Error for MuxError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MuxError::Socket(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MuxError {
    fn from(e: io::Error) -> Self {
        MuxError::Socket(e)
    }
}
