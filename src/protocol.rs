//! Coordinator/worker wire protocol for the external sweep driver.
//!
//! The sweep driver itself runs many independent simulations in
//! parallel, one per worker, and is out of scope here: this module only
//! exposes the interface such a driver needs. Rather than depend on a
//! real MPI binding, the four message tags are modeled as a small
//! transport-agnostic [`PeerChannel`] trait. `InProcessChannel` backs it
//! with `std::sync::mpsc`, which is enough to exercise the protocol
//! end-to-end in tests and in `sweep_demo` without linking against a
//! real MPI implementation. A production driver would hand discrete
//! typed payloads between a coordinator and worker processes over an
//! actual point-to-point transport instead of sharing memory.

use crate::error::{Result, SimError};

/// Tag 0: coordinator -> peer, minimum expansion factor.
pub const TAG_EXPANSION_MIN: u8 = 0;
/// Tag 1: coordinator -> peer, expansion factor step.
pub const TAG_EXPANSION_STEP: u8 = 1;
/// Tag 2: peer -> coordinator, correlation vector length.
pub const TAG_CORRELATION_LEN: u8 = 2;
/// Tag 3: peer -> coordinator, correlation vector values.
pub const TAG_CORRELATION_DATA: u8 = 3;

/// One message exchanged between the coordinator and a peer. Carries
/// its tag alongside the payload so an implementation backed by a real
/// point-to-point transport (MPI or otherwise) can route on it
/// directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    ExpansionMin(f64),
    ExpansionStep(f64),
    CorrelationLen(u32),
    CorrelationData(Vec<f64>),
}

impl Message {
    pub fn tag(&self) -> u8 {
        match self {
            Message::ExpansionMin(_) => TAG_EXPANSION_MIN,
            Message::ExpansionStep(_) => TAG_EXPANSION_STEP,
            Message::CorrelationLen(_) => TAG_CORRELATION_LEN,
            Message::CorrelationData(_) => TAG_CORRELATION_DATA,
        }
    }
}

/// Point-to-point send/receive between one peer and the coordinator.
/// Sends precede matching receives; no other ordering is assumed.
pub trait PeerChannel {
    fn send(&self, message: Message) -> Result<()>;
    fn recv(&self) -> Result<Message>;
}

/// `std::sync::mpsc`-backed `PeerChannel`, for in-process use (tests,
/// `sweep_demo`). A real driver would back `PeerChannel` with an actual
/// inter-process transport instead.
pub struct InProcessChannel {
    tx: std::sync::mpsc::Sender<Message>,
    rx: std::sync::mpsc::Receiver<Message>,
}

impl InProcessChannel {
    /// Builds a connected pair: `(coordinator_side, peer_side)`, each
    /// able to send to and receive from the other.
    pub fn pair() -> (InProcessChannel, InProcessChannel) {
        let (tx_a, rx_a) = std::sync::mpsc::channel();
        let (tx_b, rx_b) = std::sync::mpsc::channel();
        (
            InProcessChannel { tx: tx_a, rx: rx_b },
            InProcessChannel { tx: tx_b, rx: rx_a },
        )
    }
}

impl PeerChannel for InProcessChannel {
    fn send(&self, message: Message) -> Result<()> {
        self.tx
            .send(message)
            .map_err(|e| SimError::Transport(e.to_string()))
    }

    fn recv(&self) -> Result<Message> {
        self.rx
            .recv()
            .map_err(|e| SimError::Transport(e.to_string()))
    }
}

/// Computes this peer's expansion factor: `a_min + rank * step`.
/// Rank 0 (the coordinator) always gets `a = a_min`.
pub fn expansion_factor_for_rank(a_min: f64, step: f64, rank: usize) -> f64 {
    a_min + rank as f64 * step
}

/// Derives the expansion step from `a_min`, `a_max`, and `num_proc`,
/// rejecting `num_proc < 2` rather than dividing by zero (see
/// DESIGN.md).
pub fn expansion_step(a_min: f64, a_max: f64, num_proc: usize) -> Result<f64> {
    if num_proc < 2 {
        return Err(SimError::Configuration(format!(
            "sweep requires at least 2 workers, got {}",
            num_proc
        )));
    }
    Ok((a_max - a_min) / (num_proc - 1) as f64)
}

/// Coordinator side of the handshake: sends `a_min` and `step` to one
/// peer, then receives back its correlation vector.
pub fn run_coordinator_handshake(
    channel: &impl PeerChannel,
    a_min: f64,
    step: f64,
) -> Result<Vec<f64>> {
    channel.send(Message::ExpansionMin(a_min))?;
    channel.send(Message::ExpansionStep(step))?;

    let len = match channel.recv()? {
        Message::CorrelationLen(n) => n as usize,
        other => {
            return Err(SimError::Transport(format!(
                "expected correlation length, got {:?}",
                other
            )))
        }
    };

    match channel.recv()? {
        Message::CorrelationData(values) => {
            if values.len() != len {
                return Err(SimError::Transport(format!(
                    "correlation length mismatch: announced {}, received {}",
                    len,
                    values.len()
                )));
            }
            Ok(values)
        }
        other => Err(SimError::Transport(format!(
            "expected correlation data, got {:?}",
            other
        ))),
    }
}

/// Peer side of the handshake: receives `a_min` and `step`, computes
/// its own expansion factor for `rank`, and sends back a correlation
/// vector.
pub fn run_peer_handshake(
    channel: &impl PeerChannel,
    rank: usize,
    correlation: Vec<f64>,
) -> Result<f64> {
    let a_min = match channel.recv()? {
        Message::ExpansionMin(v) => v,
        other => {
            return Err(SimError::Transport(format!(
                "expected expansion minimum, got {:?}",
                other
            )))
        }
    };
    let step = match channel.recv()? {
        Message::ExpansionStep(v) => v,
        other => {
            return Err(SimError::Transport(format!(
                "expected expansion step, got {:?}",
                other
            )))
        }
    };

    channel.send(Message::CorrelationLen(correlation.len() as u32))?;
    channel.send(Message::CorrelationData(correlation))?;

    Ok(expansion_factor_for_rank(a_min, step, rank))
}
