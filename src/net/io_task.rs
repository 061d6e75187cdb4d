//! Async UDP I/O task.
//!
//! Runs in a dedicated thread using `edge-executor` for cooperative
//! multi-task scheduling and `async-io-mini` for reactor-driven timers.
//! Two concurrent futures share the socket:
//!
//! 1. **Read**: polls the non-blocking socket every 2ms, decodes the
//!    request line, handles observe/cancel locally and forwards the rest
//!    to the control loop through `INBOUND`.
//! 2. **Write**: truly async via `OUTBOUND.receive().await`; replies go
//!    to their peer, notifications to every observer.
//!
//! ```text
//!  ┌──────────────────────────────────────────────┐
//!  │  I/O Thread                                  │
//!  │  ┌────────────────────────────────────────┐  │
//!  │  │  edge_executor::LocalExecutor          │  │
//!  │  │   ┌──────────┐     ┌───────────────┐   │  │
//!  │  │   │ Read     │     │ Write (async) │   │  │
//!  │  │   │ 2ms ⏱    │     │ wake-on-send  │   │  │
//!  │  │   └──────────┘     └───────────────┘   │  │
//!  │  └────────────────────────────────────────┘  │
//!  └──────────────────────────────────────────────┘
//! ```

use core::cell::RefCell;
use core::time::Duration;
use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::rc::Rc;

use heapless::Vec;
use log::{debug, info, warn};

use crate::app::resources::{Method, Resource, ResponseCode};
use crate::error::TransportError;

use super::channels::{INBOUND, InboundMsg, OUTBOUND, OutboundMsg};
use super::codec::{self, Command, MAX_DATAGRAM};

/// Most clients observing `temperature` at once.
pub const MAX_OBSERVERS: usize = 8;

const READ_POLL: Duration = Duration::from_millis(2);

// ── Observer registry ────────────────────────────────────────

/// Clients subscribed to the temperature feed.
#[derive(Debug, Default)]
pub struct Observers {
    peers: Vec<SocketAddr, MAX_OBSERVERS>,
}

impl Observers {
    /// Returns `false` if the list is full.  Re-subscribing is a no-op.
    pub fn add(&mut self, peer: SocketAddr) -> bool {
        if self.peers.contains(&peer) {
            return true;
        }
        self.peers.push(peer).is_ok()
    }

    pub fn remove(&mut self, peer: SocketAddr) {
        self.peers.retain(|p| *p != peer);
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SocketAddr> {
        self.peers.iter()
    }
}

// ── Datagram handling ────────────────────────────────────────

type SharedSocket = Rc<UdpSocket>;
type SharedObservers = Rc<RefCell<Observers>>;

fn forward(peer: SocketAddr, method: Method, resource: Resource) -> Option<ResponseCode> {
    let msg = InboundMsg {
        peer,
        method,
        resource,
    };
    if INBOUND.try_send(msg).is_err() {
        warn!("IO[{}]: {}, dropping request", peer, TransportError::ChannelFull);
        return Some(ResponseCode::ServiceUnavailable);
    }
    None
}

/// Act on one datagram.  Returns a code to answer with locally, or
/// `None` when the control loop will answer.
fn handle_datagram(peer: SocketAddr, data: &[u8], observers: &mut Observers) -> Option<ResponseCode> {
    let command = match codec::decode(data) {
        Ok(c) => c,
        Err(e) => {
            debug!("IO[{}]: {}: {}", peer, TransportError::Malformed, e);
            return Some(e.response_code());
        }
    };

    match command {
        Command::Request { method, resource } => forward(peer, method, resource),
        Command::Observe(Resource::Temperature) => {
            if !observers.add(peer) {
                warn!("IO[{}]: observer list full", peer);
                return Some(ResponseCode::ServiceUnavailable);
            }
            // First notification is the current value.
            let refused = forward(peer, Method::Get, Resource::Temperature);
            if refused.is_some() {
                observers.remove(peer);
            } else {
                info!("IO[{}]: observing temperature ({} observers)", peer, observers.len());
            }
            refused
        }
        Command::Cancel(Resource::Temperature) => {
            observers.remove(peer);
            info!("IO[{}]: observation cancelled", peer);
            Some(ResponseCode::Changed)
        }
        Command::Observe(_) | Command::Cancel(_) => Some(ResponseCode::MethodNotAllowed),
    }
}

fn send(socket: &UdpSocket, peer: SocketAddr, data: &[u8]) {
    if let Err(e) = socket.send_to(data, peer) {
        warn!("IO[{}]: {}: {}", peer, TransportError::SendFailed, e);
    }
}

// ── Async I/O loop ───────────────────────────────────────────

/// Read task: drains the non-blocking socket, then sleeps on a reactor
/// timer so the executor can service the write task.
async fn read_loop(socket: SharedSocket, observers: SharedObservers) {
    let mut buf = [0u8; MAX_DATAGRAM];
    loop {
        loop {
            match socket.recv_from(&mut buf) {
                Ok((n, peer)) => {
                    let local = handle_datagram(peer, &buf[..n], &mut observers.borrow_mut());
                    if let Some(code) = local {
                        send(&socket, peer, &codec::encode(code, ""));
                    }
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) => {
                    warn!("IO: recv failed: {}", e);
                    break;
                }
            }
        }
        async_io_mini::Timer::after(READ_POLL).await;
    }
}

/// Write task: wakes as soon as the control loop pushes a datagram.
async fn write_loop(socket: SharedSocket, observers: SharedObservers) {
    loop {
        match OUTBOUND.receive().await {
            OutboundMsg::Reply { peer, data } => send(&socket, peer, &data),
            OutboundMsg::Notify { resource, data } => {
                if resource != Resource::Temperature {
                    continue;
                }
                for peer in observers.borrow().iter() {
                    send(&socket, *peer, &data);
                }
            }
        }
    }
}

fn run_io_loop(socket: UdpSocket) {
    let executor: edge_executor::LocalExecutor<'_, 4> = edge_executor::LocalExecutor::new();

    let socket: SharedSocket = Rc::new(socket);
    let observers: SharedObservers = Rc::new(RefCell::new(Observers::default()));

    executor
        .spawn(read_loop(socket.clone(), observers.clone()))
        .detach();
    executor.spawn(write_loop(socket, observers)).detach();

    futures_lite::future::block_on(executor.run(core::future::pending::<()>()));
}

// ── Thread spawn ─────────────────────────────────────────────

/// Bind `0.0.0.0:port` and start the I/O thread.
///
/// Binding happens on the caller's thread so a taken port is reported
/// before the control loop starts.
pub fn spawn(port: u16) -> Result<std::thread::JoinHandle<()>, TransportError> {
    let socket = UdpSocket::bind(("0.0.0.0", port)).map_err(|e| {
        warn!("IO: bind to port {} failed: {}", port, e);
        TransportError::BindFailed
    })?;
    socket
        .set_nonblocking(true)
        .map_err(|_| TransportError::BindFailed)?;
    info!("IO: listening on udp/{}", port);

    std::thread::Builder::new()
        .name("thermostat-io".into())
        .stack_size(16 * 1024)
        .spawn(move || run_io_loop(socket))
        .map_err(|_| TransportError::BindFailed)
}

// ── Tests ────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(port: u16) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], port))
    }

    #[test]
    fn observers_are_bounded_and_deduplicated() {
        let mut obs = Observers::default();
        assert!(obs.add(peer(1)));
        assert!(obs.add(peer(1)));
        assert_eq!(obs.len(), 1);

        for p in 2..=MAX_OBSERVERS as u16 {
            assert!(obs.add(peer(p)));
        }
        assert!(!obs.add(peer(100)));

        obs.remove(peer(1));
        assert_eq!(obs.len(), MAX_OBSERVERS - 1);
    }

    #[test]
    fn local_answers_need_no_control_loop() {
        let mut obs = Observers::default();
        assert_eq!(
            handle_datagram(peer(5), b"GET humidity", &mut obs),
            Some(ResponseCode::NotFound)
        );
        assert_eq!(
            handle_datagram(peer(5), b"OBSERVE systems", &mut obs),
            Some(ResponseCode::MethodNotAllowed)
        );
        assert_eq!(
            handle_datagram(peer(5), b"CANCEL temperature", &mut obs),
            Some(ResponseCode::Changed)
        );
        assert!(obs.is_empty());
    }

    #[test]
    fn read_poll_timer_elapses() {
        let start = std::time::Instant::now();
        futures_lite::future::block_on(async_io_mini::Timer::after(READ_POLL));
        assert!(start.elapsed() >= READ_POLL);
    }

    #[test]
    fn observe_is_rolled_back_when_control_loop_is_saturated() {
        while INBOUND.try_receive().is_ok() {}
        let mut obs = Observers::default();

        assert_eq!(handle_datagram(peer(9), b"OBSERVE temperature", &mut obs), None);
        assert_eq!(obs.len(), 1);

        while INBOUND.try_send(InboundMsg {
            peer: peer(1),
            method: Method::Get,
            resource: Resource::Systems,
        })
        .is_ok()
        {}
        assert_eq!(
            handle_datagram(peer(10), b"OBSERVE temperature", &mut obs),
            Some(ResponseCode::ServiceUnavailable)
        );
        assert_eq!(obs.iter().copied().collect::<std::vec::Vec<_>>(), [peer(9)]);

        while INBOUND.try_receive().is_ok() {}
    }
}
