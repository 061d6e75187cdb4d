//! Inter-task channels between the UDP I/O task and the control loop.
//!
//! Static `embassy-sync` bounded channels; neither side ever blocks the
//! other.

use std::net::SocketAddr;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::app::resources::{Method, Resource};

use super::codec::Datagram;

/// Parsed request from a client, delivered to the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InboundMsg {
    pub peer: SocketAddr,
    pub method: Method,
    pub resource: Resource,
}

/// Encoded datagram from the control loop, delivered to the I/O task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMsg {
    /// Answer to one request.
    Reply { peer: SocketAddr, data: Datagram },
    /// Fan out to every observer of `resource`.
    Notify { resource: Resource, data: Datagram },
}

/// Channel depth for inbound requests.
const INBOUND_DEPTH: usize = 8;

/// Channel depth for outbound datagrams.
const OUTBOUND_DEPTH: usize = 16;

/// I/O task → control loop.
pub static INBOUND: Channel<CriticalSectionRawMutex, InboundMsg, INBOUND_DEPTH> = Channel::new();

/// Control loop → I/O task.
pub static OUTBOUND: Channel<CriticalSectionRawMutex, OutboundMsg, OUTBOUND_DEPTH> =
    Channel::new();

/// Next pending request, if any.
pub fn try_recv_inbound() -> Option<InboundMsg> {
    INBOUND.try_receive().ok()
}
