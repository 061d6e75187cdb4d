//! Channel-backed resource host.
//!
//! Implements [`ResourceHost`] on top of the static `OUTBOUND` channel
//! drained by the UDP I/O task.  Remembers which peer asked each
//! in-flight request so the dispatcher's answer can be routed back.

use std::net::SocketAddr;

use heapless::FnvIndexMap;
use log::{debug, info, warn};

use crate::app::ports::ResourceHost;
use crate::app::resources::{RequestId, Resource, Response, ResponseCode};
use crate::error::TransportError;
use crate::net::channels::{OUTBOUND, OutboundMsg};
use crate::net::codec;

/// Requests awaiting an answer.  Must be a power of two.
const MAX_IN_FLIGHT: usize = 16;

#[derive(Default)]
pub struct ChannelResourceHost {
    pending: FnvIndexMap<RequestId, SocketAddr, MAX_IN_FLIGHT>,
    registered: heapless::Vec<Resource, 5>,
}

impl ChannelResourceHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route the answer to `id` back to `peer`.
    pub fn track(&mut self, id: RequestId, peer: SocketAddr) -> Result<(), TransportError> {
        self.pending
            .insert(id, peer)
            .map(|_| ())
            .map_err(|_| TransportError::ChannelFull)
    }

    /// Answer `peer` without involving the dispatcher.
    pub fn reject(&mut self, peer: SocketAddr, code: ResponseCode) {
        push(OutboundMsg::Reply {
            peer,
            data: codec::encode(code, ""),
        });
    }
}

fn push(msg: OutboundMsg) {
    if OUTBOUND.try_send(msg).is_err() {
        warn!("REST: {}, datagram dropped", TransportError::ChannelFull);
    }
}

impl ResourceHost for ChannelResourceHost {
    fn register(&mut self, resource: Resource) {
        if !self.registered.contains(&resource) && self.registered.push(resource).is_ok() {
            info!("REST: registered {}", resource);
        }
    }

    fn respond(&mut self, response: Response) {
        let Some(peer) = self.pending.remove(&response.id) else {
            debug!("REST: no peer for request {}", response.id);
            return;
        };
        push(OutboundMsg::Reply {
            peer,
            data: codec::encode(response.code, &response.body),
        });
    }

    fn notify(&mut self, resource: Resource, body: &str) {
        push(OutboundMsg::Notify {
            resource,
            data: codec::encode(ResponseCode::Content, body),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_goes_to_the_asking_peer() {
        let peer = SocketAddr::from(([127, 0, 0, 1], 40_000));
        let mut host = ChannelResourceHost::new();
        host.register(Resource::Systems);
        host.register(Resource::Systems);
        assert_eq!(host.registered.as_slice(), [Resource::Systems]);

        host.track(3, peer).unwrap();
        host.respond(Response::empty(99, ResponseCode::Changed));
        assert_eq!(host.pending.len(), 1);

        host.respond(Response::empty(3, ResponseCode::Conflict));
        assert!(host.pending.is_empty());

        // Drain what this test pushed; other tests do not use the channel.
        let mut found = false;
        while let Ok(msg) = OUTBOUND.try_receive() {
            if let OutboundMsg::Reply { peer: p, data } = msg {
                found |= p == peer && data.as_slice() == b"4.09 Conflict";
            }
        }
        assert!(found);
    }
}
