//! UDP resource transport.
//!
//! ```text
//!  ┌──────────────┐  InboundMsg   ┌──────────────────┐
//!  │   I/O Task   │──────────────▶│  Control loop    │
//!  │  (async)     │◀──────────────│  (dispatcher)    │
//!  └──────────────┘  OutboundMsg  └──────────────────┘
//! ```
//!
//! The I/O task owns the socket and the observer list; the control loop
//! only ever sees parsed requests and hands back encoded datagrams.

pub mod channels;
pub mod codec;
pub mod io_task;
