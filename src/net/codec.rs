//! Text datagram codec.
//!
//! Requests are a single line, `<VERB> <path>`:
//!
//! ```text
//! GET temperature
//! GET systems
//! POST systems/cooling
//! OBSERVE temperature
//! CANCEL temperature
//! ```
//!
//! Responses and notifications are `<code> <reason>[ <json>]`, e.g.
//! `2.05 Content {"temperature":22}`.

use core::fmt::{self, Write};

use heapless::{String, Vec};

use crate::app::resources::{Method, Resource, ResponseCode};

/// Largest datagram the codec produces or accepts.
pub const MAX_DATAGRAM: usize = 256;

pub type Datagram = Vec<u8, MAX_DATAGRAM>;

/// One decoded client command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Request { method: Method, resource: Resource },
    Observe(Resource),
    Cancel(Resource),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Not UTF-8, empty, or not `<VERB> <path>`.
    Malformed,
    UnknownVerb,
    UnknownResource,
}

impl DecodeError {
    /// Code the transport answers with.
    pub fn response_code(self) -> ResponseCode {
        match self {
            Self::Malformed => ResponseCode::BadRequest,
            Self::UnknownVerb => ResponseCode::MethodNotAllowed,
            Self::UnknownResource => ResponseCode::NotFound,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed request line"),
            Self::UnknownVerb => write!(f, "unknown verb"),
            Self::UnknownResource => write!(f, "unknown resource"),
        }
    }
}

pub fn decode(datagram: &[u8]) -> Result<Command, DecodeError> {
    let line = core::str::from_utf8(datagram).map_err(|_| DecodeError::Malformed)?;
    let mut words = line.split_whitespace();
    let (Some(verb), Some(path), None) = (words.next(), words.next(), words.next()) else {
        return Err(DecodeError::Malformed);
    };

    let resource = Resource::from_path(path).ok_or(DecodeError::UnknownResource)?;
    match verb.to_ascii_uppercase().as_str() {
        "GET" => Ok(Command::Request {
            method: Method::Get,
            resource,
        }),
        "POST" => Ok(Command::Request {
            method: Method::Post,
            resource,
        }),
        "OBSERVE" => Ok(Command::Observe(resource)),
        "CANCEL" => Ok(Command::Cancel(resource)),
        _ => Err(DecodeError::UnknownVerb),
    }
}

/// `<code> <reason>[ <body>]`.  A body that does not fit is dropped.
pub fn encode(code: ResponseCode, body: &str) -> Datagram {
    let mut line: String<MAX_DATAGRAM> = String::new();
    // The status line alone always fits.
    let _ = write!(line, "{} {}", code.code(), code.reason());
    if !body.is_empty() {
        let mut with_body = line.clone();
        if write!(with_body, " {}", body).is_ok() {
            line = with_body;
        }
    }
    line.into_bytes()
}
