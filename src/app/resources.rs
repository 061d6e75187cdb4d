//! Resource message types shared by the core and the transport.
//!
//! | Resource              | Method | Answer                                   |
//! |-----------------------|--------|------------------------------------------|
//! | `temperature`         | GET    | `2.05 {"temperature":N}` (also observed) |
//! | `systems`             | GET    | `2.05 {"heating":b,"cooling":b,"ventilation":b}` |
//! | `systems/cooling`     | POST   | `2.04` summary, or `4.09` on conflict    |
//! | `systems/heating`     | POST   | `2.04` summary, or `4.09` on conflict    |
//! | `systems/ventilation` | POST   | `2.04` summary                           |

use core::fmt;

use serde::Serialize;

use crate::environment::SystemsSummary;

use super::ports::Subsystem;

/// Per-boot request sequence number.
pub type RequestId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Every externally visible resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Temperature,
    Systems,
    Cooling,
    Heating,
    Ventilation,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Self::Temperature,
        Self::Systems,
        Self::Cooling,
        Self::Heating,
        Self::Ventilation,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Systems => "systems",
            Self::Cooling => "systems/cooling",
            Self::Heating => "systems/heating",
            Self::Ventilation => "systems/ventilation",
        }
    }

    /// Parse a URI path; a leading `/` is accepted.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.strip_prefix('/').unwrap_or(path);
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    /// The single method each resource answers to.
    pub fn method(self) -> Method {
        match self {
            Self::Temperature | Self::Systems => Method::Get,
            Self::Cooling | Self::Heating | Self::Ventilation => Method::Post,
        }
    }

    /// The subsystem a toggle resource controls.
    pub fn subsystem(self) -> Option<Subsystem> {
        match self {
            Self::Cooling => Some(Subsystem::Cooling),
            Self::Heating => Some(Subsystem::Heating),
            Self::Ventilation => Some(Subsystem::Ventilation),
            Self::Temperature | Self::Systems => None,
        }
    }

    pub fn for_subsystem(subsystem: Subsystem) -> Self {
        match subsystem {
            Subsystem::Cooling => Self::Cooling,
            Subsystem::Heating => Self::Heating,
            Subsystem::Ventilation => Self::Ventilation,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// An inbound request, already parsed by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub id: RequestId,
    pub method: Method,
    pub resource: Resource,
}

/// CoAP-style response codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    /// 2.04
    Changed,
    /// 2.05
    Content,
    /// 4.00
    BadRequest,
    /// 4.04
    NotFound,
    /// 4.05
    MethodNotAllowed,
    /// 4.09
    Conflict,
    /// 5.03
    ServiceUnavailable,
}

impl ResponseCode {
    pub fn code(self) -> &'static str {
        match self {
            Self::Changed => "2.04",
            Self::Content => "2.05",
            Self::BadRequest => "4.00",
            Self::NotFound => "4.04",
            Self::MethodNotAllowed => "4.05",
            Self::Conflict => "4.09",
            Self::ServiceUnavailable => "5.03",
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Self::Changed => "Changed",
            Self::Content => "Content",
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::Conflict => "Conflict",
            Self::ServiceUnavailable => "Service Unavailable",
        }
    }
}

/// Answer to one [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub id: RequestId,
    pub code: ResponseCode,
    /// JSON, or empty.
    pub body: String,
}

impl Response {
    pub fn empty(id: RequestId, code: ResponseCode) -> Self {
        Self {
            id,
            code,
            body: String::new(),
        }
    }
}

#[derive(Serialize)]
struct TemperatureBody {
    temperature: i32,
}

/// `{"temperature":N}`
pub fn temperature_body(celsius: i32) -> String {
    serde_json::to_string(&TemperatureBody {
        temperature: celsius,
    })
    .unwrap_or_default()
}

/// `{"heating":b,"cooling":b,"ventilation":b}`
pub fn systems_body(summary: &SystemsSummary) -> String {
    serde_json::to_string(summary).unwrap_or_default()
}
