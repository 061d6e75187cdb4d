//! Resource interface task.
//!
//! Bridges the [`ResourceHost`] port and the subsystem tasks.  Reads are
//! answered in place from the environment; toggles are forwarded to the
//! owning subsystem task and answered when its `Reply` comes back, so
//! the response always reflects the state after the toggle.

use heapless::Vec;
use log::{debug, info, warn};

use crate::app::ports::ResourceHost;
use crate::app::resources::{
    Method, Request, Resource, Response, ResponseCode, systems_body, temperature_body,
};
use crate::config::SystemConfig;
use crate::events::{Event, TaskId, ToggleOutcome};

use super::Context;

pub struct ResourceTask {
    registered: Vec<Resource, 5>,
}

impl ResourceTask {
    /// Resources exposed under `config`: the read-only pair always, each
    /// toggle only when its subsystem is enabled.
    pub fn new(config: &SystemConfig) -> Self {
        let mut registered = Vec::new();
        for resource in Resource::ALL {
            let enabled = match resource {
                Resource::Temperature | Resource::Systems => true,
                Resource::Cooling => config.cooling_enabled,
                Resource::Heating => config.heating_enabled,
                Resource::Ventilation => config.ventilation_enabled,
            };
            if enabled {
                // Capacity equals Resource::ALL.len().
                let _ = registered.push(resource);
            }
        }
        Self { registered }
    }

    pub fn is_registered(&self, resource: Resource) -> bool {
        self.registered.contains(&resource)
    }

    pub fn handle<H, N: ResourceHost, S>(&mut self, event: Event, cx: &mut Context<'_, H, N, S>) {
        match event {
            Event::Start => {
                for &resource in &self.registered {
                    cx.net.register(resource);
                }
                info!("[REST] server started, {} resources", self.registered.len());
            }
            Event::Request(request) => self.on_request(request, cx),
            Event::Reply {
                request,
                subsystem,
                outcome,
            } => {
                let response = match outcome {
                    ToggleOutcome::Started | ToggleOutcome::Stopped => Response {
                        id: request,
                        code: ResponseCode::Changed,
                        body: systems_body(&cx.env.summary()),
                    },
                    ToggleOutcome::Conflict { .. } => Response::empty(request, ResponseCode::Conflict),
                };
                debug!("[REST] {} toggle -> {}", subsystem, response.code.code());
                cx.net.respond(response);
            }
            Event::Publish(celsius) => {
                cx.net.notify(Resource::Temperature, &temperature_body(celsius));
            }
            other => debug!("[REST] ignoring {:?}", other),
        }
    }

    fn on_request<H, N: ResourceHost, S>(&self, request: Request, cx: &mut Context<'_, H, N, S>) {
        let Request {
            id,
            method,
            resource,
        } = request;
        debug!("[REST] #{} {} {}", id, method.as_str(), resource);

        if !self.is_registered(resource) {
            cx.net.respond(Response::empty(id, ResponseCode::NotFound));
            return;
        }
        if resource.method() != method {
            cx.net.respond(Response::empty(id, ResponseCode::MethodNotAllowed));
            return;
        }

        match (method, resource.subsystem()) {
            (Method::Get, _) => {
                let body = if resource == Resource::Temperature {
                    temperature_body(cx.env.temperature())
                } else {
                    systems_body(&cx.env.summary())
                };
                cx.net.respond(Response {
                    id,
                    code: ResponseCode::Content,
                    body,
                });
            }
            (Method::Post, Some(subsystem)) => {
                let target = TaskId::for_subsystem(subsystem);
                if !cx.post(target, Event::Toggle(Some(id))) {
                    warn!("[REST] #{} {} toggle dropped", id, subsystem);
                    cx.net.respond(Response::empty(id, ResponseCode::ServiceUnavailable));
                }
            }
            (Method::Post, None) => {
                cx.net.respond(Response::empty(id, ResponseCode::MethodNotAllowed));
            }
        }
    }
}
