// Domain layer: entity records, action payloads and the service port.

pub mod model;
pub mod ports;
