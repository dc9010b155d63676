// Domain layer: records, the in-memory session and the ports the booking service depends on.

pub mod model;
pub mod ports;
pub mod session;
