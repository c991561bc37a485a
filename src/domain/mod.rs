// Domain layer: grid model and ports. Adapters and the pipeline depend on this, never the reverse.

pub mod model;
pub mod ports;
