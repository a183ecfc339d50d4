// Domain layer: validated declaration entities, their code sets and the transport port.

pub mod codes;
pub mod model;
pub mod overtime;
pub mod ports;
pub mod schedule;
pub mod work_card;
