pub mod capacity;
pub mod core_network;
pub mod demand;

pub use capacity::CapacityGroup;
pub use core_network::CoreGroup;
pub use demand::DemandGroup;
