pub mod charges;
pub mod sdf;
pub mod v2000;
pub mod v3000;
