pub mod stats;
pub mod xml;
