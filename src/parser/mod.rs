pub mod data_source;
pub mod markup;
pub mod steps;
pub mod xml;

pub use data_source::parse_data_source;
pub use markup::{decode, decode_opt};
pub use steps::parse_steps;
