pub mod execution;
pub mod test_case;
pub mod test_status;
pub mod test_step;

pub use execution::*;
pub use test_case::*;
pub use test_status::*;
pub use test_step::*;
