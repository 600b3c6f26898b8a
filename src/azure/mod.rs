pub mod assembler;
pub mod client;
pub mod fields;
pub mod suite;

pub use assembler::assemble;
pub use client::AzureDevOpsClient;
pub use fields::FieldResolver;
pub use suite::{load_suite, LoadPolicy, SuiteLoader};
