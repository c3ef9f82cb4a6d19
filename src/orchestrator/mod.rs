pub mod batch_processor;

pub use batch_processor::run_batch;
