mod process_runner;

pub use process_runner::{ProcessOutcome, run_to_completion};
