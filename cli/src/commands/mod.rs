//! CLI commands for pairmerge.

pub mod benchmark;
pub mod inspect;
pub mod segment;
pub mod train;

pub use benchmark::BenchmarkCommand;
pub use inspect::InspectCommand;
pub use segment::SegmentCommand;
pub use train::TrainCommand;
