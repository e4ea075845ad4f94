//! The concurrent block pipeline
//!
//! Producer -> BlockQueue -> N workers -> Collector -> serialized signature.

pub mod block;
pub mod collector;
pub mod coordinator;
pub mod producer;
pub mod queue;
pub mod worker;

pub use block::{Block, ChecksumRecord};
pub use collector::Collector;
pub use coordinator::{SignatureCoordinator, SignatureResult};
pub use producer::{Producer, ProducerReport};
pub use queue::{BlockQueue, BlockQueueReceiver, BlockQueueSender, QueueStats};
pub use worker::{Worker, WorkerStats};
