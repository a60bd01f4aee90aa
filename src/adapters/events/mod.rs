//! Event publisher adapters.
//!
//! - `InMemoryEventBus` - Captures envelopes in process for assertions
//! - `TracingEventPublisher` - Emits each envelope as a structured log line

mod in_memory;
mod tracing_publisher;

pub use in_memory::InMemoryEventBus;
pub use tracing_publisher::TracingEventPublisher;
