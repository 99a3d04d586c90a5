//! Audit sink module.

mod r#trait;
pub use r#trait::AuditSink;

mod tracing_sink;
pub use tracing_sink::{TracingAuditSink, AUDIT_TARGET};

mod memory;
pub use memory::MemoryAuditSink;
