//! Log entries awaiting a write.

use crate::logger::field::Field;
use crate::logger::level::Level;
use crate::trace::Context;

/// One record on its way from a call site to the sink.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    /// Read at flush time for trace enrichment.
    pub ctx: Context,
    pub message: String,
    pub fields: Vec<Field>,
}

impl LogEntry {
    pub fn new(level: Level, ctx: &Context, message: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            level,
            ctx: ctx.clone(),
            message: message.into(),
            fields,
        }
    }
}
