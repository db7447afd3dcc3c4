use super::api::ShaderStage;

/// Failures reported by the driver while creating GL objects.
///
/// None of these are retried; callers are expected to treat them as fatal.
#[derive(Debug, thiserror::Error)]
pub enum GlError {
    #[error("failed to create {kind}: {reason}")]
    Create { kind: &'static str, reason: String },

    #[error("failed to compile {stage} shader: {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("failed to link program: {log}")]
    Link { log: String },
}

/// Placeholder diagnostic for drivers that fail without writing a log.
pub(crate) const EMPTY_LOG: &str = "(driver reported no diagnostic)";

pub(crate) fn non_empty_log(log: String) -> String {
    let trimmed = log.trim_end();
    if trimmed.is_empty() {
        EMPTY_LOG.to_string()
    } else {
        trimmed.to_string()
    }
}
