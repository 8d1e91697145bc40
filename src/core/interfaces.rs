use crate::utils::TransformFailure;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A problem reported by a transformer while minifying one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// 1-based line and column, when the transformer knows them
    pub location: Option<(usize, usize)>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, location: Option<(usize, usize)>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            location,
        }
    }

    pub fn warning(message: impl Into<String>, location: Option<(usize, usize)>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some((line, column)) => write!(f, "{}:{}:{}", line, column, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Receives diagnostics as a transformer produces them
pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

/// Minifies one source text into another.
///
/// Problems go to the sink. Warnings never fail the call; a fatal problem is
/// reported as an error diagnostic and returned as `Err`.
pub trait Transformer: Send + Sync {
    fn name(&self) -> &'static str;

    fn compress(
        &self,
        source: &str,
        diagnostics: &dyn DiagnosticSink,
    ) -> Result<String, TransformFailure>;
}

/// Logging capability handed to the pipeline at construction
pub trait BuildLogger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}
