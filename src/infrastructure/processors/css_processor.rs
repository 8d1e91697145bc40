use crate::core::interfaces::{Diagnostic, DiagnosticSink, Transformer};
use crate::utils::TransformFailure;
use lightningcss::error::ErrorLocation;
use lightningcss::{
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions as CssParserOptions, StyleSheet},
};
use std::sync::{Arc, RwLock};

/// lightningcss lines are 0-based, columns 1-based
fn location(loc: Option<&ErrorLocation>) -> Option<(usize, usize)> {
    loc.map(|loc| (loc.line as usize + 1, loc.column as usize))
}

/// CSS minification using lightningcss.
///
/// With error recovery on, invalid rules are dropped and surface as warnings
/// instead of failing the whole file.
pub struct LightningCssTransformer {
    error_recovery: bool,
}

impl LightningCssTransformer {
    pub fn new(error_recovery: bool) -> Self {
        Self { error_recovery }
    }
}

impl Default for LightningCssTransformer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Transformer for LightningCssTransformer {
    fn name(&self) -> &'static str {
        "lightningcss"
    }

    fn compress(
        &self,
        source: &str,
        diagnostics: &dyn DiagnosticSink,
    ) -> Result<String, TransformFailure> {
        let warnings = Arc::new(RwLock::new(Vec::new()));
        let options = CssParserOptions {
            error_recovery: self.error_recovery,
            warnings: Some(warnings.clone()),
            ..CssParserOptions::default()
        };

        let parsed = StyleSheet::parse(source, options);

        if let Ok(recovered) = warnings.read() {
            for warning in recovered.iter() {
                diagnostics.report(Diagnostic::warning(
                    warning.kind.to_string(),
                    location(warning.loc.as_ref()),
                ));
            }
        }

        let mut stylesheet = match parsed {
            Ok(stylesheet) => stylesheet,
            Err(error) => {
                let message = error.kind.to_string();
                let loc = location(error.loc.as_ref());
                diagnostics.report(Diagnostic::error(message.clone(), loc));
                return Err(TransformFailure::syntax(message, loc));
            }
        };

        if let Err(error) = stylesheet.minify(MinifyOptions::default()) {
            let message = error.kind.to_string();
            let loc = location(error.loc.as_ref());
            diagnostics.report(Diagnostic::error(message.clone(), loc));
            return Err(TransformFailure::syntax(message, loc));
        }

        let result = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|error| {
                let message = error.kind.to_string();
                let loc = location(error.loc.as_ref());
                diagnostics.report(Diagnostic::error(message.clone(), loc));
                TransformFailure::syntax(message, loc)
            })?;

        Ok(result.code)
    }
}
