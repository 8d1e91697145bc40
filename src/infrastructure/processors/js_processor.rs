use crate::core::interfaces::{Diagnostic, DiagnosticSink, Transformer};
use crate::infrastructure::processors::line_column;
use crate::utils::TransformFailure;
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;

/// JavaScript minification using oxc
pub struct OxcJsTransformer {
    mangle: bool,
}

impl OxcJsTransformer {
    pub fn new() -> Self {
        Self { mangle: true }
    }

    /// Keep local identifiers readable
    pub fn without_mangling() -> Self {
        Self { mangle: false }
    }

    fn options(&self) -> MinifierOptions {
        let defaults = MinifierOptions::default();
        MinifierOptions {
            mangle: if self.mangle { defaults.mangle } else { None },
            ..defaults
        }
    }
}

impl Default for OxcJsTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for OxcJsTransformer {
    fn name(&self) -> &'static str {
        "oxc"
    }

    fn compress(
        &self,
        source: &str,
        diagnostics: &dyn DiagnosticSink,
    ) -> Result<String, TransformFailure> {
        let allocator = Allocator::default();
        // Bundled files are classic scripts: top-level bindings must survive
        let source_type = SourceType::cjs();

        let parse_result = Parser::new(&allocator, source, source_type).parse();

        if !parse_result.errors.is_empty() {
            let mut first = None;
            for error in &parse_result.errors {
                let location = error
                    .labels
                    .as_ref()
                    .and_then(|labels| labels.first())
                    .map(|label| line_column(source, label.offset()));
                let message = error.message.to_string();
                diagnostics.report(Diagnostic::error(message.clone(), location));
                first.get_or_insert(TransformFailure::syntax(message, location));
            }
            return Err(first.unwrap_or_else(|| TransformFailure::syntax("Parse error", None)));
        }

        let mut program = parse_result.program;
        let minified = Minifier::new(self.options()).minify(&allocator, &mut program);

        let code = Codegen::new()
            .with_options(CodegenOptions {
                minify: true,
                ..CodegenOptions::default()
            })
            .with_scoping(minified.scoping)
            .build(&program)
            .code;

        Ok(code)
    }
}
