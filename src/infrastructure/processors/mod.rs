// Processors module
pub mod js_processor;
pub mod css_processor;

pub use js_processor::*;
pub use css_processor::*;

use crate::core::{interfaces::Transformer, models::AssetKind};
use std::sync::Arc;

/// Default transformer for an asset kind
pub fn transformer_for(kind: AssetKind) -> Arc<dyn Transformer> {
    match kind {
        AssetKind::Script => Arc::new(OxcJsTransformer::new()),
        AssetKind::Stylesheet => Arc::new(LightningCssTransformer::default()),
    }
}

/// 1-based line and column of a byte offset
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    let before = &source[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
