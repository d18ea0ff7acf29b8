//! Concrete syntax tree to unified AST lowering.
//!
//! [`PythonAstBuilder`] owns a tree-sitter parser and turns Python source
//! into a [`CompilationUnit`] plus the diagnostics gathered on the way.
//! The [`AstLowerer`] trait is the seam other language frontends plug
//! into.

mod context;
mod declaration;
mod expression;
mod statement;
mod unit;

use rayon::prelude::*;
use tree_sitter::Parser;

use crate::shared::models::ast::CompilationUnit;
use crate::shared::models::{Diagnostic, LoweringError, Result};

use context::LoweringContext;

/// The lowered tree paired with the diagnostics produced while building
/// it. Diagnostics are advisory; the unit is complete either way.
#[derive(Debug, Clone)]
pub struct LoweringOutput {
    pub unit: CompilationUnit,
    pub diagnostics: Vec<Diagnostic>,
}

/// A language frontend that lowers source text into the unified AST.
pub trait AstLowerer {
    fn lower(&mut self, source: &str, file_path: &str) -> Result<LoweringOutput>;

    fn language(&self) -> &'static str;
}

/// Python frontend. Construction configures the grammar once; the parser
/// is reused across files.
pub struct PythonAstBuilder {
    parser: Parser,
}

impl PythonAstBuilder {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::language())
            .map_err(|e| LoweringError::ParserInit(e.to_string()))?;
        Ok(Self { parser })
    }
}

impl AstLowerer for PythonAstBuilder {
    fn lower(&mut self, source: &str, file_path: &str) -> Result<LoweringOutput> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| LoweringError::Parse {
                file_path: file_path.to_string(),
            })?;
        tracing::debug!(file = file_path, "lowering python source");

        let mut ctx = LoweringContext::new(source, file_path);
        let unit = ctx.lower_module(&tree.root_node())?;
        let diagnostics = ctx.finish();
        tracing::debug!(
            file = file_path,
            types = unit.types.len(),
            methods = unit.methods.len(),
            diagnostics = diagnostics.len(),
            "lowering complete"
        );
        Ok(LoweringOutput { unit, diagnostics })
    }

    fn language(&self) -> &'static str {
        "python"
    }
}

/// Lower a batch of `(path, source)` pairs in parallel, one parser per
/// file. Per-file failures stay per-file.
pub fn lower_files(files: &[(String, String)]) -> Vec<(String, Result<LoweringOutput>)> {
    files
        .par_iter()
        .map(|(path, source)| {
            let result = PythonAstBuilder::new().and_then(|mut builder| builder.lower(source, path));
            (path.clone(), result)
        })
        .collect()
}
