use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    bytecode::{
        compile_error::CompileError,
        emit::Emitter,
        ir::IrArena,
        lower::lower,
        program::Program,
        scan::{Dependencies, RegisterTable, Scanner},
    },
    frontend::{lexer::Lexer, parser::Parser},
    lang::node::Node,
};

/// Compiler settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Turn dropped input (lex truncation, trailing tokens, operators with
    /// no instruction) into a hard error instead of a warning.
    pub deny_warnings: bool,
}

/// Result of a successful compilation.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub program: Program,
    /// Non-fatal conditions, in the order they were found.
    pub warnings: Vec<CompileError>,
}

/// Intermediate results of every pass, kept for inspection (`--ir`, tests).
#[derive(Debug, Clone)]
pub struct Passes {
    pub ast: Node,
    pub ir: IrArena,
    pub regs: RegisterTable,
    pub deps: Dependencies,
}

/// Runs the whole pipeline: lex, parse, lower, scan, emit.
pub struct Compiler {
    options: CompileOptions,
    warnings: Vec<CompileError>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::with_options(CompileOptions::default())
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self {
            options,
            warnings: Vec::new(),
        }
    }

    /// Records a non-fatal condition, or fails with it when warnings are
    /// denied.
    fn report(&mut self, condition: CompileError) -> Result<(), CompileError> {
        if !condition.is_deniable() {
            return Err(CompileError::internal(format!(
                "fatal condition reported as a warning: {}",
                condition
            )));
        }
        if self.options.deny_warnings {
            return Err(condition);
        }
        warn!("{}", condition);
        self.warnings.push(condition);
        Ok(())
    }

    /// Parses `source` into an AST.
    ///
    /// # Errors
    /// - `MalformedLiteral` if a numeric literal does not convert.
    /// - `LexTruncated` if nothing parsed and the lexer had stopped early,
    ///   since the unrecognized character is the likely cause.
    /// - `ParseRejected` if nothing parsed otherwise.
    pub fn parse(&mut self, source: &str) -> Result<Node, CompileError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        let truncation = lexer.truncation();
        debug!(tokens = tokens.len(), truncated = truncation.is_some(), "tokenized");

        let mut parser = Parser::new(tokens);
        let ast = match parser.parse() {
            Ok(ast) => ast,
            Err(e) => {
                return Err(match truncation {
                    Some(stop) => CompileError::truncated(stop),
                    None => e.into(),
                });
            }
        };
        debug!(statements = ast.children.len(), "parsed");

        if let Some(first) = parser.remaining().first() {
            self.report(CompileError::trailing(first))?;
        }
        if let Some(stop) = truncation {
            self.report(CompileError::truncated(stop))?;
        }

        Ok(ast)
    }

    /// Runs every pass up to, not including, emission.
    pub fn analyze(&mut self, source: &str) -> Result<Passes, CompileError> {
        let ast = self.parse(source)?;

        let ir = lower(&ast);
        debug!(nodes = ir.len(), "lowered");
        if let Some((node, operand)) = ir.find_forward_reference() {
            return Err(CompileError::internal(format!(
                "{} refers to later node {}",
                node, operand
            )));
        }

        let (regs, deps) = Scanner::new(&ir).scan();
        debug!(registers = regs.len(), edges = deps.len(), "scanned");

        Ok(Passes {
            ast,
            ir,
            regs,
            deps,
        })
    }

    /// Compiles `source` into a [`Program`].
    pub fn compile(mut self, source: &str) -> Result<Compiled, CompileError> {
        let passes = self.analyze(source)?;

        let mut emitter = Emitter::new(&passes.ir, &passes.regs);
        emitter.generate()?;
        for skipped in emitter.unsupported().to_vec() {
            self.report(CompileError::unsupported(skipped))?;
        }

        let (codes, symbols) = emitter.finish();
        debug!(words = codes.len(), symbols = symbols.len(), "emitted");

        Ok(Compiled {
            program: Program {
                codes,
                syms: symbols.into_names(),
                nregs: passes.regs.len(),
            },
            warnings: self.warnings,
        })
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}
