use std::collections::HashMap;

use crate::{
    bytecode::{
        compile_error::CompileError,
        ir::{IrArena, IrId, IrNode},
        op::Bc,
        scan::{RegId, RegisterTable},
    },
    frontend::token::Op,
};

/// Dense id of an interned symbol name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymId(pub u32);

/// First-seen-wins symbol interning.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    ids: HashMap<String, SymId>,
    names: Vec<String>,
}

impl SymbolTable {
    pub fn intern(&mut self, name: &str) -> SymId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = SymId(self.names.len() as u32);
        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    pub fn get(&self, name: &str) -> Option<SymId> {
        self.ids.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names indexed by id.
    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

/// An operation for which no instruction was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unsupported {
    pub node: IrId,
    pub op: Op,
}

/// Writes the word stream for an IR array, one node at a time in index
/// order.
///
/// Per node:
/// - `ConstInt` / `ConstFloat`: opcode, destination register, raw bits
/// - `Symbol`: `AddrSymbol`, interned symbol id
/// - `Operation` with an opcode: opcode, destination register, one register
///   per operand
/// - `Operation` without one: nothing; recorded in [`Emitter::unsupported`]
///   unless it is the statement-list root
/// - `Empty`: nothing
pub struct Emitter<'a> {
    nodes: &'a IrArena,
    regs: &'a RegisterTable,
    codes: Vec<u32>,
    symbols: SymbolTable,
    unsupported: Vec<Unsupported>,
}

impl<'a> Emitter<'a> {
    pub fn new(nodes: &'a IrArena, regs: &'a RegisterTable) -> Self {
        Self {
            nodes,
            regs,
            codes: Vec::new(),
            symbols: SymbolTable::default(),
            unsupported: Vec::new(),
        }
    }

    fn emit_bc(&mut self, bc: Bc) {
        self.codes.push(bc.word());
    }

    fn emit_reg(&mut self, reg: RegId) {
        self.codes.push(reg.0);
    }

    fn emit_sym(&mut self, name: &str) {
        let id = self.symbols.intern(name);
        self.codes.push(id.0);
    }

    fn emit_int(&mut self, value: i32) {
        self.codes.push(value as u32);
    }

    fn emit_float(&mut self, value: f32) {
        self.codes.push(value.to_bits());
    }

    fn reg(&self, id: IrId) -> Result<RegId, CompileError> {
        self.regs.get(id).ok_or_else(|| {
            CompileError::internal(format!(
                "no register for {} ({} registers allocated)",
                id,
                self.regs.len()
            ))
        })
    }

    pub fn generate(&mut self) -> Result<(), CompileError> {
        let nodes = self.nodes;
        for (id, node) in nodes.iter() {
            match node {
                IrNode::ConstInt(v) => {
                    let dst = self.reg(id)?;
                    self.emit_bc(Bc::LoadConstInt);
                    self.emit_reg(dst);
                    self.emit_int(*v);
                }
                IrNode::ConstFloat(v) => {
                    let dst = self.reg(id)?;
                    self.emit_bc(Bc::LoadConstFloat);
                    self.emit_reg(dst);
                    self.emit_float(*v);
                }
                IrNode::Symbol(name) => {
                    self.emit_bc(Bc::AddrSymbol);
                    self.emit_sym(name);
                }
                IrNode::Operation { op, args } => match Bc::for_op(*op) {
                    Some(bc) => {
                        let dst = self.reg(id)?;
                        let srcs = args
                            .iter()
                            .map(|arg| self.reg(*arg))
                            .collect::<Result<Vec<_>, _>>()?;
                        self.emit_bc(bc);
                        self.emit_reg(dst);
                        for src in srcs {
                            self.emit_reg(src);
                        }
                    }
                    None if *op == Op::Semicolon => {}
                    None => self.unsupported.push(Unsupported { node: id, op: *op }),
                },
                IrNode::Empty => {}
            }
        }
        Ok(())
    }

    /// Operations skipped by [`Emitter::generate`], in IR order.
    pub fn unsupported(&self) -> &[Unsupported] {
        &self.unsupported
    }

    pub fn finish(self) -> (Vec<u32>, SymbolTable) {
        (self.codes, self.symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::scan::Scanner;

    fn emit(arena: &IrArena) -> (Vec<u32>, SymbolTable, Vec<Unsupported>) {
        let (regs, _) = Scanner::new(arena).scan();
        let mut emitter = Emitter::new(arena, &regs);
        emitter.generate().unwrap();
        let unsupported = emitter.unsupported().to_vec();
        let (codes, syms) = emitter.finish();
        (codes, syms, unsupported)
    }

    #[test]
    fn test_int_plus_int() {
        let mut arena = IrArena::new();
        let a = arena.push(IrNode::ConstInt(1));
        let b = arena.push(IrNode::ConstInt(2));
        arena.push(IrNode::Operation {
            op: Op::Plus,
            args: vec![a, b],
        });

        let (codes, syms, unsupported) = emit(&arena);
        assert_eq!(
            codes,
            vec![
                Bc::LoadConstInt.word(),
                0,
                1,
                Bc::LoadConstInt.word(),
                1,
                2,
                Bc::Plus.word(),
                2,
                0,
                1
            ]
        );
        assert!(syms.is_empty());
        assert!(unsupported.is_empty());
    }

    #[test]
    fn test_immediates_are_raw_bits() {
        let mut arena = IrArena::new();
        arena.push(IrNode::ConstInt(-1));
        arena.push(IrNode::ConstFloat(2.0));

        let (codes, _, _) = emit(&arena);
        assert_eq!(codes[2], u32::MAX);
        assert_eq!(codes[5], 2.0f32.to_bits());
        assert_eq!(f32::from_bits(codes[5]), 2.0);
    }

    #[test]
    fn test_symbols_interned_in_first_seen_order() {
        let mut arena = IrArena::new();
        arena.push(IrNode::Symbol("@pos".into()));
        arena.push(IrNode::Symbol("$F".into()));
        arena.push(IrNode::Symbol("@pos".into()));

        let (codes, syms, _) = emit(&arena);
        let addr = Bc::AddrSymbol.word();
        assert_eq!(codes, vec![addr, 0, addr, 1, addr, 0]);
        assert_eq!(syms.get("$F"), Some(SymId(1)));
        assert_eq!(syms.into_names(), vec!["@pos".to_string(), "$F".to_string()]);
    }

    #[test]
    fn test_assignment_emits_nothing_but_is_recorded() {
        let mut arena = IrArena::new();
        let a = arena.push(IrNode::Symbol("a".into()));
        let one = arena.push(IrNode::ConstInt(1));
        let assign = arena.push(IrNode::Operation {
            op: Op::Assign,
            args: vec![a, one],
        });
        arena.push(IrNode::Operation {
            op: Op::Semicolon,
            args: vec![assign],
        });

        let (codes, _, unsupported) = emit(&arena);
        assert_eq!(
            codes,
            vec![Bc::AddrSymbol.word(), 0, Bc::LoadConstInt.word(), 1, 1]
        );
        assert_eq!(
            unsupported,
            vec![Unsupported {
                node: IrId(2),
                op: Op::Assign
            }]
        );
    }

    #[test]
    fn test_empty_emits_nothing() {
        let mut arena = IrArena::new();
        arena.push(IrNode::Empty);
        let (codes, _, unsupported) = emit(&arena);
        assert!(codes.is_empty());
        assert!(unsupported.is_empty());
    }

    #[test]
    fn test_missing_register_is_internal_error() {
        let mut arena = IrArena::new();
        arena.push(IrNode::ConstInt(1));
        let regs = RegisterTable::default();

        let mut emitter = Emitter::new(&arena, &regs);
        let err = emitter.generate().unwrap_err();
        assert!(matches!(err, CompileError::Internal(_)));
    }
}
