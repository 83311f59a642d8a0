use std::collections::BTreeMap;

use crate::bytecode::ir::{IrArena, IrId, IrNode};

/// A virtual register slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegId(pub u32);

impl std::fmt::Display for RegId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Dense `IrId -> RegId` mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterTable {
    regs: Vec<RegId>,
}

impl RegisterTable {
    pub fn get(&self, id: IrId) -> Option<RegId> {
        self.regs.get(id.index()).copied()
    }

    /// Number of registers, which is also the number of IR nodes covered.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    pub fn as_slice(&self) -> &[RegId] {
        &self.regs
    }
}

/// Operand edges, keyed by the consuming operation.
///
/// Every operand of every operation is kept, in operand order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dependencies {
    edges: BTreeMap<IrId, Vec<IrId>>,
}

impl Dependencies {
    fn insert(&mut self, consumer: IrId, operand: IrId) {
        self.edges.entry(consumer).or_default().push(operand);
    }

    pub fn operands_of(&self, consumer: IrId) -> &[IrId] {
        self.edges.get(&consumer).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All `(consumer, operand)` pairs in IR order.
    pub fn edges(&self) -> impl Iterator<Item = (IrId, IrId)> + '_ {
        self.edges
            .iter()
            .flat_map(|(consumer, operands)| operands.iter().map(move |op| (*consumer, *op)))
    }

    /// Total number of edges.
    pub fn len(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Register assignment and dependency collection over an IR array.
///
/// Each node gets a register of its own (`r{n}` for node `n`); nothing is
/// shared or reused.
pub struct Scanner<'a> {
    nodes: &'a IrArena,
    regs: RegisterTable,
    deps: Dependencies,
}

impl<'a> Scanner<'a> {
    pub fn new(nodes: &'a IrArena) -> Self {
        Self {
            nodes,
            regs: RegisterTable::default(),
            deps: Dependencies::default(),
        }
    }

    pub fn scan(mut self) -> (RegisterTable, Dependencies) {
        for (id, node) in self.nodes.iter() {
            if let IrNode::Operation { args, .. } = node {
                for arg in args {
                    self.deps.insert(id, *arg);
                }
            }
            self.regs.regs.push(RegId(id.0));
        }
        (self.regs, self.deps)
    }
}
