use crate::frontend::token::Op;

/// Index of a node in an [`IrArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IrId(pub u32);

impl IrId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for IrId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// A single entry of the flat intermediate representation.
#[derive(Debug, Clone, PartialEq)]
pub enum IrNode {
    Empty,
    ConstInt(i32),
    ConstFloat(f32),
    Symbol(String),
    Operation { op: Op, args: Vec<IrId> },
}

impl std::fmt::Display for IrNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrNode::Empty => write!(f, "empty"),
            IrNode::ConstInt(v) => write!(f, "int {}", v),
            IrNode::ConstFloat(v) => write!(f, "float {:?}", v),
            IrNode::Symbol(name) => write!(f, "sym {}", name),
            IrNode::Operation { op, args } => {
                write!(f, "op {}", op)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                Ok(())
            }
        }
    }
}

/// Append-only, index-addressed IR storage.
///
/// An [`IrId`] is handed out only by [`IrArena::push`], so a node's id is
/// always its final position. Operations are pushed after their operands,
/// which keeps every operand id below the id of the node that uses it.
#[derive(Debug, Clone, Default)]
pub struct IrArena {
    nodes: Vec<IrNode>,
}

impl IrArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: IrNode) -> IrId {
        let id = IrId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: IrId) -> Option<&IrNode> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[IrNode] {
        &self.nodes
    }

    /// Iterates `(id, node)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (IrId, &IrNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (IrId(i as u32), node))
    }

    /// Returns the first operation that refers to an operand at or after its
    /// own position, if any.
    pub fn find_forward_reference(&self) -> Option<(IrId, IrId)> {
        self.iter().find_map(|(id, node)| match node {
            IrNode::Operation { args, .. } => args.iter().find(|a| **a >= id).map(|a| (id, *a)),
            _ => None,
        })
    }
}
