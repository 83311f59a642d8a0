use crate::{
    bytecode::ir::{IrArena, IrId, IrNode},
    frontend::token::Token,
    lang::node::Node,
};

/// Flattens an AST into an [`IrArena`].
///
/// Children are lowered first and the parent is pushed last, so the ids
/// come out in postorder.
#[derive(Debug, Default)]
pub struct Lowerer {
    arena: IrArena,
}

impl Lowerer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowers `node` and its subtree; returns the id of `node` itself.
    ///
    /// The walk keeps its own stack of unfinished nodes, so chain length is
    /// not limited by the thread stack.
    pub fn visit(&mut self, node: &Node) -> IrId {
        // (node, ids of the children lowered so far)
        let mut frame: (&Node, Vec<IrId>) = (node, Vec::new());
        let mut parents = Vec::new();

        loop {
            let current: &Node = frame.0;
            if let Some(child) = current.children.get(frame.1.len()) {
                parents.push(std::mem::replace(&mut frame, (child, Vec::new())));
                continue;
            }

            // The id must be taken here, after the children went in.
            let (done, args) = frame;
            let id = self.arena.push(Self::ir_node(done, args));

            match parents.pop() {
                Some(mut parent) => {
                    parent.1.push(id);
                    frame = parent;
                }
                None => return id,
            }
        }
    }

    fn ir_node(node: &Node, args: Vec<IrId>) -> IrNode {
        match &node.token {
            Token::Ident(name) => IrNode::Symbol(name.clone()),
            Token::Int(v) => IrNode::ConstInt(*v),
            Token::Float(v) => IrNode::ConstFloat(*v),
            Token::Op(op) if !node.is_leaf() => IrNode::Operation { op: *op, args },
            Token::Op(_) => IrNode::Empty,
        }
    }

    pub fn finish(self) -> IrArena {
        self.arena
    }
}

/// Lowers a whole program; the root ends up as the last node.
pub fn lower(root: &Node) -> IrArena {
    let mut lowerer = Lowerer::new();
    lowerer.visit(root);
    lowerer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::token::Op;

    fn int(v: i32) -> Node {
        Node::leaf(Token::Int(v))
    }

    #[test]
    fn test_simple_binary() {
        let root = Node::block(vec![Node::binary(Op::Plus, int(1), int(2))]);
        let arena = lower(&root);

        assert_eq!(
            arena.nodes(),
            &[
                IrNode::ConstInt(1),
                IrNode::ConstInt(2),
                IrNode::Operation {
                    op: Op::Plus,
                    args: vec![IrId(0), IrId(1)]
                },
                IrNode::Operation {
                    op: Op::Semicolon,
                    args: vec![IrId(2)]
                },
            ]
        );
    }

    #[test]
    fn test_nested_left_operand_is_postorder() {
        // (1+2)*3
        let root = Node::block(vec![Node::binary(
            Op::Multiply,
            Node::binary(Op::Plus, int(1), int(2)),
            int(3),
        )]);
        let arena = lower(&root);

        assert_eq!(
            arena.get(IrId(2)),
            Some(&IrNode::Operation {
                op: Op::Plus,
                args: vec![IrId(0), IrId(1)]
            })
        );
        assert_eq!(
            arena.get(IrId(4)),
            Some(&IrNode::Operation {
                op: Op::Multiply,
                args: vec![IrId(2), IrId(3)]
            })
        );
        assert!(arena.find_forward_reference().is_none());
    }

    #[test]
    fn test_both_operands_nested() {
        // (a*b)-(c/d), then the root
        let sym = |s: &str| Node::leaf(Token::Ident(s.to_string()));
        let root = Node::block(vec![Node::binary(
            Op::Minus,
            Node::binary(Op::Multiply, sym("a"), sym("b")),
            Node::binary(Op::Divide, sym("c"), sym("d")),
        )]);
        let arena = lower(&root);

        assert_eq!(arena.len(), root.size());
        assert!(arena.find_forward_reference().is_none());
        assert_eq!(
            arena.get(IrId(6)),
            Some(&IrNode::Operation {
                op: Op::Minus,
                args: vec![IrId(2), IrId(5)]
            })
        );
    }

    #[test]
    fn test_root_is_last() {
        let root = Node::block(vec![
            Node::binary(Op::Plus, int(1), int(2)),
            Node::leaf(Token::Ident("x".into())),
        ]);
        let arena = lower(&root);

        let last = IrId(arena.len() as u32 - 1);
        assert_eq!(
            arena.get(last),
            Some(&IrNode::Operation {
                op: Op::Semicolon,
                args: vec![IrId(2), IrId(3)]
            })
        );
    }

    #[test]
    fn test_long_left_chain() {
        // 1+1+...+1, folded left the way the parser builds it
        let mut expr = int(1);
        for _ in 0..20_000 {
            expr = Node::binary(Op::Plus, expr, int(1));
        }
        let arena = lower(&Node::block(vec![expr]));

        assert_eq!(arena.len(), 40_002);
        assert!(arena.find_forward_reference().is_none());
        assert_eq!(
            arena.get(IrId(2)),
            Some(&IrNode::Operation {
                op: Op::Plus,
                args: vec![IrId(0), IrId(1)]
            })
        );
        assert_eq!(
            arena.get(IrId(40_000)),
            Some(&IrNode::Operation {
                op: Op::Plus,
                args: vec![IrId(39_998), IrId(39_999)]
            })
        );
    }

    #[test]
    fn test_childless_operator_is_empty() {
        let arena = lower(&Node::leaf(Token::Op(Op::Comma)));
        assert_eq!(arena.nodes(), &[IrNode::Empty]);
    }
}
