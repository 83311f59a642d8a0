use crate::frontend::token::{Op, Token};

/// Abstract Syntax Tree node for zfx.
///
/// A node is a token plus the children it owns. The token decides how the
/// children are read:
/// - `Op(Semicolon)` is the statement list; every child is one statement.
/// - any other `Op` is a binary operation with exactly two children,
///   `[lhs, rhs]`.
/// - `Ident`, `Int` and `Float` are leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub token: Token,
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(token: Token) -> Self {
        Node {
            token,
            children: Vec::new(),
        }
    }

    pub fn binary(op: Op, lhs: Node, rhs: Node) -> Self {
        Node {
            token: Token::Op(op),
            children: vec![lhs, rhs],
        }
    }

    /// The statement-list root.
    pub fn block(statements: Vec<Node>) -> Self {
        Node {
            token: Token::Op(Op::Semicolon),
            children: statements,
        }
    }

    pub fn op(&self) -> Option<Op> {
        self.token.as_op()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, this one included.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(&node.children);
        }
        count
    }
}

// Left-deep chains get as deep as the statement is long; tree walks below use
// an explicit stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

enum Piece<'a> {
    Open(&'a Node, &'static str),
    Close,
}

impl std::fmt::Display for Node {
    /// S-expression form: `(; (+ 1 (* 2 3)))`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut stack = vec![Piece::Open(self, "")];

        while let Some(piece) = stack.pop() {
            let (node, sep) = match piece {
                Piece::Open(node, sep) => (node, sep),
                Piece::Close => {
                    f.write_str(")")?;
                    continue;
                }
            };

            if node.is_leaf() && !matches!(node.token, Token::Op(_)) {
                write!(f, "{}{}", sep, node.token)?;
                continue;
            }

            write!(f, "{}({}", sep, node.token)?;
            stack.push(Piece::Close);
            stack.extend(node.children.iter().rev().map(|child| Piece::Open(child, " ")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sexpr_display() {
        let node = Node::block(vec![Node::binary(
            Op::Plus,
            Node::leaf(Token::Int(1)),
            Node::binary(
                Op::Multiply,
                Node::leaf(Token::Ident("@pos".to_string())),
                Node::leaf(Token::Float(2.0)),
            ),
        )]);
        assert_eq!(node.to_string(), "(; (+ 1 (* @pos 2.0)))");
        assert_eq!(node.size(), 6);
    }

    #[test]
    fn test_long_chain_display_and_drop() {
        let mut expr = Node::leaf(Token::Int(0));
        for i in 1..50_000 {
            expr = Node::binary(Op::Minus, expr, Node::leaf(Token::Int(i)));
        }
        let root = Node::block(vec![expr]);

        assert_eq!(root.size(), 100_000);
        let text = root.to_string();
        assert!(text.starts_with("(; (- (- (- "));
        assert!(text.contains(" (- (- 0 1) 2) 3) "));
        assert!(text.ends_with(" 49998) 49999))"), "{}", &text[text.len() - 40..]);
    }

    #[test]
    fn test_empty_block_display() {
        assert_eq!(Node::block(Vec::new()).to_string(), "(;)");
    }
}
