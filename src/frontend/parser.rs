use crate::frontend::lexer::{Span, Spanned};
use crate::frontend::parser_error::ParserError;
use crate::frontend::token::{Op, Token};
use crate::lang::node::Node;

/// Binary operator levels, loosest first. Each level is a left-associative
/// chain of the level below it; below the last level sits the atom.
const LEVELS: &[&[Op]] = &[
    &[Op::LogicOr],
    &[Op::LogicAnd],
    &[Op::BitOr],
    &[Op::BitXor],
    &[Op::BitAnd],
    &[Op::CmpEqual, Op::CmpNotEqual],
    &[
        Op::CmpLessThan,
        Op::CmpLessEqual,
        Op::CmpGreaterThan,
        Op::CmpGreaterEqual,
    ],
    &[Op::BitShl, Op::BitShr],
    &[Op::Plus, Op::Minus],
    &[Op::Multiply, Op::Divide, Op::Modulus],
    &[
        Op::Assign,
        Op::PlusAssign,
        Op::MinusAssign,
        Op::MultiplyAssign,
        Op::DivideAssign,
        Op::ModulusAssign,
        Op::BitAndAssign,
        Op::BitOrAssign,
        Op::BitXorAssign,
    ],
    &[Op::Comma],
];

/// Backtracking recursive-descent parser for zfx.
///
/// Every trial parse snapshots the cursor first and puts it back when the
/// trial does not match, so a failed alternative never consumes tokens.
///
/// Notes:
/// - Only binary operators, identifiers and numeric literals have grammar
///   rules. Any other token ends the current chain; if it sits where a `;`
///   is expected, the statement list ends there.
/// - Tokens after the last complete statement are left unconsumed and can
///   be inspected with [`Parser::remaining`].
pub struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Spanned>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn current(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Spanned> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consumes the next token if it is one of `ops`.
    fn next_op(&mut self, ops: &[Op]) -> Option<Op> {
        let op = self.current()?.token.as_op()?;
        if ops.contains(&op) {
            self.pos += 1;
            Some(op)
        } else {
            None
        }
    }

    /// Tokens not consumed by the last call to [`Parser::parse`].
    pub fn remaining(&self) -> &[Spanned] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }

    fn error(&self, message: &str) -> ParserError {
        let span = self
            .current()
            .map(|s| s.span)
            .unwrap_or(Span { line: 1, col: 1 });
        ParserError {
            message: message.to_string(),
            line: span.line,
            col: span.col,
        }
    }

    /// Parses a statement list:
    ///
    /// ```text
    /// top := (binary ';')*
    /// ```
    ///
    /// Returns the `;` root node holding one child per statement.
    ///
    /// # Errors
    /// - If not a single statement could be parsed.
    pub fn parse(&mut self) -> Result<Node, ParserError> {
        let mut statements = Vec::new();

        loop {
            let saved = self.pos;
            let Some(statement) = self.parse_binary() else {
                break;
            };
            if self.next_op(&[Op::Semicolon]).is_none() {
                self.pos = saved;
                break;
            }
            statements.push(statement);
        }

        if statements.is_empty() {
            return Err(self.error("failed to parse"));
        }

        Ok(Node::block(statements))
    }

    /// ```text
    /// binary := logic_or
    /// ```
    fn parse_binary(&mut self) -> Option<Node> {
        self.parse_chain(0)
    }

    /// Parses one level of the operator table:
    ///
    /// ```text
    /// chain(next, ops) := next (ops next)*
    /// ```
    ///
    /// Folds to the left. An operator whose right operand does not parse is
    /// given back and the chain ends before it.
    fn parse_chain(&mut self, level: usize) -> Option<Node> {
        let Some(ops) = LEVELS.get(level) else {
            return self.parse_atom();
        };

        let mut lhs = self.parse_chain(level + 1)?;

        loop {
            let saved = self.pos;
            let Some(op) = self.next_op(ops) else {
                break;
            };
            match self.parse_chain(level + 1) {
                Some(rhs) => lhs = Node::binary(op, lhs, rhs),
                None => {
                    self.pos = saved;
                    break;
                }
            }
        }

        Some(lhs)
    }

    /// ```text
    /// atom := Ident | Float | Int
    /// ```
    fn parse_atom(&mut self) -> Option<Node> {
        let token = match &self.current()?.token {
            Token::Op(_) => return None,
            token => token.clone(),
        };
        self.advance();
        Some(Node::leaf(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::Lexer;

    fn parser(source: &str) -> Parser {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize().unwrap();
        Parser::new(tokens)
    }

    fn parse(source: &str) -> Node {
        parser(source).parse().unwrap()
    }

    fn parse_err(source: &str) -> ParserError {
        parser(source).parse().unwrap_err()
    }

    fn sexpr(source: &str) -> String {
        parse(source).to_string()
    }

    #[test]
    fn test_single_statement() {
        let root = parse("1+2;");
        assert_eq!(root.op(), Some(Op::Semicolon));
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.to_string(), "(; (+ 1 2))");
    }

    #[test]
    fn test_multiple_statements() {
        let root = parse("a; b; 3;");
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.to_string(), "(; a b 3)");
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(sexpr("1-2-3;"), "(; (- (- 1 2) 3))");
        assert_eq!(sexpr("a/b*c;"), "(; (* (/ a b) c))");
    }

    #[test]
    fn test_nesting_order_is_precedence() {
        assert_eq!(sexpr("1+2*3;"), "(; (+ 1 (* 2 3)))");
        assert_eq!(sexpr("1*2+3;"), "(; (+ (* 1 2) 3))");
        assert_eq!(sexpr("a<b==c;"), "(; (== (< a b) c))");
        assert_eq!(sexpr("a||b&&c;"), "(; (|| a (&& b c)))");
        assert_eq!(sexpr("a|b^c&d;"), "(; (| a (^ b (& c d))))");
        assert_eq!(sexpr("a<<1+2;"), "(; (<< a (+ 1 2)))");
    }

    #[test]
    fn test_assignment_binds_tighter_than_multiply() {
        assert_eq!(sexpr("a=1;"), "(; (= a 1))");
        assert_eq!(sexpr("a=1+2;"), "(; (+ (= a 1) 2))");
        assert_eq!(sexpr("a*b+=c;"), "(; (* a (+= b c)))");
    }

    #[test]
    fn test_comma_binds_tightest() {
        assert_eq!(sexpr("a=b,c;"), "(; (= a (, b c)))");
    }

    #[test]
    fn test_sigil_identifiers_are_atoms() {
        assert_eq!(sexpr("@pos*2.0;"), "(; (* @pos 2.0))");
        assert_eq!(sexpr("$F+@clr;"), "(; (+ $F @clr))");
    }

    #[test]
    fn test_missing_semicolon_fails() {
        let err = parse_err("1+2");
        assert_eq!(err.message, "failed to parse");
        assert_eq!((err.line, err.col), (1, 1));
    }

    #[test]
    fn test_empty_input_fails() {
        let err = parse_err("");
        assert_eq!(err.message, "failed to parse");
        assert_eq!((err.line, err.col), (1, 1));
    }

    #[test]
    fn test_unary_minus_is_not_parsed() {
        let err = parse_err("-1;");
        assert_eq!(err.message, "failed to parse");
    }

    #[test]
    fn test_parenthesized_operand_stops_chain() {
        // `+` is given back when `(` cannot start an operand, and then `;`
        // is missing after `1`.
        let err = parse_err("1+(2);");
        assert_eq!(err.message, "failed to parse");
    }

    #[test]
    fn test_statement_list_ends_at_unparsable_statement() {
        let mut p = parser("a=1; b+(c); d;");
        let root = p.parse().unwrap();
        assert_eq!(root.children.len(), 1);

        let rest = p.remaining();
        assert!(matches!(&rest[0].token, Token::Ident(name) if name == "b"));
        assert_eq!(rest[0].span, Span { line: 1, col: 6 });
    }

    #[test]
    fn test_error_points_at_first_unparsed_token() {
        let err = parse_err("\n  (a);");
        assert_eq!((err.line, err.col), (2, 3));
    }

    #[test]
    fn test_no_remaining_tokens_after_full_parse() {
        let mut p = parser("x = 1; y = x * 2;");
        p.parse().unwrap();
        assert!(p.remaining().is_empty());
    }

    #[test]
    fn test_keywords_are_not_atoms() {
        let err = parse_err("if;");
        assert_eq!(err.message, "failed to parse");
    }
}
