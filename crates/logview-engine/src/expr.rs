//! Expression parser and evaluator for computed columns.
//!
//! A deliberately narrowed, sandboxed language: the only bound name is the
//! current row. Supported forms:
//! - literals: `42`, `2.5`, `'text'`, `"text"`, `true`, `false`, `null`
//! - field access: `loss`, `row["field with spaces"]`
//! - arithmetic: `+ - * / %` (division always yields a float)
//! - string concatenation with `+`
//! - comparisons: `== != < <= > >=`
//! - boolean logic: `&& || !` (also spelled `and`, `or`, `not`)
//! - conditionals: `cond ? a : b`
//!
//! There are no function calls, no assignment, and no access to anything
//! outside the row. Evaluation errors (unknown field, type mismatch,
//! division by zero) are returned as messages; the engine turns them into
//! per-cell `ERROR:` values.

use logview_types::{Row, Scalar};
use std::cmp::Ordering;

/// A parsed expression that can be evaluated against a row.
#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Scalar),
    /// Bare identifier looked up in the row
    Field(String),
    /// `row[<expr>]` — the index expression must evaluate to a string
    RowIndex(Box<Expr>),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    /// `cond ? then : else`
    Ternary(Box<Expr>, Box<Expr>, Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eq,       // ==
    Ne,       // !=
    Lt,       // <
    Le,       // <=
    Gt,       // >
    Ge,       // >=
    And,      // && or `and`
    Or,       // || or `or`
    Not,      // ! or `not`
    Question, // ?
    Colon,    // :
    LParen,
    RParen,
    LBracket,
    RBracket,
    Eof,
}

struct Lexer {
    input: Vec<char>,
    pos: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.input.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_ident(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }
        ident
    }

    fn read_number(&mut self) -> Result<Token, String> {
        let mut num_str = String::new();
        let mut is_float = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                num_str.push(c);
                self.advance();
            } else if c == '.' && !is_float {
                is_float = true;
                num_str.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if is_float {
            num_str
                .parse::<f64>()
                .map(Token::Float)
                .map_err(|_| format!("invalid number '{}'", num_str))
        } else {
            num_str
                .parse::<i64>()
                .map(Token::Int)
                .map_err(|_| format!("invalid number '{}'", num_str))
        }
    }

    fn read_string(&mut self, quote: char) -> Result<Token, String> {
        self.advance(); // opening quote
        let mut s = String::new();
        loop {
            match self.advance() {
                None => return Err("unterminated string literal".to_string()),
                Some(c) if c == quote => return Ok(Token::Str(s)),
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('\\') => s.push('\\'),
                    Some(c) if c == quote => s.push(c),
                    Some(c) => return Err(format!("unsupported escape '\\{}'", c)),
                    None => return Err("unterminated string literal".to_string()),
                },
                Some(c) => s.push(c),
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, String> {
        self.skip_whitespace();

        let Some(c) = self.peek() else {
            return Ok(Token::Eof);
        };

        if c.is_ascii_digit() || (c == '.' && self.peek_next().is_some_and(|n| n.is_ascii_digit()))
        {
            return self.read_number();
        }

        if c == '\'' || c == '"' {
            return self.read_string(c);
        }

        if c.is_alphabetic() || c == '_' {
            let ident = self.read_ident();
            return Ok(match ident.as_str() {
                "true" => Token::Bool(true),
                "false" => Token::Bool(false),
                "null" => Token::Null,
                "and" => Token::And,
                "or" => Token::Or,
                "not" => Token::Not,
                _ => Token::Ident(ident),
            });
        }

        self.advance();
        match c {
            '+' => Ok(Token::Plus),
            '-' => Ok(Token::Minus),
            '*' => Ok(Token::Star),
            '/' => Ok(Token::Slash),
            '%' => Ok(Token::Percent),
            '?' => Ok(Token::Question),
            ':' => Ok(Token::Colon),
            '(' => Ok(Token::LParen),
            ')' => Ok(Token::RParen),
            '[' => Ok(Token::LBracket),
            ']' => Ok(Token::RBracket),
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::Eq)
                } else {
                    Err("unexpected '='; did you mean '=='?".to_string())
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::Ne)
                } else {
                    Ok(Token::Not)
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::Le)
                } else {
                    Ok(Token::Lt)
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::Ge)
                } else {
                    Ok(Token::Gt)
                }
            }
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    Ok(Token::And)
                } else {
                    Err("unexpected '&'; did you mean '&&'?".to_string())
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    Ok(Token::Or)
                } else {
                    Err("unexpected '|'; did you mean '||'?".to_string())
                }
            }
            _ => Err(format!("unexpected character '{}'", c)),
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, String> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

/// Recursion cap for the parser. Every recursion cycle passes through
/// `ternary` or `unary`, so bounding those bounds the whole grammar.
const MAX_NESTING_DEPTH: usize = 64;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens.get(self.pos).cloned().unwrap_or(Token::Eof);
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token, context: &str) -> Result<(), String> {
        let token = self.advance();
        if token == expected {
            Ok(())
        } else {
            Err(format!("expected {} ({:?}), found {:?}", context, expected, token))
        }
    }

    fn descend(&mut self) -> Result<(), String> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err("expression nests too deeply".to_string());
        }
        Ok(())
    }

    // Lowest precedence: cond ? a : b (right-associative)
    fn ternary(&mut self) -> Result<Expr, String> {
        self.descend()?;
        let result = self.ternary_inner();
        self.depth -= 1;
        result
    }

    fn ternary_inner(&mut self) -> Result<Expr, String> {
        let cond = self.or_expr()?;
        if *self.peek() == Token::Question {
            self.advance();
            let then_branch = self.ternary()?;
            self.expect(Token::Colon, "':' in conditional")?;
            let else_branch = self.ternary()?;
            return Ok(Expr::Ternary(
                Box::new(cond),
                Box::new(then_branch),
                Box::new(else_branch),
            ));
        }
        Ok(cond)
    }

    fn or_expr(&mut self) -> Result<Expr, String> {
        let mut left = self.and_expr()?;
        while *self.peek() == Token::Or {
            self.advance();
            let right = self.and_expr()?;
            left = Expr::Binary(BinaryOp::Or, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Expr, String> {
        let mut left = self.comparison()?;
        while *self.peek() == Token::And {
            self.advance();
            let right = self.comparison()?;
            left = Expr::Binary(BinaryOp::And, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    // Single, non-chaining comparison
    fn comparison(&mut self) -> Result<Expr, String> {
        let left = self.additive()?;
        let op = match self.peek() {
            Token::Eq => BinaryOp::Eq,
            Token::Ne => BinaryOp::Ne,
            Token::Lt => BinaryOp::Lt,
            Token::Le => BinaryOp::Le,
            Token::Gt => BinaryOp::Gt,
            Token::Ge => BinaryOp::Ge,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.additive()?;
        Ok(Expr::Binary(op, Box::new(left), Box::new(right)))
    }

    fn additive(&mut self) -> Result<Expr, String> {
        let mut left = self.multiplicative()?;
        loop {
            let op = match self.peek() {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.multiplicative()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
    }

    fn multiplicative(&mut self) -> Result<Expr, String> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek() {
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                Token::Percent => BinaryOp::Mod,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.unary()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
    }

    fn unary(&mut self) -> Result<Expr, String> {
        self.descend()?;
        let result = match self.peek() {
            Token::Minus => {
                self.advance();
                self.unary().map(|e| Expr::Unary(UnaryOp::Neg, Box::new(e)))
            }
            Token::Not => {
                self.advance();
                self.unary().map(|e| Expr::Unary(UnaryOp::Not, Box::new(e)))
            }
            _ => self.primary(),
        };
        self.depth -= 1;
        result
    }

    fn primary(&mut self) -> Result<Expr, String> {
        match self.advance() {
            Token::Int(n) => Ok(Expr::Literal(Scalar::Int(n))),
            Token::Float(f) => Ok(Expr::Literal(Scalar::Float(f))),
            Token::Str(s) => Ok(Expr::Literal(Scalar::Str(s))),
            Token::Bool(b) => Ok(Expr::Literal(Scalar::Bool(b))),
            Token::Null => Ok(Expr::Literal(Scalar::Null)),
            Token::LParen => {
                let inner = self.ternary()?;
                self.expect(Token::RParen, "closing ')'")?;
                Ok(inner)
            }
            Token::Ident(name) => {
                // `row[...]` indexes the row mapping; any other identifier
                // is shorthand for a field of the same name.
                if name == "row" && *self.peek() == Token::LBracket {
                    self.advance();
                    let index = self.ternary()?;
                    self.expect(Token::RBracket, "closing ']'")?;
                    return Ok(Expr::RowIndex(Box::new(index)));
                }
                if *self.peek() == Token::LBracket {
                    return Err(format!("only 'row' can be indexed, not '{}'", name));
                }
                Ok(Expr::Field(name))
            }
            token => Err(format!("unexpected token {:?}", token)),
        }
    }
}

/// Parse an expression string into an evaluable tree.
pub fn parse(input: &str) -> Result<Expr, String> {
    let tokens = Lexer::new(input).tokenize()?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expression = parser.ternary()?;
    if *parser.peek() != Token::Eof {
        return Err(format!("unexpected trailing token {:?}", parser.peek()));
    }
    Ok(expression)
}

/// Evaluate a parsed expression against one row.
///
/// The row is the only reachable state; errors carry the message that ends
/// up in the `ERROR:` cell.
pub fn evaluate(expression: &Expr, row: &Row) -> Result<Scalar, String> {
    match expression {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Field(name) => lookup(row, name),
        Expr::RowIndex(index) => match evaluate(index, row)? {
            Scalar::Str(name) => lookup(row, &name),
            other => Err(format!("row index must be a string, got {:?}", other)),
        },
        Expr::Unary(op, inner) => {
            let value = evaluate(inner, row)?;
            apply_unary(*op, value)
        }
        Expr::Binary(BinaryOp::And, left, right) => {
            // Short-circuit; operands must be booleans
            match evaluate(left, row)? {
                Scalar::Bool(false) => Ok(Scalar::Bool(false)),
                Scalar::Bool(true) => expect_bool(evaluate(right, row)?, "&&"),
                other => Err(type_error("&&", &other)),
            }
        }
        Expr::Binary(BinaryOp::Or, left, right) => match evaluate(left, row)? {
            Scalar::Bool(true) => Ok(Scalar::Bool(true)),
            Scalar::Bool(false) => expect_bool(evaluate(right, row)?, "||"),
            other => Err(type_error("||", &other)),
        },
        Expr::Binary(op, left, right) => {
            let lhs = evaluate(left, row)?;
            let rhs = evaluate(right, row)?;
            apply_binary(*op, lhs, rhs)
        }
        Expr::Ternary(cond, then_branch, else_branch) => match evaluate(cond, row)? {
            Scalar::Bool(true) => evaluate(then_branch, row),
            Scalar::Bool(false) => evaluate(else_branch, row),
            other => Err(format!(
                "conditional test must be a boolean, got {:?}",
                other
            )),
        },
    }
}

fn lookup(row: &Row, name: &str) -> Result<Scalar, String> {
    row.get(name)
        .cloned()
        .ok_or_else(|| format!("unknown field '{}'", name))
}

fn expect_bool(value: Scalar, op: &str) -> Result<Scalar, String> {
    match value {
        Scalar::Bool(_) => Ok(value),
        other => Err(type_error(op, &other)),
    }
}

fn type_error(op: &str, value: &Scalar) -> String {
    format!("'{}' requires boolean operands, got {:?}", op, value)
}

fn apply_unary(op: UnaryOp, value: Scalar) -> Result<Scalar, String> {
    match (op, value) {
        (UnaryOp::Neg, Scalar::Int(n)) => n
            .checked_neg()
            .map(Scalar::Int)
            .ok_or_else(|| "integer overflow".to_string()),
        (UnaryOp::Neg, Scalar::Float(f)) => Ok(Scalar::Float(-f)),
        (UnaryOp::Neg, other) => Err(format!("cannot negate {:?}", other)),
        (UnaryOp::Not, Scalar::Bool(b)) => Ok(Scalar::Bool(!b)),
        (UnaryOp::Not, other) => Err(format!("'!' requires a boolean, got {:?}", other)),
    }
}

fn apply_binary(op: BinaryOp, lhs: Scalar, rhs: Scalar) -> Result<Scalar, String> {
    match op {
        BinaryOp::Add => arith(lhs, rhs, "+", i64::checked_add, |a, b| a + b, true),
        BinaryOp::Sub => arith(lhs, rhs, "-", i64::checked_sub, |a, b| a - b, false),
        BinaryOp::Mul => arith(lhs, rhs, "*", i64::checked_mul, |a, b| a * b, false),
        BinaryOp::Div => divide(lhs, rhs),
        BinaryOp::Mod => modulo(lhs, rhs),
        BinaryOp::Eq => Ok(Scalar::Bool(values_equal(&lhs, &rhs))),
        BinaryOp::Ne => Ok(Scalar::Bool(!values_equal(&lhs, &rhs))),
        BinaryOp::Lt => ordering(lhs, rhs, "<").map(|o| Scalar::Bool(o == Ordering::Less)),
        BinaryOp::Le => ordering(lhs, rhs, "<=").map(|o| Scalar::Bool(o != Ordering::Greater)),
        BinaryOp::Gt => ordering(lhs, rhs, ">").map(|o| Scalar::Bool(o == Ordering::Greater)),
        BinaryOp::Ge => ordering(lhs, rhs, ">=").map(|o| Scalar::Bool(o != Ordering::Less)),
        // Short-circuit operators are handled in `evaluate`
        BinaryOp::And | BinaryOp::Or => unreachable!("handled in evaluate"),
    }
}

fn arith(
    lhs: Scalar,
    rhs: Scalar,
    op: &str,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
    allow_concat: bool,
) -> Result<Scalar, String> {
    match (&lhs, &rhs) {
        (Scalar::Int(a), Scalar::Int(b)) => int_op(*a, *b)
            .map(Scalar::Int)
            .ok_or_else(|| "integer overflow".to_string()),
        (Scalar::Str(a), Scalar::Str(b)) if allow_concat => {
            Ok(Scalar::Str(format!("{}{}", a, b)))
        }
        _ => match (number_of(&lhs), number_of(&rhs)) {
            (Some(a), Some(b)) => Ok(Scalar::Float(float_op(a, b))),
            _ => Err(format!("cannot apply '{}' to {:?} and {:?}", op, lhs, rhs)),
        },
    }
}

fn divide(lhs: Scalar, rhs: Scalar) -> Result<Scalar, String> {
    match (number_of(&lhs), number_of(&rhs)) {
        (Some(_), Some(b)) if b == 0.0 => Err("division by zero".to_string()),
        (Some(a), Some(b)) => Ok(Scalar::Float(a / b)),
        _ => Err(format!("cannot apply '/' to {:?} and {:?}", lhs, rhs)),
    }
}

fn modulo(lhs: Scalar, rhs: Scalar) -> Result<Scalar, String> {
    match (&lhs, &rhs) {
        (Scalar::Int(_), Scalar::Int(0)) => Err("division by zero".to_string()),
        // None here means i64::MIN % -1; zero divisors are caught above
        (Scalar::Int(a), Scalar::Int(b)) => a
            .checked_rem_euclid(*b)
            .map(Scalar::Int)
            .ok_or_else(|| "integer overflow".to_string()),
        _ => match (number_of(&lhs), number_of(&rhs)) {
            (Some(_), Some(b)) if b == 0.0 => Err("division by zero".to_string()),
            (Some(a), Some(b)) => Ok(Scalar::Float(a % b)),
            _ => Err(format!("cannot apply '%' to {:?} and {:?}", lhs, rhs)),
        },
    }
}

/// Strict numeric view for arithmetic: ints and floats only, no string or
/// boolean coercion (unlike the looser sort-key coercion).
fn number_of(value: &Scalar) -> Option<f64> {
    match value {
        Scalar::Int(n) => Some(*n as f64),
        Scalar::Float(f) => Some(*f),
        _ => None,
    }
}

fn values_equal(lhs: &Scalar, rhs: &Scalar) -> bool {
    match (lhs, rhs) {
        (Scalar::Int(a), Scalar::Float(b)) | (Scalar::Float(b), Scalar::Int(a)) => {
            (*a as f64) == *b
        }
        _ => lhs == rhs,
    }
}

fn ordering(lhs: Scalar, rhs: Scalar, op: &str) -> Result<Ordering, String> {
    if let (Some(a), Some(b)) = (number_of(&lhs), number_of(&rhs)) {
        return a
            .partial_cmp(&b)
            .ok_or_else(|| format!("cannot compare {:?} and {:?}", lhs, rhs));
    }
    match (&lhs, &rhs) {
        (Scalar::Str(a), Scalar::Str(b)) => Ok(a.cmp(b)),
        _ => Err(format!(
            "cannot apply '{}' to {:?} and {:?}",
            op, lhs, rhs
        )),
    }
}
