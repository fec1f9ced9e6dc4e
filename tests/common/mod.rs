//! Minimal evaluator for the MySQL expressions the compiler emits, so tests
//! can check the JSON a row would produce without a live server.
//!
//! Supports string/number literals, column references, `=`, `IS NULL`,
//! `CONCAT`, `CONCAT_WS`, `IFNULL`, `NULLIF` and `IF`. Subqueries are not
//! evaluated: each `(SELECT ...)` takes the next value from a list supplied
//! by the test.

#![allow(dead_code)]

use std::collections::HashMap;

pub type Row = HashMap<String, Option<String>>;

pub fn row(values: &[(&str, Option<&str>)]) -> Row {
    values
        .iter()
        .map(|(name, value)| (name.to_string(), value.map(str::to_string)))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Str(String),
    Word(String),
    Quoted(String),
    LParen,
    RParen,
    Comma,
    Eq,
}

#[derive(Debug)]
enum Expr {
    Literal(String),
    Column(String),
    Call(String, Vec<Expr>),
    Eq(Box<Expr>, Box<Expr>),
    IsNull(Box<Expr>),
    Subquery(usize),
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

fn tokenize(sql: &str) -> Vec<Token> {
    let chars: Vec<char> = sql.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            c if c.is_whitespace() => i += 1,
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            '=' => {
                tokens.push(Token::Eq);
                i += 1;
            }
            '\'' => {
                let mut text = String::new();
                i += 1;
                loop {
                    match chars.get(i) {
                        Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                            text.push('\'');
                            i += 2;
                        }
                        Some('\'') => {
                            i += 1;
                            break;
                        }
                        Some(c) => {
                            text.push(*c);
                            i += 1;
                        }
                        None => panic!("unterminated string literal in {}", sql),
                    }
                }
                tokens.push(Token::Str(text));
            }
            '`' => {
                let mut name = String::new();
                i += 1;
                loop {
                    match chars.get(i) {
                        Some('`') if chars.get(i + 1) == Some(&'`') => {
                            name.push('`');
                            i += 2;
                        }
                        Some('`') => {
                            i += 1;
                            break;
                        }
                        Some(c) => {
                            name.push(*c);
                            i += 1;
                        }
                        None => panic!("unterminated quoted identifier in {}", sql),
                    }
                }
                tokens.push(Token::Quoted(name));
            }
            c if is_word_char(c) => {
                let start = i;
                while i < chars.len() && is_word_char(chars[i]) {
                    i += 1;
                }
                tokens.push(Token::Word(chars[start..i].iter().collect()));
            }
            c => panic!("unexpected character '{}' in {}", c, sql),
        }
    }
    tokens
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    subqueries: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) {
        let token = self.next();
        assert_eq!(token, expected, "unexpected token at {}", self.pos);
    }

    fn is_word(&self, offset: usize, word: &str) -> bool {
        matches!(
            self.tokens.get(self.pos + offset),
            Some(Token::Word(w)) if w.eq_ignore_ascii_case(word)
        )
    }

    fn expr(&mut self) -> Expr {
        let left = self.primary();
        if self.peek() == Some(&Token::Eq) {
            self.pos += 1;
            let right = self.primary();
            return Expr::Eq(Box::new(left), Box::new(right));
        }
        if self.is_word(0, "IS") && self.is_word(1, "NULL") {
            self.pos += 2;
            return Expr::IsNull(Box::new(left));
        }
        left
    }

    fn primary(&mut self) -> Expr {
        match self.next() {
            Token::Str(text) => Expr::Literal(text),
            Token::LParen if self.is_word(0, "SELECT") => {
                let mut depth = 1;
                while depth > 0 {
                    match self.next() {
                        Token::LParen => depth += 1,
                        Token::RParen => depth -= 1,
                        _ => {}
                    }
                }
                self.subqueries += 1;
                Expr::Subquery(self.subqueries - 1)
            }
            Token::LParen => {
                let inner = self.expr();
                self.expect(Token::RParen);
                inner
            }
            Token::Word(word) if self.peek() == Some(&Token::LParen) => {
                self.pos += 1;
                let mut args = Vec::new();
                if self.peek() != Some(&Token::RParen) {
                    loop {
                        args.push(self.expr());
                        if self.peek() == Some(&Token::Comma) {
                            self.pos += 1;
                        } else {
                            break;
                        }
                    }
                }
                self.expect(Token::RParen);
                Expr::Call(word.to_ascii_uppercase(), args)
            }
            Token::Word(word) if word.chars().next().is_some_and(|c| c.is_ascii_digit()) => {
                Expr::Literal(word)
            }
            Token::Word(word) | Token::Quoted(word) => Expr::Column(word),
            other => panic!("unexpected token {:?}", other),
        }
    }
}

fn truthy(value: &Option<String>) -> bool {
    value
        .as_deref()
        .is_some_and(|v| v.parse::<f64>().unwrap_or(0.0) != 0.0)
}

fn eval(expr: &Expr, row: &Row, subqueries: &[Option<&str>]) -> Option<String> {
    match expr {
        Expr::Literal(text) => Some(text.clone()),
        Expr::Column(name) => {
            let column = name.rsplit('.').next().unwrap_or(name);
            row.get(column)
                .unwrap_or_else(|| panic!("row has no column '{}'", column))
                .clone()
        }
        Expr::Subquery(idx) => subqueries
            .get(*idx)
            .unwrap_or_else(|| panic!("no value supplied for subquery #{}", idx))
            .map(str::to_string),
        Expr::IsNull(inner) => {
            let is_null = eval(inner, row, subqueries).is_none();
            Some(if is_null { "1" } else { "0" }.into())
        }
        Expr::Eq(left, right) => {
            let left = eval(left, row, subqueries)?;
            let right = eval(right, row, subqueries)?;
            let equal = match (left.parse::<f64>(), right.parse::<f64>()) {
                (Ok(l), Ok(r)) => l == r,
                _ => left == right,
            };
            Some(if equal { "1" } else { "0" }.into())
        }
        Expr::Call(name, args) => {
            let values: Vec<Option<String>> =
                args.iter().map(|a| eval(a, row, subqueries)).collect();
            match name.as_str() {
                "CONCAT" => values.into_iter().collect::<Option<Vec<_>>>().map(|v| v.concat()),
                "CONCAT_WS" => {
                    let (separator, rest) = values.split_first().expect("CONCAT_WS separator");
                    let separator = separator.as_ref()?;
                    let present: Vec<String> = rest.iter().flatten().cloned().collect();
                    Some(present.join(separator.as_str()))
                }
                "IFNULL" => values[0].clone().or_else(|| values[1].clone()),
                "NULLIF" => match (&values[0], &values[1]) {
                    (Some(a), Some(b)) if a == b => None,
                    _ => values[0].clone(),
                },
                "IF" => {
                    if truthy(&values[0]) {
                        values[1].clone()
                    } else {
                        values[2].clone()
                    }
                }
                other => panic!("unsupported function {}", other),
            }
        }
    }
}

fn parse(sql: &str) -> Expr {
    let mut parser = Parser {
        tokens: tokenize(sql),
        pos: 0,
        subqueries: 0,
    };
    let expr = parser.expr();
    assert_eq!(parser.pos, parser.tokens.len(), "trailing tokens in {}", sql);
    expr
}

/// Evaluates one expression against `row`.
pub fn eval_expr(sql: &str, row: &Row, subqueries: &[Option<&str>]) -> Option<String> {
    eval(&parse(sql), row, subqueries)
}

/// Evaluates the select list of `SELECT <expr> FROM ...` against `row`.
pub fn eval_select(sql: &str, row: &Row, subqueries: &[Option<&str>]) -> Option<String> {
    let body = sql.strip_prefix("SELECT ").expect("statement starts with SELECT");
    eval_expr(select_list(body), row, subqueries)
}

/// The text before the first top-level ` FROM `.
fn select_list(body: &str) -> &str {
    let bytes = body.as_bytes();
    let mut depth = 0i32;
    let mut in_string = false;
    for (idx, &b) in bytes.iter().enumerate() {
        match b {
            b'\'' => in_string = !in_string,
            b'(' if !in_string => depth += 1,
            b')' if !in_string => depth -= 1,
            b' ' if !in_string && depth == 0 && body[idx..].starts_with(" FROM ") => {
                return &body[..idx];
            }
            _ => {}
        }
    }
    panic!("no top-level FROM in {}", body)
}
