use std::iter::Peekable;
use std::str::Chars;

use crate::token::{Token, TokenKind};
use typedjs_ast::Span;

/// Punctuators, longest first so that the first prefix match wins.
const PUNCTUATORS: &[(&str, TokenKind)] = &[
    (">>>=", TokenKind::GtGtGtEq),
    ("...", TokenKind::DotDotDot),
    ("===", TokenKind::EqEqEq),
    ("!==", TokenKind::BangEqEq),
    ("**=", TokenKind::StarStarEq),
    ("<<=", TokenKind::LtLtEq),
    (">>=", TokenKind::GtGtEq),
    (">>>", TokenKind::GtGtGt),
    ("&&=", TokenKind::AmpAmpEq),
    ("||=", TokenKind::PipePipeEq),
    ("??=", TokenKind::QuestionQuestionEq),
    ("=>", TokenKind::FatArrow),
    ("==", TokenKind::EqEq),
    ("!=", TokenKind::BangEq),
    ("<=", TokenKind::LtEq),
    (">=", TokenKind::GtEq),
    ("&&", TokenKind::AmpAmp),
    ("||", TokenKind::PipePipe),
    ("??", TokenKind::QuestionQuestion),
    ("?.", TokenKind::QuestionDot),
    ("++", TokenKind::PlusPlus),
    ("--", TokenKind::MinusMinus),
    ("+=", TokenKind::PlusEq),
    ("-=", TokenKind::MinusEq),
    ("*=", TokenKind::StarEq),
    ("/=", TokenKind::SlashEq),
    ("%=", TokenKind::PercentEq),
    ("&=", TokenKind::AmpEq),
    ("|=", TokenKind::PipeEq),
    ("^=", TokenKind::CaretEq),
    ("**", TokenKind::StarStar),
    ("<<", TokenKind::LtLt),
    (">>", TokenKind::GtGt),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("=", TokenKind::Eq),
    ("<", TokenKind::Lt),
    (">", TokenKind::Gt),
    ("!", TokenKind::Bang),
    ("&", TokenKind::Amp),
    ("|", TokenKind::Pipe),
    ("^", TokenKind::Caret),
    ("~", TokenKind::Tilde),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("[", TokenKind::LBracket),
    ("]", TokenKind::RBracket),
    (";", TokenKind::Semicolon),
    (",", TokenKind::Comma),
    (".", TokenKind::Dot),
    (":", TokenKind::Colon),
    ("?", TokenKind::Question),
    ("@", TokenKind::At),
];

/// The lexer/tokenizer for TypedJS.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::str::CharIndices<'a>,
    current_pos: usize,
    current_char: Option<char>,
    /// Added to every span; set when lexing a slice of a larger document
    offset: usize,
    last_kind: Option<TokenKind>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer from source code.
    pub fn new(source: &'a str) -> Self {
        Self::with_offset(source, 0)
    }

    /// Creates a lexer for a fragment that starts at byte `offset` of its document.
    pub fn with_offset(source: &'a str, offset: usize) -> Self {
        let mut chars = source.char_indices();
        let current_char = chars.next().map(|(_, c)| c);
        Self {
            source,
            chars,
            current_pos: 0,
            current_char,
            offset,
            last_kind: None,
        }
    }

    /// Tokenizes the entire source code; the last token is always `Eof`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Gets the next token from the source.
    pub fn next_token(&mut self) -> Token {
        let token = self.scan_token();
        self.last_kind = Some(token.kind);
        token
    }

    fn scan_token(&mut self) -> Token {
        if let Some(error_token) = self.skip_whitespace_and_comments() {
            return error_token;
        }

        let start = self.current_pos;

        let Some(ch) = self.current_char else {
            return self.token(TokenKind::Eof, start, String::new());
        };

        match ch {
            '"' | '\'' => self.read_string_literal(ch),
            '`' => self.read_template_literal(),
            '0'..='9' => self.read_number(),
            '.' if self.peek().map_or(false, |c| c.is_ascii_digit()) => self.read_number(),
            '/' if !self.last_kind.map_or(false, |k| k.ends_operand()) => self.read_regex(),
            _ if is_identifier_start(ch) => self.read_identifier_or_keyword(),
            _ => self.read_punctuator(ch),
        }
    }

    // Helper methods

    fn token(&self, kind: TokenKind, start: usize, value: String) -> Token {
        Token::new(
            kind,
            Span::new(self.offset + start, self.offset + self.current_pos),
            value,
        )
    }

    fn error(&self, start: usize, message: &str) -> Token {
        self.token(TokenKind::Error, start, message.to_string())
    }

    fn advance(&mut self) {
        if let Some((pos, ch)) = self.chars.next() {
            self.current_pos = pos;
            self.current_char = Some(ch);
        } else {
            self.current_pos = self.source.len();
            self.current_char = None;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.clone().next().map(|(_, c)| c)
    }

    fn rest(&self) -> &'a str {
        &self.source[self.current_pos..]
    }

    fn skip_whitespace_and_comments(&mut self) -> Option<Token> {
        loop {
            match self.current_char {
                Some(ch) if ch.is_whitespace() || ch == '\u{feff}' => {
                    self.advance();
                }
                Some('/') if self.peek() == Some('/') => {
                    while let Some(ch) = self.current_char {
                        if ch == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek() == Some('*') => {
                    let start = self.current_pos;
                    self.advance();
                    self.advance();
                    loop {
                        match self.current_char {
                            Some('*') if self.peek() == Some('/') => {
                                self.advance();
                                self.advance();
                                break;
                            }
                            Some(_) => self.advance(),
                            None => return Some(self.error(start, "Unterminated multi-line comment")),
                        }
                    }
                }
                _ => return None,
            }
        }
    }

    fn read_punctuator(&mut self, ch: char) -> Token {
        let start = self.current_pos;
        let rest = self.rest();

        let matched = PUNCTUATORS.iter().find(|(text, _)| rest.starts_with(text)).copied();

        match matched {
            // `a ?.5 : b` is a conditional, not optional chaining
            Some(("?.", _)) if rest[2..].starts_with(|c: char| c.is_ascii_digit()) => {
                self.advance();
                self.token(TokenKind::Question, start, "?".to_string())
            }
            Some((text, kind)) => {
                for _ in 0..text.len() {
                    self.advance();
                }
                self.token(kind, start, text.to_string())
            }
            None => {
                self.advance();
                self.error(start, &format!("Unexpected character: {}", ch))
            }
        }
    }

    fn read_string_literal(&mut self, quote: char) -> Token {
        let start = self.current_pos;
        self.advance(); // opening quote
        let body_start = self.current_pos;

        while let Some(ch) = self.current_char {
            if ch == quote {
                let raw = &self.source[body_start..self.current_pos];
                self.advance(); // closing quote
                return self.token(TokenKind::StringLiteral, start, unescape(raw));
            } else if ch == '\\' {
                self.advance();
                self.advance();
            } else if ch == '\n' {
                return self.error(start, "Unterminated string literal");
            } else {
                self.advance();
            }
        }

        self.error(start, "Unterminated string literal")
    }

    fn read_template_literal(&mut self) -> Token {
        let start = self.current_pos;
        self.advance(); // opening backtick
        let body_start = self.current_pos;

        if !self.skip_template_body() {
            return self.error(start, "Unterminated template literal");
        }

        let raw = self.source[body_start..self.current_pos].to_string();
        self.advance(); // closing backtick
        self.token(TokenKind::TemplateLiteral, start, raw)
    }

    /// Stops on the closing backtick. Returns false at end of input.
    fn skip_template_body(&mut self) -> bool {
        while let Some(ch) = self.current_char {
            match ch {
                '`' => return true,
                '\\' => {
                    self.advance();
                    self.advance();
                }
                '$' if self.peek() == Some('{') => {
                    self.advance();
                    self.advance();
                    if !self.skip_substitution() {
                        return false;
                    }
                }
                _ => self.advance(),
            }
        }
        false
    }

    /// Skips a `${ ... }` body up to and including its closing brace.
    fn skip_substitution(&mut self) -> bool {
        let mut depth = 0usize;
        while let Some(ch) = self.current_char {
            match ch {
                '{' => depth += 1,
                '}' if depth == 0 => {
                    self.advance();
                    return true;
                }
                '}' => depth -= 1,
                '"' | '\'' => {
                    self.advance();
                    while let Some(c) = self.current_char {
                        if c == ch || c == '\n' {
                            break;
                        }
                        if c == '\\' {
                            self.advance();
                        }
                        self.advance();
                    }
                }
                '`' => {
                    self.advance();
                    if !self.skip_template_body() {
                        return false;
                    }
                }
                _ => {}
            }
            self.advance();
        }
        false
    }

    fn read_number(&mut self) -> Token {
        let start = self.current_pos;

        if self.current_char == Some('0') {
            let radix = match self.peek() {
                Some('x') | Some('X') => Some(16),
                Some('o') | Some('O') => Some(8),
                Some('b') | Some('B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                return self.read_radix_number(start, radix);
            }
        }

        let mut value = String::new();
        self.read_digits(&mut value);

        if self.current_char == Some('.') {
            value.push('.');
            self.advance();
            self.read_digits(&mut value);
        }

        if matches!(self.current_char, Some('e') | Some('E')) {
            value.push('e');
            self.advance();
            if let Some(sign @ ('+' | '-')) = self.current_char {
                value.push(sign);
                self.advance();
            }
            self.read_digits(&mut value);
        }

        if self.current_char == Some('n') {
            self.advance();
            return self.token(TokenKind::BigIntLiteral, start, value);
        }

        if value.starts_with('.') {
            value.insert(0, '0');
        }

        self.token(TokenKind::NumberLiteral, start, value)
    }

    fn read_digits(&mut self, value: &mut String) {
        while let Some(ch) = self.current_char {
            if ch.is_ascii_digit() {
                value.push(ch);
            } else if ch != '_' {
                break;
            }
            self.advance();
        }
    }

    fn read_radix_number(&mut self, start: usize, radix: u32) -> Token {
        let mut value = String::new();
        value.push('0');
        self.advance(); // 0
        value.push(self.current_char.unwrap_or('x').to_ascii_lowercase());
        self.advance(); // x / o / b

        while let Some(ch) = self.current_char {
            if ch.is_digit(radix) {
                value.push(ch);
            } else if ch != '_' {
                break;
            }
            self.advance();
        }

        if self.current_char == Some('n') {
            self.advance();
            return self.token(TokenKind::BigIntLiteral, start, value);
        }

        self.token(TokenKind::NumberLiteral, start, value)
    }

    fn read_identifier_or_keyword(&mut self) -> Token {
        let start = self.current_pos;
        let is_private = self.current_char == Some('#');
        if is_private {
            self.advance();
        }
        let name_start = self.current_pos;

        while let Some(ch) = self.current_char {
            if is_identifier_part(ch) {
                self.advance();
            } else {
                break;
            }
        }

        if self.current_pos == name_start {
            return self.error(start, "Expected a private member name after '#'");
        }

        let value = self.source[start..self.current_pos].to_string();
        let kind = if is_private {
            TokenKind::Identifier
        } else {
            TokenKind::keyword(&value).unwrap_or(TokenKind::Identifier)
        };
        self.token(kind, start, value)
    }

    fn read_regex(&mut self) -> Token {
        let start = self.current_pos;
        self.advance(); // opening slash
        let mut in_class = false;

        loop {
            match self.current_char {
                None | Some('\n') => return self.error(start, "Unterminated regular expression"),
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some('[') => {
                    in_class = true;
                    self.advance();
                }
                Some(']') => {
                    in_class = false;
                    self.advance();
                }
                Some('/') if !in_class => {
                    self.advance();
                    break;
                }
                Some(_) => self.advance(),
            }
        }

        while let Some(ch) = self.current_char {
            if ch.is_ascii_alphabetic() {
                self.advance();
            } else {
                break;
            }
        }

        let value = self.source[start..self.current_pos].to_string();
        self.token(TokenKind::RegexLiteral, start, value)
    }
}

// `#` only opens private class member names
fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$' || ch == '#'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Resolves escape sequences of a string or template body.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(escaped) = chars.next() else {
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            'x' => out.push(read_hex(&mut chars, 2)),
            'u' if chars.peek() == Some(&'{') => {
                chars.next();
                let mut code = 0u32;
                while let Some(c) = chars.next() {
                    match c.to_digit(16) {
                        Some(digit) => code = code.saturating_mul(16).saturating_add(digit),
                        None => break,
                    }
                }
                out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
            }
            'u' => out.push(read_hex(&mut chars, 4)),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }

    out
}

fn read_hex(chars: &mut Peekable<Chars<'_>>, count: usize) -> char {
    let mut code = 0u32;
    for _ in 0..count {
        match chars.peek().and_then(|c| c.to_digit(16)) {
            Some(digit) => {
                code = code * 16 + digit;
                chars.next();
            }
            None => break,
        }
    }
    char::from_u32(code).unwrap_or('\u{FFFD}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).tokenize().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keywords() {
        let source = "let const var function return if else interface enum";
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize();

        assert_eq!(tokens[0].kind, TokenKind::Let);
        assert_eq!(tokens[1].kind, TokenKind::Const);
        assert_eq!(tokens[2].kind, TokenKind::Var);
        assert_eq!(tokens[3].kind, TokenKind::Function);
        assert_eq!(tokens[4].kind, TokenKind::Return);
        assert_eq!(tokens[5].kind, TokenKind::If);
        assert_eq!(tokens[6].kind, TokenKind::Else);
        assert_eq!(tokens[7].kind, TokenKind::Interface);
        assert_eq!(tokens[8].kind, TokenKind::Enum);
    }

    #[test]
    fn test_contextual_words_are_identifiers() {
        let source = "type as of async readonly keyof";
        let tokens = Lexer::new(source).tokenize();

        for token in &tokens[..6] {
            assert_eq!(token.kind, TokenKind::Identifier);
        }
        assert_eq!(tokens[0].value, "type");
        assert_eq!(tokens[6].kind, TokenKind::Eof);
    }

    #[test]
    fn test_numbers() {
        let source = "123 45.67 0x1A 0o77 0b1010 1_000_000 .5 1e3";
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize();

        assert_eq!(tokens[0].kind, TokenKind::NumberLiteral);
        assert_eq!(tokens[0].value, "123");
        assert_eq!(tokens[1].value, "45.67");
        assert_eq!(tokens[2].value, "0x1A");
        assert_eq!(tokens[3].value, "0o77");
        assert_eq!(tokens[4].value, "0b1010");
        assert_eq!(tokens[5].value, "1000000");
        assert_eq!(tokens[6].value, "0.5");
        assert_eq!(tokens[7].value, "1e3");
    }

    #[test]
    fn test_bigint_literals() {
        let tokens = Lexer::new("42n 0n 0xffn").tokenize();

        assert_eq!(tokens[0].kind, TokenKind::BigIntLiteral);
        assert_eq!(tokens[0].value, "42");
        assert_eq!(tokens[1].kind, TokenKind::BigIntLiteral);
        assert_eq!(tokens[1].value, "0");
        assert_eq!(tokens[2].kind, TokenKind::BigIntLiteral);
        assert_eq!(tokens[2].value, "0xff");
    }

    #[test]
    fn test_strings() {
        let source = r#""hello" 'world' `template` "a\tb" 'it\'s'"#;
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize();

        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].value, "hello");
        assert_eq!(tokens[1].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[1].value, "world");
        assert_eq!(tokens[2].kind, TokenKind::TemplateLiteral);
        assert_eq!(tokens[2].value, "template");
        assert_eq!(tokens[3].value, "a\tb");
        assert_eq!(tokens[4].value, "it's");
    }

    #[test]
    fn test_template_with_substitutions() {
        let source = "`Hello ${user.name + `!${n}`}, ${ {a: 1}.a }` x";
        let tokens = Lexer::new(source).tokenize();

        assert_eq!(tokens[0].kind, TokenKind::TemplateLiteral);
        assert_eq!(tokens[0].value, "Hello ${user.name + `!${n}`}, ${ {a: 1}.a }");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_unterminated_literals_are_errors() {
        let tokens = Lexer::new("\"abc\nlet").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(tokens[0].value, "Unterminated string literal");

        let tokens = Lexer::new("`abc ${x").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Error);

        let tokens = Lexer::new("/* open").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(tokens[0].value, "Unterminated multi-line comment");
    }

    #[test]
    fn test_operators() {
        // `/` only divides after an operand
        let source = "a / + - * % ** += -= === !== <= >= && || ?? ?. >>>= ...";
        let kinds = kinds(source);

        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Slash,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Percent,
                TokenKind::StarStar,
                TokenKind::PlusEq,
                TokenKind::MinusEq,
                TokenKind::EqEqEq,
                TokenKind::BangEqEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
                TokenKind::QuestionQuestion,
                TokenKind::QuestionDot,
                TokenKind::GtGtGtEq,
                TokenKind::DotDotDot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_question_dot_before_digit() {
        assert_eq!(
            kinds("a?.5:1"),
            vec![
                TokenKind::Identifier,
                TokenKind::Question,
                TokenKind::NumberLiteral,
                TokenKind::Colon,
                TokenKind::NumberLiteral,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_regex_versus_division() {
        let tokens = Lexer::new("const r = /ab+[/]c/gi; x = a / b / c;").tokenize();
        assert_eq!(tokens[3].kind, TokenKind::RegexLiteral);
        assert_eq!(tokens[3].value, "/ab+[/]c/gi");

        let slashes = tokens.iter().filter(|t| t.kind == TokenKind::Slash).count();
        assert_eq!(slashes, 2);
    }

    #[test]
    fn test_comments() {
        let source = r#"
            // Single line comment
            let x = 5;
            /* Multi-line
               comment */
            const y = 10;
        "#;
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize();

        assert_eq!(tokens[0].kind, TokenKind::Let);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].kind, TokenKind::Eq);
        assert_eq!(tokens[3].kind, TokenKind::NumberLiteral);
        assert_eq!(tokens[4].kind, TokenKind::Semicolon);
        assert_eq!(tokens[5].kind, TokenKind::Const);
    }

    #[test]
    fn test_identifiers() {
        let source = "foo bar_123 _private $jquery #count";
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize();

        assert_eq!(tokens[0].value, "foo");
        assert_eq!(tokens[1].value, "bar_123");
        assert_eq!(tokens[2].value, "_private");
        assert_eq!(tokens[3].value, "$jquery");
        assert_eq!(tokens[4].value, "#count");
        assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Identifier));
    }

    #[test]
    fn test_private_names() {
        let tokens = Lexer::new("this.#if = #count;").tokenize();
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].value, "#if");
        assert_eq!(tokens[4].value, "#count");
        assert_eq!(tokens[4].span, Span::new(11, 17));

        let tokens = Lexer::new("a # b").tokenize();
        assert_eq!(tokens[1].kind, TokenKind::Error);
        assert_eq!(tokens[1].span, Span::new(2, 3));
        assert_eq!(tokens[2].value, "b");
        assert_eq!(tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn test_annotated_binding() {
        let source = "const p: Pair = [1, -2];";
        let tokens = Lexer::new(source).tokenize();

        assert_eq!(tokens[0].kind, TokenKind::Const);
        assert_eq!(tokens[1].value, "p");
        assert_eq!(tokens[2].kind, TokenKind::Colon);
        assert_eq!(tokens[3].value, "Pair");
        assert_eq!(tokens[4].kind, TokenKind::Eq);
        assert_eq!(tokens[5].kind, TokenKind::LBracket);
        assert_eq!(tokens[8].kind, TokenKind::Minus);
        assert_eq!(tokens[9].value, "2");
    }

    #[test]
    fn test_spans_with_offset() {
        let tokens = Lexer::with_offset("a + b", 10).tokenize();
        assert_eq!(tokens[0].span, Span::new(10, 11));
        assert_eq!(tokens[2].span, Span::new(14, 15));
        assert_eq!(tokens[3].span, Span::new(15, 15));
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"a\nb"), "a\nb");
        assert_eq!(unescape(r"\x41B\u{43}"), "ABC");
        assert_eq!(unescape(r"\`\$"), "`$");
        assert_eq!(unescape("line\\\ncontinued"), "linecontinued");
    }
}
