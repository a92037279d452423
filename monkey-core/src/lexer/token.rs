use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
	Illegal,
	Eof,

	// Identifiers and literals
	Ident,
	Int,
	String,

	// Operators
	Assign,
	Plus,
	Minus,
	Bang,
	Asterisk,
	Slash,

	Lt,
	Gt,
	Eq,
	NotEq,

	// Delimiters
	Comma,
	Semicolon,
	Colon,
	LParen,
	RParen,
	LBrace,
	RBrace,
	LBracket,
	RBracket,

	// Keywords
	Function,
	Let,
	True,
	False,
	If,
	Else,
	Return,
}

impl TokenKind {
	pub fn as_literal(&self) -> &'static str {
		match self {
			Self::Illegal => "ILLEGAL",
			Self::Eof => "EOF",
			Self::Ident => "IDENT",
			Self::Int => "INT",
			Self::String => "STRING",
			Self::Assign => "=",
			Self::Plus => "+",
			Self::Minus => "-",
			Self::Bang => "!",
			Self::Asterisk => "*",
			Self::Slash => "/",
			Self::Lt => "<",
			Self::Gt => ">",
			Self::Eq => "==",
			Self::NotEq => "!=",
			Self::Comma => ",",
			Self::Semicolon => ";",
			Self::Colon => ":",
			Self::LParen => "(",
			Self::RParen => ")",
			Self::LBrace => "{",
			Self::RBrace => "}",
			Self::LBracket => "[",
			Self::RBracket => "]",
			Self::Function => "FUNCTION",
			Self::Let => "LET",
			Self::True => "TRUE",
			Self::False => "FALSE",
			Self::If => "IF",
			Self::Else => "ELSE",
			Self::Return => "RETURN",
		}
	}

	pub fn is_reserved_word(&self) -> bool {
		matches!(
			self,
			Self::Function | Self::Let | Self::True | Self::False | Self::If | Self::Else | Self::Return
		)
	}
}

impl Display for TokenKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_literal())
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
	pub kind: TokenKind,
	pub literal: String,
}

impl Token {
	pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
		Self { kind, literal: literal.into() }
	}

	pub fn eof() -> Self {
		Self::new(TokenKind::Eof, "")
	}
}

impl Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			TokenKind::Ident | TokenKind::Int | TokenKind::Illegal => write!(f, "{}({})", self.kind, self.literal),
			TokenKind::String => write!(f, "{}(\"{}\")", self.kind, self.literal),
			_ => write!(f, "{}", self.kind),
		}
	}
}

pub fn lookup_ident(word: &str) -> TokenKind {
	match word {
		"fn" => TokenKind::Function,
		"let" => TokenKind::Let,
		"true" => TokenKind::True,
		"false" => TokenKind::False,
		"if" => TokenKind::If,
		"else" => TokenKind::Else,
		"return" => TokenKind::Return,
		_ => TokenKind::Ident,
	}
}
