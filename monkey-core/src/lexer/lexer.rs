use std::fmt::Display;

use super::token::{lookup_ident, Token, TokenKind};

pub type Spanned = (u32, Token, u32);

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	ch: Option<(u32, char)>,
	next_ch: Option<(u32, char)>,
	input: T,
}

impl<T: Iterator<Item = (u32, char)>> Display for Lexer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.position, self.ch, self.next_ch
		)
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
		let mut lexer = Self {
			position: 0,
			ch: None,
			next_ch: None,
			input,
		};

		lexer.next_char();
		lexer.next_char();

		lexer
	}

	/// Returns the next token. Past the end of input this keeps returning `Eof`.
	pub fn next_token(&mut self) -> Spanned {
		self.skip_whitespace();

		let ch = match self.ch {
			Some((_, ch)) => ch,
			None => {
				let offset = self.offset();
				return (offset, Token::eof(), offset);
			}
		};

		let kind = match ch {
			'=' if self.peek_is('=') => return self.eat_two_chars(TokenKind::Eq),
			'!' if self.peek_is('=') => return self.eat_two_chars(TokenKind::NotEq),
			'=' => TokenKind::Assign,
			'!' => TokenKind::Bang,
			'+' => TokenKind::Plus,
			'-' => TokenKind::Minus,
			'*' => TokenKind::Asterisk,
			'/' => TokenKind::Slash,
			'<' => TokenKind::Lt,
			'>' => TokenKind::Gt,
			',' => TokenKind::Comma,
			';' => TokenKind::Semicolon,
			':' => TokenKind::Colon,
			'(' => TokenKind::LParen,
			')' => TokenKind::RParen,
			'{' => TokenKind::LBrace,
			'}' => TokenKind::RBrace,
			'[' => TokenKind::LBracket,
			']' => TokenKind::RBracket,
			'"' => return self.lex_string(),
			c if is_letter(c) => return self.lex_ident(),
			c if c.is_ascii_digit() => return self.lex_number(),
			_ => TokenKind::Illegal,
		};

		self.eat_one_char(kind)
	}

	fn next_char(&mut self) -> Option<char> {
		let current = self.ch.take();

		if let Some((pos, ch)) = current {
			self.position = pos + ch.len_utf8() as u32;
		}

		self.ch = self.next_ch.take();
		self.next_ch = self.input.next();

		current.map(|(_, ch)| ch)
	}

	fn offset(&self) -> u32 {
		match self.ch {
			Some((pos, _)) => pos,
			None => self.position,
		}
	}

	fn peek_is(&self, expected: char) -> bool {
		matches!(self.next_ch, Some((_, ch)) if ch == expected)
	}

	fn skip_whitespace(&mut self) {
		while let Some((_, ' ' | '\t' | '\n' | '\r')) = self.ch {
			self.next_char();
		}
	}

	fn eat_one_char(&mut self, kind: TokenKind) -> Spanned {
		let start = self.offset();
		let mut literal = String::new();
		literal.extend(self.next_char());

		(start, Token::new(kind, literal), self.offset())
	}

	fn eat_two_chars(&mut self, kind: TokenKind) -> Spanned {
		let start = self.offset();
		let mut literal = String::new();
		literal.extend(self.next_char());
		literal.extend(self.next_char());

		(start, Token::new(kind, literal), self.offset())
	}

	fn lex_ident(&mut self) -> Spanned {
		let start = self.offset();
		let mut ident = String::new();

		while let Some((_, ch)) = self.ch {
			if !is_letter(ch) {
				break;
			}
			ident.extend(self.next_char());
		}

		let kind = lookup_ident(&ident);

		(start, Token::new(kind, ident), self.offset())
	}

	// Digits are kept as text; the parser owns the conversion so it can report overflow.
	fn lex_number(&mut self) -> Spanned {
		let start = self.offset();
		let mut value = String::new();

		while let Some((_, ch)) = self.ch {
			if !ch.is_ascii_digit() {
				break;
			}
			value.extend(self.next_char());
		}

		(start, Token::new(TokenKind::Int, value), self.offset())
	}

	fn lex_string(&mut self) -> Spanned {
		let start = self.offset();
		let mut value = String::new();

		self.next_char(); // opening quote

		loop {
			match self.ch {
				Some((_, '"')) => {
					self.next_char();
					break;
				},
				Some(_) => value.extend(self.next_char()),
				None => break,
			}
		}

		(start, Token::new(TokenKind::String, value), self.offset())
	}
}

fn is_letter(ch: char) -> bool {
	ch.is_ascii_alphabetic() || ch == '_'
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = Spanned;

	fn next(&mut self) -> Option<Self::Item> {
		Some(self.next_token())
	}
}
