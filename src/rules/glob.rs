use crate::error::{MultiprofError, Result};
use regex::Regex;
use std::iter::Peekable;
use std::str::Chars;

/// Path separator excluded by a single `*`.
pub const SEPARATOR: char = '/';

/// A glob pattern compiled to an anchored regex.
///
/// - `*` matches any run of characters except the separator
/// - `**` matches any run of characters, separators included
/// - `?` matches exactly one character, separators included
/// - `{a,b}` matches either alternative (alternatives may nest)
/// - `[abc]`, `[a-z]`, `[!a]` / `[^a]` are character classes
/// - `\x` matches `x` literally
#[derive(Debug, Clone)]
pub struct GlobPattern {
	source: String,
	regex: Regex,
}

impl GlobPattern {
	/// Compile a glob pattern.
	pub fn new(pattern: &str) -> Result<Self> {
		let translated = translate(pattern).map_err(|reason| MultiprofError::InvalidGlob {
			pattern: pattern.to_string(),
			reason,
		})?;

		let regex = Regex::new(&translated).map_err(|source| MultiprofError::InvalidRegex {
			pattern: pattern.to_string(),
			source,
		})?;

		Ok(GlobPattern {
			source: pattern.to_string(),
			regex,
		})
	}

	/// Check whether the whole of `candidate` matches.
	pub fn matches(&self, candidate: &str) -> bool {
		self.regex.is_match(candidate)
	}

	/// The pattern as written.
	pub fn as_str(&self) -> &str {
		&self.source
	}
}

/// Translate glob syntax into regex syntax.
fn translate(pattern: &str) -> std::result::Result<String, &'static str> {
	let mut chars = pattern.chars().peekable();
	let mut out = String::from("(?s)^");
	let mut brace_depth = 0usize;

	while let Some(c) = chars.next() {
		match c {
			'*' => {
				if chars.peek() == Some(&'*') {
					while chars.peek() == Some(&'*') {
						chars.next();
					}
					out.push_str(".*");
				} else {
					out.push_str("[^");
					push_class_literal(&mut out, SEPARATOR);
					out.push_str("]*");
				}
			}
			'?' => out.push('.'),
			'[' => translate_class(&mut chars, &mut out)?,
			'{' => {
				brace_depth += 1;
				out.push_str("(?:");
			}
			',' if brace_depth > 0 => out.push('|'),
			'}' if brace_depth > 0 => {
				brace_depth -= 1;
				out.push(')');
			}
			'\\' => match chars.next() {
				Some(escaped) => push_literal(&mut out, escaped),
				None => return Err("trailing escape character"),
			},
			other => push_literal(&mut out, other),
		}
	}

	if brace_depth > 0 {
		return Err("unclosed `{`");
	}

	out.push('$');
	Ok(out)
}

/// Translate a bracket expression; the opening `[` is already consumed.
fn translate_class(
	chars: &mut Peekable<Chars<'_>>,
	out: &mut String,
) -> std::result::Result<(), &'static str> {
	let mut class = String::from("[");
	if matches!(chars.peek(), Some('!') | Some('^')) {
		chars.next();
		class.push('^');
	}

	let mut first = true;
	loop {
		let c = chars.next().ok_or("unclosed `[`")?;
		match c {
			// A leading `]` is a member, not the terminator.
			']' if !first => break,
			'\\' => {
				let escaped = chars.next().ok_or("unclosed `[`")?;
				push_class_literal(&mut class, escaped);
			}
			'-' if !first && chars.peek() != Some(&']') => class.push('-'),
			other => push_class_literal(&mut class, other),
		}
		first = false;
	}

	class.push(']');
	out.push_str(&class);
	Ok(())
}

fn push_literal(out: &mut String, c: char) {
	let mut buf = [0u8; 4];
	out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

fn push_class_literal(class: &mut String, c: char) {
	if matches!(c, '\\' | '[' | ']' | '^' | '-' | '&' | '~') {
		class.push('\\');
	}
	class.push(c);
}
