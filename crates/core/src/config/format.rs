//! Line format of `config.env`.
//!
//! A dotenv-compatible subset: `KEY=VALUE` per line, `#` comments, an optional
//! `export ` prefix, and single- or double-quoted values.

/// One line of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line {
	Entry {
		key: String,
		value: String,
		/// Original text, reused on save while the value is untouched.
		raw: Option<String>,
	},
	/// Comment, blank or unparseable line, written back as-is.
	Verbatim(String),
}

impl Line {
	pub(crate) fn entry(key: &str, value: &str) -> Self {
		Line::Entry {
			key: key.to_string(),
			value: value.to_string(),
			raw: None,
		}
	}

	pub(crate) fn key(&self) -> Option<&str> {
		match self {
			Line::Entry { key, .. } => Some(key),
			Line::Verbatim(_) => None,
		}
	}

	pub(crate) fn render(&self) -> String {
		match self {
			Line::Entry { raw: Some(raw), .. } => raw.clone(),
			Line::Entry { key, value, raw: None } => format!("{key}={}", render_value(value)),
			Line::Verbatim(text) => text.clone(),
		}
	}
}

/// Parses one line. Returns `Err` with the text for lines that look like
/// data but are not a valid `KEY=VALUE` pair.
pub(crate) fn parse_line(line: &str) -> Result<Line, String> {
	let trimmed = line.trim();
	if trimmed.is_empty() || trimmed.starts_with('#') {
		return Ok(Line::Verbatim(line.to_string()));
	}

	let body = trimmed.strip_prefix("export ").map(str::trim_start).unwrap_or(trimmed);
	let Some((key, rest)) = body.split_once('=') else {
		return Err(line.to_string());
	};

	let key = key.trim();
	if !is_valid_key(key) {
		return Err(line.to_string());
	}

	Ok(Line::Entry {
		key: key.to_string(),
		value: parse_value(rest.trim()),
		raw: Some(line.to_string()),
	})
}

pub(crate) fn is_valid_key(key: &str) -> bool {
	!key.is_empty() && !key.chars().any(|c| c.is_whitespace() || matches!(c, '=' | '#' | '"' | '\''))
}

fn parse_value(text: &str) -> String {
	if let Some(rest) = text.strip_prefix('\'') {
		return match rest.find('\'') {
			Some(end) => rest[..end].to_string(),
			None => rest.to_string(),
		};
	}

	if let Some(rest) = text.strip_prefix('"') {
		let mut out = String::with_capacity(rest.len());
		let mut chars = rest.chars();
		while let Some(c) = chars.next() {
			match c {
				'"' => break,
				'\\' => match chars.next() {
					Some('n') => out.push('\n'),
					Some('r') => out.push('\r'),
					Some('t') => out.push('\t'),
					Some(other) => out.push(other),
					None => out.push('\\'),
				},
				_ => out.push(c),
			}
		}
		return out;
	}

	// Unquoted: a `#` preceded by whitespace starts a comment.
	let mut end = text.len();
	let mut prev_space = false;
	for (i, c) in text.char_indices() {
		if c == '#' && prev_space {
			end = i;
			break;
		}
		prev_space = c.is_whitespace();
	}
	text[..end].trim_end().to_string()
}

fn render_value(value: &str) -> String {
	let plain = value
		.chars()
		.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '/' | '+' | '@' | '%' | ',' | '~' | '='));
	if plain {
		return value.to_string();
	}

	let mut out = String::with_capacity(value.len() + 2);
	out.push('"');
	for c in value.chars() {
		match c {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			_ => out.push(c),
		}
	}
	out.push('"');
	out
}
