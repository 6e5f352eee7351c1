/// Primitive type keywords recognised in type expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
	/// `string`
	String,
	/// `int` / `integer`
	Int,
	/// `float` / `double`
	Float,
	/// `bool` / `boolean`
	Bool,
	/// `array` / `sequence`
	Array,
	/// `object` / `record`
	Object,
	/// `mixed`
	Mixed,
	/// `null`
	Null,
	/// `void`
	Void,
}

impl Primitive {
	/// All primitive kinds in declaration order.
	pub const ALL: [Primitive; 9] = [
		Primitive::String,
		Primitive::Int,
		Primitive::Float,
		Primitive::Bool,
		Primitive::Array,
		Primitive::Object,
		Primitive::Mixed,
		Primitive::Null,
		Primitive::Void,
	];

	/// Match a keyword case-insensitively.
	pub fn from_keyword(word: &str) -> Option<Self> {
		let kind = match word.to_ascii_lowercase().as_str() {
			"string" => Self::String,
			"int" | "integer" => Self::Int,
			"float" | "double" => Self::Float,
			"bool" | "boolean" => Self::Bool,
			"array" | "sequence" => Self::Array,
			"object" | "record" => Self::Object,
			"mixed" => Self::Mixed,
			"null" => Self::Null,
			"void" => Self::Void,
			_ => return None,
		};
		Some(kind)
	}

	/// Canonical keyword spelling.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::String => "string",
			Self::Int => "int",
			Self::Float => "float",
			Self::Bool => "bool",
			Self::Array => "array",
			Self::Object => "object",
			Self::Mixed => "mixed",
			Self::Null => "null",
			Self::Void => "void",
		}
	}
}

/// One `|`-separated alternative of a type expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alternative<'a> {
	/// Primitive keyword.
	Primitive(Primitive),
	/// Quoted string literal (enum-like member).
	Literal(&'a str),
	/// Anything else: a candidate custom schema name.
	Named(&'a str),
}

/// Parsed type expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeExpr<'a> {
	/// Alternatives in source order, grouping and collection markers removed.
	pub alternatives: Vec<Alternative<'a>>,
	/// Whether an array-of marker appeared anywhere in the expression.
	pub is_collection: bool,
}

impl<'a> TypeExpr<'a> {
	/// Iterate candidate custom names, primitives and literals filtered out.
	pub fn custom_names(&self) -> impl Iterator<Item = &'a str> + '_ {
		self.alternatives.iter().filter_map(|alt| match alt {
			Alternative::Named(name) => Some(*name),
			_ => None,
		})
	}
}

/// Parse type expression text such as `(Datasource|string)[]|null`.
///
/// Never fails: unrecognised punctuation acts as a separator.
pub fn parse_type_expr(raw: &str) -> TypeExpr<'_> {
	let mut expr = TypeExpr::default();
	let bytes = raw.as_bytes();
	let mut word_start: Option<usize> = None;
	let mut generic_marks: Vec<usize> = Vec::new();
	let mut idx = 0;

	while idx < bytes.len() {
		let byte = bytes[idx];
		match byte {
			b'\'' | b'"' => {
				flush_word(raw, &mut word_start, idx, &mut expr);
				let body = idx + 1;
				let close = raw[body..].find(char::from(byte)).map(|offset| body + offset).unwrap_or(raw.len());
				expr.alternatives.push(Alternative::Literal(&raw[body..close]));
				idx = close + 1;
				continue;
			}
			b'[' => {
				flush_word(raw, &mut word_start, idx, &mut expr);
				expr.is_collection = true;
				idx = raw[idx..].find(']').map(|offset| idx + offset + 1).unwrap_or(raw.len());
				continue;
			}
			b'<' => {
				let word = take_word(raw, &mut word_start, idx);
				match word {
					Some(word) if is_collection_wrapper(word) => expr.is_collection = true,
					Some(word) => push_word(word, &mut expr),
					None => {}
				}
				generic_marks.push(expr.alternatives.len());
			}
			b',' => {
				flush_word(raw, &mut word_start, idx, &mut expr);
				if let Some(mark) = generic_marks.last() {
					expr.alternatives.truncate(*mark);
				}
			}
			b'>' => {
				flush_word(raw, &mut word_start, idx, &mut expr);
				generic_marks.pop();
			}
			b'?' => {
				flush_word(raw, &mut word_start, idx, &mut expr);
				expr.alternatives.push(Alternative::Primitive(Primitive::Null));
			}
			b'|' | b'(' | b')' | b']' => flush_word(raw, &mut word_start, idx, &mut expr),
			_ if byte.is_ascii_whitespace() => flush_word(raw, &mut word_start, idx, &mut expr),
			_ => {
				if word_start.is_none() {
					word_start = Some(idx);
				}
			}
		}
		idx += 1;
	}
	flush_word(raw, &mut word_start, raw.len(), &mut expr);

	expr
}

fn take_word<'a>(raw: &'a str, word_start: &mut Option<usize>, end: usize) -> Option<&'a str> {
	let start = word_start.take()?;
	let word = raw[start..end].trim();
	if word.is_empty() { None } else { Some(word) }
}

fn flush_word<'a>(raw: &'a str, word_start: &mut Option<usize>, end: usize, expr: &mut TypeExpr<'a>) {
	if let Some(word) = take_word(raw, word_start, end) {
		push_word(word, expr);
	}
}

fn push_word<'a>(word: &'a str, expr: &mut TypeExpr<'a>) {
	let alt = match Primitive::from_keyword(word) {
		Some(kind) => Alternative::Primitive(kind),
		None => Alternative::Named(word),
	};
	expr.alternatives.push(alt);
}

fn is_collection_wrapper(word: &str) -> bool {
	word.eq_ignore_ascii_case("array") || word.eq_ignore_ascii_case("list") || word.eq_ignore_ascii_case("iterable")
}
