//! Token normalizer
//!
//! Rewrites raw tokens produced by the identifier decoder into display tokens.
//! Rules run in a fixed order:
//!
//! 1. commas are removed unless the token is a template context
//! 2. an exact table hit replaces the token and skips rules 3 to 5
//! 3. generic arity markers become the placeholder letter
//! 4. `@` becomes `&`
//! 5. the first `{` and `}` become `&lt;` and `&gt;`, one further `}` is dropped
//! 6. one trailing `.` is trimmed (not after a table hit)
//! 7. backticks are always stripped
//!
//! Path segments skip rules 3 to 5 and drop their arity suffix instead.

use super::table::TranslationTable;
use crate::config::constants::GENERIC_PLACEHOLDER;
use std::sync::Arc;

const ARITY_MARKER: char = '`';

#[derive(Debug, Clone)]
pub struct TokenNormalizer {
    table: Arc<TranslationTable>,
}

impl TokenNormalizer {
    pub fn new(table: Arc<TranslationTable>) -> Self {
        Self { table }
    }

    /// Normalizer over the built-in table
    pub fn standard() -> Self {
        Self::new(Arc::new(TranslationTable::standard()))
    }

    pub fn table(&self) -> &Arc<TranslationTable> {
        &self.table
    }

    /// Normalize one token. Never fails; unknown tokens pass through with
    /// only the marker rules applied.
    pub fn normalize(&self, token: &str, is_path_segment: bool, is_template_context: bool) -> String {
        let mut param: String = if is_template_context {
            token.to_string()
        } else {
            token.chars().filter(|c| *c != ',').collect()
        };

        if let Some(display) = self.table.lookup(&param) {
            param = display.to_string();
        } else {
            param = if is_path_segment {
                strip_arity_suffix(&param)
            } else {
                escape_braces_once(&rewrite_markers(&param))
            };

            if param.ends_with('.') {
                param.pop();
            }
        }

        param.retain(|c| c != ARITY_MARKER);
        param
    }

    /// Normalize a parameter or class token
    pub fn normalize_type(&self, token: &str) -> String {
        self.normalize(token, false, false)
    }

    /// Normalize a namespace path used as a page name
    pub fn normalize_path(&self, token: &str) -> String {
        self.normalize(token, true, false)
    }

    /// Normalize a member name, keeping commas
    pub fn normalize_member(&self, token: &str) -> String {
        self.normalize(token, false, true)
    }
}

impl Default for TokenNormalizer {
    fn default() -> Self {
        Self::standard()
    }
}

/// Apply the arity placeholder and reference marker rules
fn rewrite_markers(param: &str) -> String {
    let chars: Vec<char> = param.chars().collect();
    let mut rewritten = String::with_capacity(param.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            ARITY_MARKER => match chars.get(i + 1) {
                Some('0') | Some('1') => {
                    rewritten.push_str(GENERIC_PLACEHOLDER);
                    i += 1;
                }
                // Arity two replaces everything accumulated so far.
                Some('2') => {
                    rewritten = GENERIC_PLACEHOLDER.to_string();
                    i += 1;
                }
                _ => {}
            },
            '@' => rewritten.push('&'),
            c => rewritten.push(c),
        }
        i += 1;
    }

    rewritten
}

/// Drop every arity marker together with the digits that follow it
fn strip_arity_suffix(param: &str) -> String {
    let mut stripped = String::with_capacity(param.len());
    let mut chars = param.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ARITY_MARKER {
            while chars.next_if(|d| d.is_ascii_digit()).is_some() {}
        } else {
            stripped.push(c);
        }
    }

    stripped
}

/// Escape the first brace pair of a generic type and drop one stray closer
pub fn escape_braces_once(param: &str) -> String {
    param
        .replacen('{', "&lt;", 1)
        .replacen('}', "&gt;", 1)
        .replacen('}', "", 1)
}

/// Escape every brace, as used for decoration attribute text
pub fn escape_all_braces(text: &str) -> String {
    text.replace('{', "&lt;").replace('}', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TokenNormalizer {
        TokenNormalizer::standard()
    }

    #[test]
    fn test_table_substitution() {
        let n = normalizer();
        assert_eq!(n.normalize_type("Single"), "float");
        assert_eq!(n.normalize_type("Single@"), "float&");
        assert_eq!(n.normalize_type("Int32[]"), "int[]");
        assert_eq!(n.normalize_member("op_Addition"), "operator+");
        assert_eq!(n.normalize_member("op_Equality"), "operator==");
    }

    #[test]
    fn test_table_hits_are_idempotent() {
        let n = normalizer();
        for (raw, _) in n.table().iter() {
            let once = n.normalize_type(raw);
            assert_eq!(n.normalize_type(&once), once, "token {}", raw);
        }
    }

    #[test]
    fn test_arity_placeholders() {
        let n = normalizer();
        assert_eq!(n.normalize_type("``0"), "T");
        assert_eq!(n.normalize_type("`1"), "T");
        assert_eq!(n.normalize_type("MArray`1"), "MArrayT");
        // arity two overwrites whatever was accumulated
        assert_eq!(n.normalize_type("Pair`2"), "T");
        assert_eq!(n.normalize_type("Tuple`3"), "Tuple3");
    }

    #[test]
    fn test_reference_marker() {
        let n = normalizer();
        assert_eq!(n.normalize_type("Vector3@"), "Vector3&");
        assert_eq!(n.normalize_type("``0@"), "T&");
    }

    #[test]
    fn test_brace_escaping() {
        let n = normalizer();
        assert_eq!(n.normalize_type("MArray{Collision}"), "MArray&lt;Collision&gt;");
        assert_eq!(n.normalize_type("MArray{Collision}}"), "MArray&lt;Collision&gt;");
        assert_eq!(n.normalize_type("List{``0}"), "List&lt;T&gt;");
    }

    #[test]
    fn test_comma_removal_depends_on_template_context() {
        let n = normalizer();
        assert_eq!(n.normalize_type("Map{Int32,Single}"), "Map&lt;Int32Single&gt;");
        assert_eq!(n.normalize_member("Map{A,B}"), "Map&lt;A,B&gt;");
    }

    #[test]
    fn test_trailing_dot_trimmed_once() {
        let n = normalizer();
        assert_eq!(n.normalize_type("Circle."), "Circle");
        assert_eq!(n.normalize_path("Kinetic.Collision."), "Kinetic.Collision");
        assert_eq!(n.normalize_type("Circle.."), "Circle.");
    }

    #[test]
    fn test_path_segments_skip_marker_rules() {
        let n = normalizer();
        assert_eq!(n.normalize_path("Collections.MArray`1"), "Collections.MArray");
        assert_eq!(n.normalize_path("Kinetic@"), "Kinetic@");
        assert_eq!(n.normalize_path("Shapes{x}"), "Shapes{x}");
        assert_eq!(n.normalize_path("Int32"), "int");
    }

    #[test]
    fn test_never_emits_backticks_or_panics() {
        let n = normalizer();
        for token in ["", "`", "``", "a`", "`é", ".", "é@{", "}}}", "`2`2"] {
            for (path, template) in [(false, false), (true, false), (false, true)] {
                let out = n.normalize(token, path, template);
                assert!(!out.contains('`'), "{:?} -> {:?}", token, out);
            }
        }
        assert_eq!(n.normalize_type(""), "");
        assert_eq!(n.normalize_type("."), "");
    }

    #[test]
    fn test_escape_all_braces() {
        assert_eq!(
            escape_all_braces("RequireComponent(typeof(MList{Body}))"),
            "RequireComponent(typeof(MList&lt;Body&gt;))"
        );
    }
}
