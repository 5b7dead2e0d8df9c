//! Translation table mapping raw type and operator tokens to display tokens

use crate::logging::codes;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Errors raised while loading extra translation entries
#[derive(Debug, Clone, thiserror::Error)]
pub enum NormalizeError {
    #[error("Failed to read translations file '{path}': {message}")]
    TranslationsFileUnreadable { path: PathBuf, message: String },

    #[error("Invalid translations TOML: {message}")]
    InvalidTranslations { message: String },

    #[error("Translation entry '{key}' has an empty key or value")]
    EmptyTranslation { key: String },
}

impl NormalizeError {
    pub fn error_code(&self) -> crate::logging::Code {
        codes::system::CONFIGURATION_ERROR
    }
}

/// CLR primitive names and their C# aliases
const PRIMITIVES: [(&str, &str); 15] = [
    ("Single", "float"),
    ("Boolean", "bool"),
    ("Int32", "int"),
    ("UInt32", "uint"),
    ("Int64", "long"),
    ("UInt64", "ulong"),
    ("Int16", "short"),
    ("UInt16", "ushort"),
    ("Byte", "byte"),
    ("SByte", "sbyte"),
    ("Double", "double"),
    ("Decimal", "decimal"),
    ("String", "string"),
    ("Char", "char"),
    ("Object", "object"),
];

/// Operator method names and the symbol shown after `operator`
const OPERATORS: [(&str, &str); 24] = [
    ("op_Addition", "+"),
    ("op_Subtraction", "-"),
    ("op_UnaryNegation", "-"),
    ("op_UnaryPlus", "+"),
    ("op_Multiply", "*"),
    ("op_Division", "/"),
    ("op_Modulus", "%"),
    ("op_ExclusiveOr", "^"),
    ("op_BitwiseOr", "|"),
    ("op_BitwiseAnd", "&"),
    ("op_GreaterThan", "&gt;"),
    ("op_LessThan", "&lt;"),
    ("op_GreaterThanOrEqual", "&gt;="),
    ("op_LessThanOrEqual", "&lt;="),
    ("op_RightShift", "&gt;&gt;"),
    ("op_LeftShift", "&lt;&lt;"),
    ("op_Equality", "=="),
    ("op_Inequality", "!="),
    ("op_LogicalNot", "!"),
    ("op_OnesComplement", "~"),
    ("op_Increment", "++"),
    ("op_Decrement", "--"),
    ("op_True", " true"),
    ("op_False", " false"),
];

/// `[translations]` table of an overrides file
#[derive(Debug, Deserialize)]
struct TranslationsFile {
    #[serde(default)]
    translations: HashMap<String, String>,
}

/// Immutable exact-match lookup from raw token to display token
///
/// Built once per run and shared by `Arc` between the decoder and normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    /// Table with no entries; every token falls through to the marker rules
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table: primitive aliases with their `@` (by-reference)
    /// and `[]` (array) variants, plus the operator method names.
    pub fn standard() -> Self {
        let mut entries = HashMap::with_capacity(PRIMITIVES.len() * 3 + OPERATORS.len());

        for (raw, alias) in PRIMITIVES {
            entries.insert(raw.to_string(), alias.to_string());
            entries.insert(format!("{}@", raw), format!("{}&", alias));
            entries.insert(format!("{}[]", raw), format!("{}[]", alias));
        }

        for (method, symbol) in OPERATORS {
            entries.insert(method.to_string(), format!("operator{}", symbol));
        }

        Self { entries }
    }

    /// Merge the `[translations]` table of a TOML document over this table
    ///
    /// Later entries replace built-in ones with the same key.
    pub fn merge_toml(mut self, content: &str) -> Result<Self, NormalizeError> {
        let file: TranslationsFile =
            toml::from_str(content).map_err(|e| NormalizeError::InvalidTranslations {
                message: e.to_string(),
            })?;

        for (key, value) in file.translations {
            if key.is_empty() || value.is_empty() {
                return Err(NormalizeError::EmptyTranslation { key });
            }
            self.entries.insert(key, value);
        }

        Ok(self)
    }

    /// Merge translations from a TOML file on disk
    pub fn merge_file(self, path: &Path) -> Result<Self, NormalizeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NormalizeError::TranslationsFileUnreadable {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        self.merge_toml(&content)
    }

    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(raw, display)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_standard_primitives_and_variants() {
        let table = TranslationTable::standard();

        assert_eq!(table.lookup("Single"), Some("float"));
        assert_eq!(table.lookup("Single@"), Some("float&"));
        assert_eq!(table.lookup("Int32[]"), Some("int[]"));
        assert_eq!(table.lookup("UInt32"), Some("uint"));
        assert_eq!(table.lookup("UInt64"), Some("ulong"));
        assert_eq!(table.lookup("String@"), Some("string&"));
        assert_eq!(table.lookup("Vector2"), None);
        assert_eq!(table.len(), PRIMITIVES.len() * 3 + OPERATORS.len());
    }

    #[test]
    fn test_standard_operators() {
        let table = TranslationTable::standard();

        assert_eq!(table.lookup("op_Addition"), Some("operator+"));
        assert_eq!(table.lookup("op_GreaterThan"), Some("operator&gt;"));
        assert_eq!(table.lookup("op_LeftShift"), Some("operator&lt;&lt;"));
        assert_eq!(table.lookup("op_Equality"), Some("operator=="));
        assert_eq!(table.lookup("op_True"), Some("operator true"));
        assert!(!table.contains("op_Implicit"));
    }

    #[test]
    fn test_merge_toml_overrides_and_extends() {
        let table = TranslationTable::standard()
            .merge_toml(
                r#"
                [translations]
                Single = "float32"
                Vector2 = "vec2"
                "#,
            )
            .unwrap();

        assert_eq!(table.lookup("Single"), Some("float32"));
        assert_eq!(table.lookup("Vector2"), Some("vec2"));
        assert_eq!(table.lookup("Int32"), Some("int"));
    }

    #[test]
    fn test_merge_toml_rejects_invalid_input() {
        let result = TranslationTable::empty().merge_toml("[translations\n");
        assert_matches!(result, Err(NormalizeError::InvalidTranslations { .. }));

        let result = TranslationTable::empty().merge_toml("[translations]\nFoo = \"\"\n");
        assert_matches!(result, Err(NormalizeError::EmptyTranslation { key }) if key == "Foo");
    }

    #[test]
    fn test_merge_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("translations.toml");
        fs::write(&path, "[translations]\nQuaternion = \"quat\"\n").unwrap();

        let table = TranslationTable::empty().merge_file(&path).unwrap();
        assert_eq!(table.lookup("Quaternion"), Some("quat"));
        assert_eq!(table.len(), 1);

        let missing = TranslationTable::empty().merge_file(&dir.path().join("missing.toml"));
        assert_matches!(
            missing,
            Err(NormalizeError::TranslationsFileUnreadable { .. })
        );
    }
}
