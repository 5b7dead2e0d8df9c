//! Fixed naming constants shared by the decoder, normalizer and renderer.
//!
//! Unlike the limits in `compile_time`, these values describe the identifier
//! format and the generated site, so they are not selected per build profile.

/// Root namespace skipped at the start of every identifier (`T:MW.`)
pub const DEFAULT_ROOT_NAMESPACE: &str = "MW";

/// Length of the `<Kind>:` marker that precedes the root namespace
pub const KIND_MARKER_LENGTH: usize = 2;

/// Character introducing a constructor segment (`#ctor`)
pub const CONSTRUCTOR_MARKER: char = '#';

/// Number of characters following the constructor marker (`ctor`)
pub const CONSTRUCTOR_MARKER_LENGTH: usize = 4;

/// Member name recorded for constructors
pub const CONSTRUCTOR_NAME: &str = "constructor";

/// Member name recorded for conversion operators
pub const IMPLICIT_OPERATOR_NAME: &str = "implicit operator";

/// Length of the conversion operator method name (`op_Implicit`, `op_Explicit`)
pub const CONVERSION_OPERATOR_LENGTH: usize = 11;

/// Separator between the source and target type of a conversion operator
pub const CONVERSION_SEPARATOR: char = '~';

/// Placeholder letter used for generic arity markers
pub const GENERIC_PLACEHOLDER: &str = "T";

/// Letters substituted, in order, for standalone generic parameters in signatures
pub const GENERIC_LETTERS: &str = "TYUMNKR";

/// Default title appended to every page title
pub const DEFAULT_SITE_TITLE: &str = "MW Unity Namespace";

/// Default stylesheet linked from every page
pub const DEFAULT_STYLESHEET: &str = "CSS/MWUnityNamespace.css";

/// Default directory for generated pages
pub const DEFAULT_OUTPUT_DIR: &str = "Docs/HTML";

/// Extension of generated pages
pub const PAGE_EXTENSION: &str = "html";

/// Extension expected for documentation exports
pub const EXPORT_EXTENSION: &str = "xml";
