//! Member identifier decoder
//!
//! Identifiers look like `M:MW.Kinetic.Body.AddForce(MW.Vector3,System.Single)`.
//! After the kind marker and root namespace are skipped, a single scan walks
//! the remaining characters. The number of dots before the first `(` decides
//! where the namespace ends and which segment is the class.
//!
//! The decoder never fails. Input that does not follow the identifier grammar
//! produces a partially filled record rather than an error.

use super::record::{ImplicitConversion, MemberKind, MemberRecord, Parameter};
use crate::config::constants::{
    CONSTRUCTOR_MARKER, CONSTRUCTOR_MARKER_LENGTH, CONSTRUCTOR_NAME, CONVERSION_OPERATOR_LENGTH,
    CONVERSION_SEPARATOR, DEFAULT_ROOT_NAMESPACE, IMPLICIT_OPERATOR_NAME, KIND_MARKER_LENGTH,
};
use crate::config::runtime::DecoderSettings;
use crate::normalize::TokenNormalizer;

/// Which record field the scan is currently filling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Namespace,
    Class,
    Member,
    ImplicitOperator,
}

#[derive(Debug, Clone)]
pub struct IdentifierDecoder {
    normalizer: TokenNormalizer,
    root_namespace: String,
    /// `<Kind>:` + root namespace + `.`
    prefix_length: usize,
}

impl IdentifierDecoder {
    pub fn new(normalizer: TokenNormalizer, root_namespace: &str) -> Self {
        Self {
            normalizer,
            root_namespace: root_namespace.to_string(),
            prefix_length: KIND_MARKER_LENGTH + root_namespace.chars().count() + 1,
        }
    }

    /// Decoder for the default root namespace over the built-in table
    pub fn standard() -> Self {
        Self::new(TokenNormalizer::standard(), DEFAULT_ROOT_NAMESPACE)
    }

    pub fn from_settings(settings: &DecoderSettings, normalizer: TokenNormalizer) -> Self {
        Self::new(normalizer, &settings.root_namespace)
    }

    pub fn root_namespace(&self) -> &str {
        &self.root_namespace
    }

    pub fn normalizer(&self) -> &TokenNormalizer {
        &self.normalizer
    }

    /// Decode one identifier into a normalized record
    pub fn decode(&self, identifier: &str) -> MemberRecord {
        let chars: Vec<char> = identifier.chars().collect();
        let kind = chars
            .first()
            .copied()
            .and_then(MemberKind::from_marker)
            .unwrap_or(MemberKind::Member);
        let periods = count_periods(&chars);

        let mut namespace = String::new();
        let mut class = String::new();
        let mut member = String::new();
        let mut parameters = Vec::new();
        let mut implicit_conversion = None;

        let mut state = ScanState::Namespace;
        let mut period_count = 0usize;
        let mut i = self.prefix_length;

        while i < chars.len() {
            let c = chars[i];

            if c == CONSTRUCTOR_MARKER {
                member = CONSTRUCTOR_NAME.to_string();
                i += CONSTRUCTOR_MARKER_LENGTH;
            } else if c == '.' {
                period_count += 1;

                if kind == MemberKind::Type {
                    if period_count + 1 == periods {
                        state = ScanState::Class;
                    } else {
                        namespace.push('.');
                    }
                } else if period_count + 1 != periods {
                    // With exactly two periods the single segment is both
                    // namespace and class, so no class state is entered.
                    if periods != 2 && period_count + 2 == periods {
                        state = ScanState::Class;
                    } else {
                        namespace.push('.');
                    }
                } else if is_conversion_operator(&chars, i) {
                    member = IMPLICIT_OPERATOR_NAME.to_string();
                    i += CONVERSION_OPERATOR_LENGTH;
                    state = ScanState::ImplicitOperator;
                } else {
                    state = ScanState::Member;
                }
            } else {
                match state {
                    ScanState::Namespace => namespace.push(c),
                    ScanState::Class => class.push(c),
                    ScanState::Member if c == '(' => {
                        parameters = self.parse_parameters(&chars[i + 1..]);
                        break;
                    }
                    ScanState::Member => member.push(c),
                    ScanState::ImplicitOperator if c == '(' => {
                        implicit_conversion = Some(self.parse_conversion(&chars[i + 1..]));
                        break;
                    }
                    ScanState::ImplicitOperator => {}
                }
            }

            i += 1;
        }

        let namespace_path = self.normalizer.normalize_path(&namespace);
        let mut class_name = self.normalizer.normalize_type(&class);
        let member_name = self.normalizer.normalize_member(&member);

        if class_name.is_empty() {
            class_name = namespace_path.clone();
        }

        MemberRecord {
            kind,
            namespace_path,
            class_name,
            member_name,
            parameters,
            implicit_conversion,
        }
    }

    /// Split a parameter list (the characters after `(`) into normalized types
    fn parse_parameters(&self, chars: &[char]) -> Vec<Parameter> {
        let mut parameters = Vec::new();
        let mut token = String::new();
        let mut explicit_generic = false;

        for (k, &c) in chars.iter().enumerate() {
            if c != ')' {
                token.push(c);
            }

            if opens_explicit_generic_argument(chars, k) {
                explicit_generic = true;
            }

            // Namespace qualifiers are dropped as they are read, except inside
            // an explicit generic argument, which is trimmed once complete.
            if c == '.' && !explicit_generic {
                token.clear();
            }

            if c == ',' || c == ')' {
                if explicit_generic {
                    strip_generic_qualifier(&mut token);
                }

                let display = self.normalizer.normalize_type(&token);
                if !display.is_empty() {
                    parameters.push(Parameter::typed(display));
                }

                explicit_generic = false;
                token.clear();
            }

            if c == ')' {
                break;
            }
        }

        parameters
    }

    /// Parse `(From.Type)~To.Type` (the characters after `(`)
    fn parse_conversion(&self, chars: &[char]) -> ImplicitConversion {
        let text: String = chars.iter().filter(|c| **c != ')').collect();

        let (from, to) = match text.split_once(CONVERSION_SEPARATOR) {
            Some((from, to)) => (from, to),
            None => ("", text.as_str()),
        };

        ImplicitConversion {
            from_type: self.normalizer.normalize_type(last_component(from)),
            to_type: self.normalizer.normalize_type(last_component(to)),
        }
    }
}

impl Default for IdentifierDecoder {
    fn default() -> Self {
        Self::standard()
    }
}

/// Count the dots before the first `(`, including the one after the root namespace
fn count_periods(chars: &[char]) -> usize {
    chars
        .iter()
        .take_while(|c| **c != '(')
        .filter(|c| **c == '.')
        .count()
}

/// `.op_Implicit` and `.op_Explicit` both have `_` three and `p` six characters
/// after the dot.
fn is_conversion_operator(chars: &[char], dot: usize) -> bool {
    dot + 6 < chars.len() && chars[dot + 3] == '_' && chars[dot + 6] == 'p'
}

/// A `{` that is not followed by an arity marker opens a concrete generic
/// argument such as `MArray{MW.Kinetic.Collision}`.
fn opens_explicit_generic_argument(chars: &[char], k: usize) -> bool {
    chars[k] == '{' && chars.get(k + 1) != Some(&'`')
}

/// `MArray{MW.Kinetic.Collision}` becomes `MArray{Collision}`
fn strip_generic_qualifier(token: &mut String) {
    if let (Some(brace), Some(dot)) = (token.rfind('{'), token.rfind('.')) {
        if dot > brace {
            token.replace_range(brace + 1..=dot, "");
        }
    }
}

fn last_component(text: &str) -> &str {
    text.rsplit('.').next().unwrap_or(text)
}
