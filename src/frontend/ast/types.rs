//! AST type syntax nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type spelling as written in a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    /// `Int`, `Swift.Void`, `Result<Int, Error>` (generic arguments stay inside the segment text).
    Path { segments: Vec<String> },
    /// `()`, `(Void)`, `(Int, String)`.
    Tuple { elements: Vec<TypeExpr> },
    /// `[Element]`.
    Array { element: Box<TypeExpr> },
    /// `Wrapped?`.
    Optional { wrapped: Box<TypeExpr> },
    /// `inout Inner`, only valid in function-type parameter position.
    InOut { inner: Box<TypeExpr> },
    Function(FunctionType),
    /// Editor placeholder such as `<#Type#>`.
    Placeholder { label: String },
    /// Spelling the host handed over without structure.
    Verbatim { text: String },
}

impl TypeExpr {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let text = name.into();
        Self::Path {
            segments: text.split('.').map(str::to_string).collect(),
        }
    }

    #[must_use]
    pub fn void() -> Self {
        Self::named("Void")
    }

    #[must_use]
    pub fn tuple(elements: Vec<TypeExpr>) -> Self {
        Self::Tuple { elements }
    }

    #[must_use]
    pub fn array(element: TypeExpr) -> Self {
        Self::Array {
            element: Box::new(element),
        }
    }

    #[must_use]
    pub fn optional(wrapped: TypeExpr) -> Self {
        Self::Optional {
            wrapped: Box::new(wrapped),
        }
    }

    #[must_use]
    pub fn inout(inner: TypeExpr) -> Self {
        Self::InOut {
            inner: Box::new(inner),
        }
    }

    #[must_use]
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::Placeholder {
            label: label.into(),
        }
    }

    /// `inout T`, structured or spelled verbatim.
    #[must_use]
    pub fn is_inout(&self) -> bool {
        match self {
            Self::InOut { .. } => true,
            Self::Verbatim { text } => text
                .trim_start()
                .strip_prefix("inout")
                .is_some_and(|rest| rest.starts_with(char::is_whitespace)),
            _ => false,
        }
    }

    /// Returns `true` for a path spelled exactly as `segments`.
    #[must_use]
    pub fn is_path(&self, expected: &[&str]) -> bool {
        match self {
            Self::Path { segments } => {
                segments.len() == expected.len()
                    && segments
                        .iter()
                        .zip(expected)
                        .all(|(segment, expected)| segment == expected)
            }
            _ => false,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Path { segments } => f.write_str(&segments.join(".")),
            TypeExpr::Tuple { elements } => {
                f.write_str("(")?;
                write_joined(f, elements)?;
                f.write_str(")")
            }
            TypeExpr::Array { element } => write!(f, "[{element}]"),
            TypeExpr::Optional { wrapped } => match wrapped.as_ref() {
                TypeExpr::Function(_) => write!(f, "({wrapped})?"),
                _ => write!(f, "{wrapped}?"),
            },
            TypeExpr::InOut { inner } => write!(f, "inout {inner}"),
            TypeExpr::Function(function) => function.fmt(f),
            TypeExpr::Placeholder { label } => write!(f, "<#{label}#>"),
            TypeExpr::Verbatim { text } => f.write_str(text),
        }
    }
}

/// Function type such as `(Int, [String]) async throws -> Bool`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionType {
    pub parameters: Vec<TypeExpr>,
    #[serde(default)]
    pub effects: EffectSpecifiers,
    pub return_type: Box<TypeExpr>,
}

impl FunctionType {
    #[must_use]
    pub fn new(parameters: Vec<TypeExpr>, effects: EffectSpecifiers, return_type: TypeExpr) -> Self {
        Self {
            parameters,
            effects,
            return_type: Box::new(return_type),
        }
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        write_joined(f, &self.parameters)?;
        f.write_str(")")?;
        write!(f, "{}", self.effects)?;
        write!(f, " -> {}", self.return_type)
    }
}

/// Effect specifiers of a signature or function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EffectSpecifiers {
    #[serde(default)]
    pub is_async: bool,
    #[serde(default)]
    pub throws: Option<ThrowsSpecifier>,
}

impl EffectSpecifiers {
    pub const NONE: Self = Self {
        is_async: false,
        throws: None,
    };

    #[must_use]
    pub fn new(is_async: bool, throws: Option<ThrowsSpecifier>) -> Self {
        Self { is_async, throws }
    }

    #[must_use]
    pub fn is_rethrows(self) -> bool {
        matches!(self.throws, Some(ThrowsSpecifier::Rethrows))
    }
}

/// Renders with a leading space per specifier: ` async throws`.
impl fmt::Display for EffectSpecifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_async {
            f.write_str(" async")?;
        }
        match self.throws {
            Some(ThrowsSpecifier::Throws) => f.write_str(" throws"),
            Some(ThrowsSpecifier::Rethrows) => f.write_str(" rethrows"),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThrowsSpecifier {
    Throws,
    Rethrows,
}

fn write_joined(f: &mut fmt::Formatter<'_>, types: &[TypeExpr]) -> fmt::Result {
    for (index, ty) in types.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_splits_qualified_paths() {
        let ty = TypeExpr::named("Swift.Void");
        assert!(ty.is_path(&["Swift", "Void"]));
        assert!(!ty.is_path(&["Void"]));
        assert_eq!(ty.to_string(), "Swift.Void");
    }

    #[test]
    fn optional_function_types_are_parenthesised() {
        let function = TypeExpr::Function(FunctionType::new(
            vec![TypeExpr::named("String"), TypeExpr::array(TypeExpr::named("Int"))],
            EffectSpecifiers::new(true, Some(ThrowsSpecifier::Throws)),
            TypeExpr::void(),
        ));
        assert_eq!(
            TypeExpr::optional(function).to_string(),
            "((String, [Int]) async throws -> Void)?"
        );
        assert_eq!(TypeExpr::optional(TypeExpr::named("Int")).to_string(), "Int?");
    }

    #[test]
    fn tuples_render_their_elements() {
        assert_eq!(TypeExpr::tuple(Vec::new()).to_string(), "()");
        assert_eq!(
            TypeExpr::tuple(vec![TypeExpr::named("Swift.Void")]).to_string(),
            "(Swift.Void)"
        );
    }

    #[test]
    fn inout_is_detected_in_both_spellings() {
        assert!(TypeExpr::inout(TypeExpr::named("Int")).is_inout());
        let verbatim = TypeExpr::Verbatim {
            text: "inout [String]".into(),
        };
        assert!(verbatim.is_inout());
        let lookalike = TypeExpr::Verbatim {
            text: "inoutBuffer".into(),
        };
        assert!(!lookalike.is_inout());
        assert!(!TypeExpr::named("Int").is_inout());
    }

    #[test]
    fn inout_and_placeholder_spellings() {
        assert_eq!(TypeExpr::inout(TypeExpr::named("Int")).to_string(), "inout Int");
        assert_eq!(TypeExpr::placeholder("Type").to_string(), "<#Type#>");
    }
}
