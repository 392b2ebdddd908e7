use crate::diagnostics::Span;
use crate::frontend::ast::Attribute;

pub const STUBBABLE: &str = "Stubbable";
pub const STUBBABLE_FUNCTION: &str = "StubbableFunction";
pub const STUBBABLE_PROPERTY: &str = "StubbableProperty";
pub const MOCKABLE: &str = "Mockable";

/// Stage an annotation runs in: containers tag members first, members are rewritten second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationRole {
    Container,
    Member,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroInvocation {
    pub role: AnnotationRole,
    /// Name as written, used verbatim in diagnostics.
    pub name: String,
    pub arguments: Option<String>,
    pub span: Option<Span>,
}

impl MacroInvocation {
    #[must_use]
    pub fn new(role: AnnotationRole, attribute: Attribute) -> Self {
        Self {
            role,
            name: attribute.name,
            arguments: attribute.arguments,
            span: attribute.span,
        }
    }

    #[must_use]
    pub fn key(&self) -> String {
        normalise_name(&self.name)
    }
}

/// Member-level marker attached during stage 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberMarker {
    Function,
    Property,
}

impl MemberMarker {
    #[must_use]
    pub fn attribute_name(self) -> &'static str {
        match self {
            MemberMarker::Function => STUBBABLE_FUNCTION,
            MemberMarker::Property => STUBBABLE_PROPERTY,
        }
    }

    #[must_use]
    pub fn attribute(self, span: Option<Span>) -> Attribute {
        Attribute {
            name: self.attribute_name().to_string(),
            arguments: None,
            span,
        }
    }
}

/// Stage 1 output: which member (by index in its container) gets which marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedMember {
    pub index: usize,
    pub marker: MemberMarker,
}

#[must_use]
pub fn normalise_name(name: &str) -> String {
    name.trim().trim_start_matches('@').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_normalise_case_whitespace_and_sigil() {
        assert_eq!(normalise_name(" StubbableFunction "), "stubbablefunction");
        assert_eq!(normalise_name("@Mockable"), "mockable");
    }

    #[test]
    fn markers_spell_their_attributes() {
        let attribute = MemberMarker::Property.attribute(Some(Span::new(3, 13)));
        assert_eq!(attribute.to_string(), "@StubbableProperty");
        assert_eq!(attribute.span, Some(Span::new(3, 13)));
    }
}
