mod collector;
mod diagnostics;
mod eligibility;
mod engine;
mod handlers;
mod hook_type;
mod model;
mod registry;
mod rewrite;
mod signature;

pub use diagnostics::{Category, Rule};
pub use engine::{MacroExpansionResult, expand_module};
pub use model::{AnnotationRole, MOCKABLE, STUBBABLE, STUBBABLE_FUNCTION, STUBBABLE_PROPERTY};
pub use registry::{
    ContainerHandler, ContainerInput, ContainerOutput, MacroRegistry, MemberHandler, MemberInput,
    MemberOutput, MemberRewrite,
};
