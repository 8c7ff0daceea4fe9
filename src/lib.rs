pub mod api;
pub mod ast;
pub mod builder;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
mod serialization;
pub mod utils;
pub mod validator;

pub use api::{analyze, analyze_file, analyze_with, AnalysisResult, AnalyzeOptions};
pub use ast::{
    ClassKind, ClassNode, CommentNode, CommentStyle, FieldNode, ImportNode, JavadocNode, Member,
    MethodNode, Modifier, Modifiers, NodeKind, PackageNode, Parameter, StaticBlockNode,
    SyntaxNode, AnnotationNode, AnnotationParam,
};
pub use codegen::BuilderCode;
pub use error::{BuildError, Construct, JError, ParseError};
pub use parser::{parse, parse_member, parse_str, Parse};
pub use validator::{validate_class, CanonicalNameValidator, ValidationReport};
