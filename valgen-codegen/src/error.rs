use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use valgen_source::{Span, SourceContext};

/// Result type for declaration analysis (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// A field directive could not be turned into a rule. Aborts the file.
    #[error("invalid directive on {declaration}.{field}: {source}")]
    #[diagnostic(code(valgen::directive))]
    Directive {
        #[source_code]
        src: NamedSource<String>,
        #[label("{directive}")]
        span: SourceSpan,
        declaration: String,
        field: String,
        directive: String,
        #[help]
        help: String,
        #[source]
        source: valgen_rules::Error,
    },
}

impl Error {
    pub(crate) fn directive(
        ctx: &SourceContext,
        span: Span,
        declaration: &str,
        field: &str,
        directive: &str,
        source: valgen_rules::Error,
    ) -> Box<Self> {
        Box::new(Error::Directive {
            src: ctx.named_source(),
            span: span.into(),
            declaration: declaration.to_string(),
            field: field.to_string(),
            directive: directive.to_string(),
            help: source.help(),
            source,
        })
    }
}
