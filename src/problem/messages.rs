use neoscribe::formatting::{Render, Syntax};
use neoscribe::language::{CHANT_SIGNATURE, TRECENTO_SIGNATURE};
use neoscribe::parsing::ParsingError;

/// Generate problem and detail messages for parsing errors
pub fn generate_error_message(error: &ParsingError, renderer: &dyn Render) -> (String, String) {
    match error {
        ParsingError::UnrecognizedSignature { .. } => (
            "Not a Scribe file".to_string(),
            format!(
                r#"
The first line of a Scribe file identifies which kind of notation it
contains. It must be exactly

    {}

for chant, or

    {}

for trecento polyphony.
                "#,
                renderer.style(Syntax::Signature, CHANT_SIGNATURE),
                renderer.style(Syntax::Signature, TRECENTO_SIGNATURE),
            )
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::MissingMetadata { .. } => (
            "Metadata not present".to_string(),
            format!(
                r#"
Each part in a Scribe file begins with a header line starting with {}
which holds the fixed width fields describing the part. After a blank
line, another part header was expected but something else was found.
                "#,
                renderer.style(Syntax::Header, "'>'"),
            )
            .trim_ascii()
            .to_string(),
        ),
    }
}
