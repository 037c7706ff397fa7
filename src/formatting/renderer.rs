//! Renderers for colourizing Scribe documents

use owo_colors::OwoColorize;

use crate::formatting::*;
use crate::language::Document;

/// Embellish fragments with ANSI escapes to create syntax highlighting in
/// terminal output.
pub struct Terminal;

impl Render for Terminal {
    fn style(&self, syntax: Syntax, content: &str) -> String {
        match syntax {
            Syntax::Neutral => content.to_string(),
            Syntax::Newline => "\n".to_string(),
            Syntax::Signature => content
                .color(owo_colors::Rgb(0x75, 0x50, 0x7b))
                .bold()
                .to_string(),
            Syntax::Header => content // #3465a4 (blue) bold
                .color(owo_colors::Rgb(0x34, 0x65, 0xa4))
                .bold()
                .to_string(),
            Syntax::Label => content // #999999 (grey)
                .color(owo_colors::Rgb(153, 153, 153))
                .to_string(),
            Syntax::Comment => content
                .color(owo_colors::Rgb(153, 153, 153))
                .italic()
                .to_string(),
            Syntax::Staff => content // #8f5902 (brown)
                .color(owo_colors::Rgb(0x8f, 0x59, 0x02))
                .to_string(),
            Syntax::Sigil => content // #cc0000 (red) bold
                .color(owo_colors::Rgb(204, 0, 0))
                .bold()
                .to_string(),
            Syntax::Code => content
                .bright_white()
                .bold()
                .to_string(),
            Syntax::Numeric => content // #ad7fa8 (purple)
                .color(owo_colors::Rgb(0xad, 0x7f, 0xa8))
                .to_string(),
            Syntax::Syllable => content // #4e9a06 (green) bold
                .color(owo_colors::Rgb(0x4e, 0x9a, 0x06))
                .bold()
                .to_string(),
        }
    }
}

/// We do the formatting in two passes. First we convert from the parsed
/// Document into a Vec of "fragments" (Syntax tag, String pairs). Then
/// second we apply the specified renderer to each pair to result in an
/// embellished or plain String.
pub fn render(renderer: &impl Render, document: &Document) -> String {
    let fragments = crate::formatting::formatter::format_with_renderer(document);

    let mut output = String::new();
    for (syntax, content) in fragments {
        let rendered = renderer.style(syntax, &content);
        output.push_str(&rendered);
    }

    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }

    output
}
