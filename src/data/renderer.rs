// ============================================================
// Layer 4 — Prompt Template Renderer
// ============================================================
// Substitutes the JSON encodings of a segment run into the
// configured prompt template.
//
// Template syntax:
//   {json_input}   → pretty JSON array of the run's segments
//   {json_output}  → pretty JSON object start_time → title
//   {{ and }}      → literal { and }
//
// Output shapes:
//   full   → Prompt::Full { text: template(input, output) }
//   alpaca → Prompt::InstructionPair {
//                instruction: template(input),
//                input:       "",
//                output:      json_output,
//            }
//
// The template is parsed once when the Renderer is built, so a
// broken template fails the run before any input is read.
//
// Reference: Rust Book §8 (Strings), §13 (Iterators)

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::domain::config::PrepConfig;
use crate::domain::error::{PrepError, PrepResult};
use crate::domain::prompt::{OutputFormat, Prompt};

/// Pieces of a parsed template, in order
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    JsonInput,
    JsonOutput,
}

/// A prompt template parsed into literal text and placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pieces: Vec<Piece>,
}

impl PromptTemplate {
    /// Parse template text. Unknown placeholders and unbalanced
    /// braces are rejected.
    pub fn parse(source: &str) -> PrepResult<Self> {
        let mut pieces  = Vec::new();
        let mut literal = String::new();
        let mut chars   = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut name   = String::new();
                    let mut closed = false;
                    for n in chars.by_ref() {
                        if n == '}' {
                            closed = true;
                            break;
                        }
                        name.push(n);
                    }
                    if !closed {
                        return Err(PrepError::Template(format!(
                            "unclosed '{{' before '{{{name}'"
                        )));
                    }

                    let piece = match name.as_str() {
                        "json_input"  => Piece::JsonInput,
                        "json_output" => Piece::JsonOutput,
                        other => {
                            return Err(PrepError::Template(format!(
                                "unknown placeholder '{{{other}}}' \
                                 (use {{{{ and }}}} for literal braces)"
                            )));
                        }
                    };

                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(piece);
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => {
                    return Err(PrepError::Template(
                        "single '}' encountered (use }} for a literal brace)".to_string(),
                    ));
                }
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Ok(Self { pieces })
    }

    /// Whether the template has a {json_output} slot
    pub fn references_output(&self) -> bool {
        self.pieces.contains(&Piece::JsonOutput)
    }

    /// Whether the template has a {json_input} slot
    pub fn references_input(&self) -> bool {
        self.pieces.contains(&Piece::JsonInput)
    }

    fn fill(&self, json_input: &str, json_output: &str) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::JsonInput     => out.push_str(json_input),
                Piece::JsonOutput    => out.push_str(json_output),
            }
        }
        out
    }
}

/// Turns a run's JSON encodings into a Prompt.
/// Pure: the same inputs always give the same Prompt.
#[derive(Debug, Clone)]
pub struct Renderer {
    template: PromptTemplate,
    format:   OutputFormat,
}

impl Renderer {
    pub fn new(template: PromptTemplate, format: OutputFormat) -> PrepResult<Self> {
        // The instruction half of a pair only ever sees the input
        if format == OutputFormat::Alpaca && template.references_output() {
            return Err(PrepError::Template(
                "{json_output} cannot appear in an alpaca instruction template; \
                 the answer goes into the separate \"output\" field"
                    .to_string(),
            ));
        }

        if !template.references_input() {
            tracing::warn!("Prompt template has no {{json_input}} placeholder");
        }

        Ok(Self { template, format })
    }

    /// Parse the configured template and pair it with the configured format
    pub fn from_config(config: &PrepConfig) -> PrepResult<Self> {
        Self::new(PromptTemplate::parse(&config.prompt)?, config.format)
    }

    pub fn render(&self, json_input: &str, json_output: &str) -> Prompt {
        match self.format {
            OutputFormat::Full => Prompt::Full {
                text: self.template.fill(json_input, json_output),
            },
            OutputFormat::Alpaca => Prompt::InstructionPair {
                instruction: self.template.fill(json_input, ""),
                input:       String::new(),
                output:      json_output.to_string(),
            },
        }
    }

    /// The single definition of prompt size used by the packer
    pub fn length(&self, prompt: &Prompt) -> usize {
        prompt.char_len()
    }
}

/// Serialise with a 4-space indent and literal non-ASCII.
///
/// Used for both the embedded prompt JSON and the output files so
/// that every JSON text this tool produces has the same layout.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;

    // serde_json only ever writes valid UTF-8
    String::from_utf8(buf).map_err(|e| <serde_json::Error as serde::ser::Error>::custom(e))
}
