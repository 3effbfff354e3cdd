//! Translation of catalog pattern strings into executable matchers.
//!
//! A pattern such as `[AC]-x-V-x(2)-{ED}.` is rewritten by the ordered rules in
//! [`TRANSLATION_RULES`] into the expression `[AC].V.{2}[^ED]`, which is then
//! compiled into a [`CompiledMatcher`].
//!
//! The first two rules act on the whole pattern (terminator, separators). The
//! remaining rules are tried at each position, in table order, and the first
//! rule that recognizes the token there consumes it. `X` is therefore always a
//! wildcard even though it is also an uppercase letter.

use regex::Regex;
use thiserror::Error;

/// Largest repeat bound accepted in `(m)` / `(m,n)`
pub const MAX_REPEAT: u32 = 1000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("pattern is empty after translation")]
    Empty,

    #[error("unrecognized token '{token}' at position {position}")]
    UnrecognizedToken { token: char, position: usize },

    #[error("unterminated '{open}' opened at position {position}")]
    Unterminated { open: char, position: usize },

    #[error("empty residue group at position {position}")]
    EmptyGroup { position: usize },

    #[error("invalid repeat count '({text})' at position {position}")]
    InvalidRepeat { text: String, position: usize },

    #[error("repeat count at position {position} has no preceding residue element")]
    DanglingRepeat { position: usize },

    #[error("translated expression '{expression}' was rejected: {reason}")]
    Rejected { expression: String, reason: String },
}

/// One step of the grammar translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationRule {
    /// Drop one trailing `.`
    StripTerminator,
    /// Drop every `-`
    RemoveSeparators,
    /// `{ED}` becomes `[^ED]`
    ExclusionGroup,
    /// `(2)` becomes `{2}`, `(2,4)` becomes `{2,4}`
    RepeatCount,
    /// `x` or `X` becomes `.`
    Wildcard,
    /// `<` becomes `^`, `>` becomes `$`
    Anchor,
    /// Residue letters and `[ABC]` classes are kept
    Residue,
}

/// Translation rules in the order they are applied
pub const TRANSLATION_RULES: [TranslationRule; 7] = [
    TranslationRule::StripTerminator,
    TranslationRule::RemoveSeparators,
    TranslationRule::ExclusionGroup,
    TranslationRule::RepeatCount,
    TranslationRule::Wildcard,
    TranslationRule::Anchor,
    TranslationRule::Residue,
];

impl TranslationRule {
    /// Rules that rewrite the whole pattern before tokenization
    fn is_whole_pattern(self) -> bool {
        matches!(self, Self::StripTerminator | Self::RemoveSeparators)
    }

    fn apply_whole(self, chars: &mut Vec<(usize, char)>) {
        match self {
            Self::StripTerminator => {
                if chars.last().is_some_and(|&(_, c)| c == '.') {
                    chars.pop();
                }
            }
            Self::RemoveSeparators => chars.retain(|&(_, c)| c != '-'),
            _ => {}
        }
    }

    /// Try to translate the token starting at `pos`.
    ///
    /// Returns `None` when this rule does not recognize the token, otherwise the
    /// translated token or an error.
    fn apply_token(
        self,
        chars: &[(usize, char)],
        pos: usize,
    ) -> Option<Result<Token, CompileError>> {
        let (position, c) = chars[pos];
        match self {
            Self::ExclusionGroup if c == '{' => Some(
                read_group(chars, pos, '}').and_then(|(members, next)| {
                    let letters = residue_letters(&members)?;
                    Ok(Token::atom(format!("[^{letters}]"), next))
                }),
            ),
            Self::RepeatCount if c == '(' => Some(read_repeat(chars, pos)),
            Self::Wildcard if c == 'x' || c == 'X' => Some(Ok(Token::atom(".".into(), pos + 1))),
            Self::Anchor if c == '<' || c == '>' => Some(Ok(Token::Anchor {
                text: anchor(c).to_string(),
                next: pos + 1,
            })),
            Self::Residue if c.is_ascii_uppercase() => Some(Ok(Token::atom(c.to_string(), pos + 1))),
            Self::Residue if c == '[' => Some(read_group(chars, pos, ']').and_then(
                |(members, next)| residue_class(&members, position).map(|t| Token::atom(t, next)),
            )),
            _ => None,
        }
    }
}

#[derive(Debug)]
enum Token {
    /// A single-residue element that may carry a repeat count
    Atom { text: String, next: usize },
    /// `{m}` or `{m,n}` applying to the previous atom
    Repeat { text: String, position: usize, next: usize },
    /// A sequence boundary; cannot be repeated
    Anchor { text: String, next: usize },
}

impl Token {
    fn atom(text: String, next: usize) -> Self {
        Self::Atom { text, next }
    }
}

fn anchor(c: char) -> char {
    if c == '<' {
        '^'
    } else {
        '$'
    }
}

/// Collect the characters between `chars[pos]` and the matching `close`
fn read_group(
    chars: &[(usize, char)],
    pos: usize,
    close: char,
) -> Result<(Vec<(usize, char)>, usize), CompileError> {
    let (position, open) = chars[pos];
    let Some(offset) = chars[pos + 1..].iter().position(|&(_, c)| c == close) else {
        return Err(CompileError::Unterminated { open, position });
    };
    let members = chars[pos + 1..pos + 1 + offset].to_vec();
    if members.is_empty() {
        return Err(CompileError::EmptyGroup { position });
    }
    Ok((members, pos + offset + 2))
}

fn residue_letters(members: &[(usize, char)]) -> Result<String, CompileError> {
    members
        .iter()
        .map(|&(position, c)| {
            if c.is_ascii_uppercase() {
                Ok(c)
            } else {
                Err(CompileError::UnrecognizedToken { token: c, position })
            }
        })
        .collect()
}

/// Translate the body of a `[...]` class, which may list terminal anchors
fn residue_class(members: &[(usize, char)], position: usize) -> Result<String, CompileError> {
    let (anchors, residues): (Vec<(usize, char)>, Vec<(usize, char)>) = members
        .iter()
        .copied()
        .partition(|&(_, c)| c == '<' || c == '>');
    let letters = residue_letters(&residues)?;

    let mut alternatives: Vec<String> = Vec::new();
    if anchors.iter().any(|&(_, c)| c == '<') {
        alternatives.push("^".to_string());
    }
    if !letters.is_empty() {
        alternatives.push(format!("[{letters}]"));
    }
    if anchors.iter().any(|&(_, c)| c == '>') {
        alternatives.push("$".to_string());
    }

    match alternatives.len() {
        0 => Err(CompileError::EmptyGroup { position }),
        1 if anchors.is_empty() => Ok(alternatives.remove(0)),
        _ => Ok(format!("(?:{})", alternatives.join("|"))),
    }
}

fn read_repeat(chars: &[(usize, char)], pos: usize) -> Result<Token, CompileError> {
    let (position, _) = chars[pos];
    let (members, next) = read_group(chars, pos, ')')?;
    let text: String = members.iter().map(|&(_, c)| c).collect();
    let invalid = || CompileError::InvalidRepeat {
        text: text.clone(),
        position,
    };

    let parse = |s: &str| -> Result<u32, CompileError> {
        let n: u32 = s.trim().parse().map_err(|_| invalid())?;
        if n > MAX_REPEAT {
            return Err(invalid());
        }
        Ok(n)
    };

    let quantifier = match text.split_once(',') {
        None => format!("{{{}}}", parse(&text)?),
        Some((low, high)) => {
            let (low, high) = (parse(low)?, parse(high)?);
            if low > high {
                return Err(invalid());
            }
            format!("{{{low},{high}}}")
        }
    };

    Ok(Token::Repeat {
        text: quantifier,
        position,
        next,
    })
}

/// Translate a catalog pattern into expression text.
///
/// # Errors
///
/// Returns a [`CompileError`] if the pattern contains a token outside the
/// grammar, a malformed group or repeat count, or nothing to match.
///
/// # Examples
///
/// ```
/// use motif_scan::matching::compiler::translate;
///
/// assert_eq!(translate("[AC]-x-V-x(2)-{ED}.").unwrap(), "[AC].V.{2}[^ED]");
/// assert_eq!(translate("<M-x(0,1)-C>.").unwrap(), "^M.{0,1}C$");
/// ```
pub fn translate(raw_pattern: &str) -> Result<String, CompileError> {
    let mut chars: Vec<(usize, char)> = raw_pattern.trim().char_indices().collect();

    for rule in TRANSLATION_RULES.iter().filter(|r| r.is_whole_pattern()) {
        rule.apply_whole(&mut chars);
    }

    let token_rules: Vec<TranslationRule> = TRANSLATION_RULES
        .iter()
        .copied()
        .filter(|r| !r.is_whole_pattern())
        .collect();

    let mut expression = String::new();
    let mut repeatable = false;
    let mut pos = 0;

    while pos < chars.len() {
        let token = token_rules
            .iter()
            .find_map(|rule| rule.apply_token(&chars, pos))
            .unwrap_or_else(|| {
                let (position, token) = chars[pos];
                Err(CompileError::UnrecognizedToken { token, position })
            })?;

        pos = match token {
            Token::Atom { text, next } => {
                expression.push_str(&text);
                repeatable = true;
                next
            }
            Token::Repeat {
                text,
                position,
                next,
            } => {
                if !repeatable {
                    return Err(CompileError::DanglingRepeat { position });
                }
                expression.push_str(&text);
                repeatable = false;
                next
            }
            Token::Anchor { text, next } => {
                expression.push_str(&text);
                repeatable = false;
                next
            }
        };
    }

    if expression.is_empty() {
        return Err(CompileError::Empty);
    }
    Ok(expression)
}

/// Translate and compile a catalog pattern.
///
/// # Errors
///
/// Returns a [`CompileError`] if translation fails or the expression cannot be built.
pub fn compile(raw_pattern: &str) -> Result<CompiledMatcher, CompileError> {
    let expression = translate(raw_pattern)?;
    let regex = Regex::new(&expression).map_err(|e| CompileError::Rejected {
        expression: expression.clone(),
        reason: e.to_string(),
    })?;
    Ok(CompiledMatcher { expression, regex })
}

/// Executable form of a translated pattern
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    expression: String,
    regex: Regex,
}

impl CompiledMatcher {
    /// The translated expression text
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Non-overlapping, leftmost-first match spans as `(start, end)`.
    ///
    /// The search resumes at the end of each match. Zero-width matches are
    /// skipped, so every span has `start < end`.
    pub fn find_spans<'h>(&'h self, residues: &'h str) -> impl Iterator<Item = (usize, usize)> + 'h {
        self.regex
            .find_iter(residues)
            .map(|m| (m.start(), m.end()))
            .filter(|(start, end)| start < end)
    }

    /// Check whether the pattern occurs anywhere in the residues
    pub fn is_match(&self, residues: &str) -> bool {
        self.find_spans(residues).next().is_some()
    }
}

impl PartialEq for CompiledMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.expression == other.expression
    }
}
