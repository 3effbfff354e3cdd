use serde::{Deserialize, Serialize};

/// Category of a recoverable problem met during catalog load or annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A pattern could not be translated; the definition is skipped when scanning
    PatternCompile,
    /// No documentation record resolved for a hit's pattern
    DocumentationNotFound,
    /// A sequence had no residues
    EmptySequence,
    /// A sequence contained characters that are not residue codes
    UnreadableSequence,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PatternCompile => write!(f, "pattern compile"),
            Self::DocumentationNotFound => write!(f, "documentation not found"),
            Self::EmptySequence => write!(f, "empty sequence"),
            Self::UnreadableSequence => write!(f, "unreadable sequence"),
        }
    }
}

/// A recoverable problem, recorded for the caller instead of aborting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationIssue {
    /// Pattern accession or sequence id the issue concerns
    pub subject: String,
    pub kind: IssueKind,
    pub message: String,
}

impl AnnotationIssue {
    pub fn new(subject: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AnnotationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.subject, self.kind, self.message)
    }
}
