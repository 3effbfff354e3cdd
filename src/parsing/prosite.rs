//! Parser for the PROSITE pattern store (`prosite.dat`).
//!
//! Each entry is a block of two-letter line codes terminated by `//`:
//!
//! ```text
//! ID   ASN_GLYCOSYLATION; PATTERN.
//! AC   PS00001;
//! DE   N-glycosylation site.
//! PA   N-{P}-[ST]-{P}.
//! DO   PDOC00001;
//! //
//! ```
//!
//! Blocks without an `ID` line (the release header) are skipped. Entries with
//! no `PA` line, such as profiles, are kept with an empty pattern.

use std::path::Path;

use tracing::debug;

use crate::core::definition::PatternDefinition;
use crate::parsing::{read_text, ParseError};
use crate::utils::validation::check_record_limit;

/// Parse a pattern store file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_pattern_file(path: &Path) -> Result<Vec<PatternDefinition>, ParseError> {
    let content = read_text(path)?;
    parse_pattern_text(&content)
}

#[derive(Default)]
struct EntryBuilder {
    start_line: usize,
    name: Option<String>,
    accession: Option<String>,
    description: Vec<String>,
    pattern: String,
    doc_reference: Option<String>,
}

impl EntryBuilder {
    fn is_blank(&self) -> bool {
        self.name.is_none() && self.accession.is_none() && self.pattern.is_empty()
    }

    fn finish(self) -> Result<Option<PatternDefinition>, ParseError> {
        let Some(name) = self.name else {
            // Release header and other comment-only blocks
            return Ok(None);
        };
        let accession = self.accession.ok_or_else(|| {
            ParseError::InvalidFormat(format!(
                "Entry '{name}' starting on line {} has no AC line",
                self.start_line
            ))
        })?;

        let mut definition =
            PatternDefinition::new(name, accession, self.description.join(" "), self.pattern);
        definition.doc_reference = self.doc_reference;
        Ok(Some(definition))
    }
}

/// Strip the trailing `;` from an accession field
fn accession_value(value: &str) -> String {
    value.split(';').next().unwrap_or_default().trim().to_string()
}

/// Parse pattern store text, preserving entry order
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if an entry lacks an accession or no
/// entries are found, or `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_pattern_text(text: &str) -> Result<Vec<PatternDefinition>, ParseError> {
    let mut definitions = Vec::new();
    let mut entry = EntryBuilder::default();

    for (i, line) in text.lines().enumerate() {
        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;
        let line = line.trim_end();

        if line.starts_with("//") {
            let finished = std::mem::take(&mut entry);
            if let Some(definition) = finished.finish()? {
                if check_record_limit(definitions.len()).is_some() {
                    return Err(ParseError::TooManyRecords(definitions.len()));
                }
                definitions.push(definition);
            }
            continue;
        }

        let (Some(code), Some(rest)) = (line.get(..2), line.get(2..)) else {
            continue;
        };
        let value = rest.trim();

        if entry.is_blank() {
            entry.start_line = line_num;
        }

        match code {
            "ID" => {
                let name = value.split(';').next().unwrap_or_default().trim();
                if name.is_empty() {
                    return Err(ParseError::InvalidFormat(format!(
                        "Empty ID on line {line_num}"
                    )));
                }
                entry.name = Some(name.to_string());
            }
            "AC" => entry.accession = Some(accession_value(value)),
            "DE" => entry.description.push(value.to_string()),
            "PA" => entry.pattern.push_str(value),
            "DO" => entry.doc_reference = Some(accession_value(value)),
            _ => {}
        }
    }

    // Tolerate a final entry without its terminator
    if let Some(definition) = entry.finish()? {
        definitions.push(definition);
    }

    if definitions.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No pattern entries found".to_string(),
        ));
    }

    debug!(entries = definitions.len(), "Parsed pattern store");
    Ok(definitions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORE: &str = "\
CC   PROSITE pattern data file header
CC   -------------------------------------
//
ID   ASN_GLYCOSYLATION; PATTERN.
AC   PS00001;
DT   01-APR-1990 CREATED; 01-APR-1990 DATA UPDATE; 01-APR-1990 INFO UPDATE.
DE   N-glycosylation site.
PA   N-{P}-[ST]-{P}.
CC   /TAXO-RANGE=??E?V;
DO   PDOC00001;
//
ID   ZINC_FINGER_LONG; PATTERN.
AC   PS00028;
DE   Zinc finger C2H2 type domain
DE   signature.
PA   C-x(2,4)-C-x(3)-[LIVMFYWC]-x(8)-
PA   H-x(3,5)-H.
DO   PDOC00028;
//
ID   SOME_PROFILE; MATRIX.
AC   PS50001;
DE   Some profile.
MA   /GENERAL_SPEC: ALPHABET='ABCDEFGHIKLMNPQRSTVWYZ';
DO   PDOC50001;
//
";

    #[test]
    fn test_parse_pattern_text() {
        let defs = parse_pattern_text(STORE).unwrap();
        assert_eq!(defs.len(), 3);

        assert_eq!(defs[0].name, "ASN_GLYCOSYLATION");
        assert_eq!(defs[0].accession, "PS00001");
        assert_eq!(defs[0].description, "N-glycosylation site.");
        assert_eq!(defs[0].raw_pattern, "N-{P}-[ST]-{P}.");
        assert_eq!(defs[0].doc_reference.as_deref(), Some("PDOC00001"));
    }

    #[test]
    fn test_multiline_fields_joined() {
        let defs = parse_pattern_text(STORE).unwrap();
        assert_eq!(
            defs[1].description,
            "Zinc finger C2H2 type domain signature."
        );
        assert_eq!(defs[1].raw_pattern, "C-x(2,4)-C-x(3)-[LIVMFYWC]-x(8)-H-x(3,5)-H.");
    }

    #[test]
    fn test_entry_without_pattern_kept() {
        let defs = parse_pattern_text(STORE).unwrap();
        assert_eq!(defs[2].name, "SOME_PROFILE");
        assert!(defs[2].raw_pattern.is_empty());
    }

    #[test]
    fn test_missing_terminator_on_last_entry() {
        let text = "ID   RGD; PATTERN.\nAC   PS00016;\nPA   R-G-D.\n";
        let defs = parse_pattern_text(text).unwrap();
        assert_eq!(defs.len(), 1);
        assert!(defs[0].doc_reference.is_none());
    }

    #[test]
    fn test_missing_accession_is_error() {
        let text = "ID   RGD; PATTERN.\nPA   R-G-D.\n//\n";
        let result = parse_pattern_text(text);
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_empty_store_is_error() {
        assert!(parse_pattern_text("CC   header only\n//\n").is_err());
        assert!(parse_pattern_text("").is_err());
    }
}
