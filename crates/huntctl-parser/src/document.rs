//! Hunt document model and the frontmatter/section parsers.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use huntctl_core::HuntctlError;

/// The four LOCK lifecycle phases a hunt document narrates.
///
/// Headings are matched case-sensitively on these markers; map keys and
/// display output use the lowercase form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockPhase {
    /// LEARN — hypothesis and preparation.
    Learn,
    /// OBSERVE — expected behaviors and data sources.
    Observe,
    /// CHECK — query execution and analysis.
    Check,
    /// KEEP — findings, response, and lessons learned.
    Keep,
}

impl LockPhase {
    /// All phases, in lifecycle order.
    pub const ALL: [LockPhase; 4] = [
        LockPhase::Learn,
        LockPhase::Observe,
        LockPhase::Check,
        LockPhase::Keep,
    ];

    /// The uppercase heading marker this phase is matched on.
    pub fn marker(self) -> &'static str {
        match self {
            LockPhase::Learn => "LEARN",
            LockPhase::Observe => "OBSERVE",
            LockPhase::Check => "CHECK",
            LockPhase::Keep => "KEEP",
        }
    }

    /// Lowercase phase name used in map keys and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            LockPhase::Learn => "learn",
            LockPhase::Observe => "observe",
            LockPhase::Check => "check",
            LockPhase::Keep => "keep",
        }
    }
}

impl std::fmt::Display for LockPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heading level at which LOCK markers are recognized.
const LOCK_HEADING_LEVEL: usize = 2;

/// A parsed hunt document.
///
/// Constructed fresh on every parse; there is no registry or cache.
/// `hunt_id` is strictly derived from the frontmatter `hunt_id` key, so
/// the two can never diverge.
#[derive(Debug, Clone, Serialize)]
pub struct HuntDocument {
    /// The frontmatter `hunt_id` value, if present and a string.
    pub hunt_id: Option<String>,
    /// Frontmatter metadata. Empty when the document has no (or a
    /// malformed) frontmatter block.
    pub frontmatter: Map<String, Value>,
    /// LOCK sections found in the body. A phase is present iff its
    /// heading was found; absence is a legitimate state.
    pub lock_sections: BTreeMap<LockPhase, String>,
    /// The raw body text remaining after the frontmatter block.
    pub body: String,
}

impl HuntDocument {
    /// Read and parse a hunt file.
    ///
    /// # Errors
    ///
    /// Fails only when the file cannot be read — a nonexistent path is
    /// never silently turned into an empty document. Malformed content
    /// degrades gracefully instead of failing.
    pub fn parse_file(path: &Path) -> Result<Self, HuntctlError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse_str(&content))
    }

    /// Parse hunt document text. Infallible: malformed frontmatter or
    /// missing sections produce empty/partial structures.
    pub fn parse_str(content: &str) -> Self {
        let (frontmatter, body) = split_frontmatter(content);
        let lock_sections = extract_lock_sections(&body);
        let hunt_id = frontmatter
            .get("hunt_id")
            .and_then(Value::as_str)
            .map(str::to_owned);

        if frontmatter.is_empty() {
            tracing::debug!("document has no frontmatter block");
        }

        Self {
            hunt_id,
            frontmatter,
            lock_sections,
            body,
        }
    }

    /// Fetch a frontmatter value as a string, if the key holds a scalar.
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.frontmatter.get(key).and_then(Value::as_str)
    }

    /// Fetch a frontmatter value as a list of strings.
    ///
    /// A YAML sequence yields its string elements; a bare scalar yields a
    /// one-element list; anything else yields an empty list.
    pub fn field_list(&self, key: &str) -> Vec<String> {
        match self.frontmatter.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            Some(Value::String(s)) => vec![s.clone()],
            _ => Vec::new(),
        }
    }
}

/// Split a document into its frontmatter mapping and body text.
///
/// The block is delimited by lines consisting solely of `---`. A missing
/// opening fence, a never-closed fence, or YAML that does not decode to a
/// mapping all degrade to an empty mapping with the whole input as body.
fn split_frontmatter(content: &str) -> (Map<String, Value>, String) {
    let mut lines = content.lines();

    match lines.next() {
        Some(first) if first.trim_end() == "---" => {}
        _ => return (Map::new(), content.to_string()),
    }

    let mut yaml_lines: Vec<&str> = Vec::new();
    let mut closed = false;
    let mut body_lines: Vec<&str> = Vec::new();

    for line in lines {
        if !closed {
            if line.trim_end() == "---" {
                closed = true;
            } else {
                yaml_lines.push(line);
            }
        } else {
            body_lines.push(line);
        }
    }

    if !closed {
        return (Map::new(), content.to_string());
    }

    let yaml_text = yaml_lines.join("\n");
    let body = body_lines.join("\n");

    match serde_yaml::from_str::<Value>(&yaml_text) {
        Ok(Value::Object(map)) => (map, body),
        // A fenced-off empty block is well-formed, just empty.
        Ok(Value::Null) => (Map::new(), body),
        Ok(_) | Err(_) => {
            tracing::debug!("frontmatter block did not decode to a mapping; treating as body");
            (Map::new(), content.to_string())
        }
    }
}

/// Parse a Markdown ATX heading line into (level, text).
fn heading_of(line: &str) -> Option<(usize, &str)> {
    let hashes = line.len() - line.trim_start_matches('#').len();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if rest.is_empty() {
        return Some((hashes, ""));
    }
    // ATX headings require whitespace between the hashes and the text.
    if !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    Some((hashes, rest.trim()))
}

/// Scan the body for LOCK sections.
///
/// A level-2 heading whose text starts with one of the phase markers
/// opens a section; capture runs up to (exclusive) the next heading at
/// level 2 or shallower. Deeper headings inside a section are kept as
/// content rather than terminating capture.
fn extract_lock_sections(body: &str) -> BTreeMap<LockPhase, String> {
    let mut sections = BTreeMap::new();
    let mut current: Option<(LockPhase, Vec<&str>)> = None;

    for line in body.lines() {
        if let Some((level, text)) = heading_of(line) {
            if level <= LOCK_HEADING_LEVEL {
                // Boundary: close whatever section is open.
                if let Some((phase, lines)) = current.take() {
                    sections.insert(phase, lines.join("\n"));
                }
                if level == LOCK_HEADING_LEVEL {
                    if let Some(phase) = LockPhase::ALL
                        .into_iter()
                        .find(|p| text.starts_with(p.marker()))
                    {
                        current = Some((phase, Vec::new()));
                    }
                }
                continue;
            }
        }
        if let Some((_, ref mut lines)) = current {
            lines.push(line);
        }
    }

    if let Some((phase, lines)) = current {
        sections.insert(phase, lines.join("\n"));
    }

    sections
}
