use topo_hash::ObjectId;

use crate::ObjectError;

/// Extract the parent ids declared in a commit's text, first parent first.
///
/// Only the header block is scanned: it ends at the first empty line, after
/// which comes the free-form message. A `parent` line without an id is an
/// error rather than a silently dropped edge.
pub fn parse_parents(text: &str) -> Result<Vec<ObjectId>, ObjectError> {
    let mut parents = Vec::new();
    for line in text.lines() {
        if line.is_empty() {
            break;
        }
        if !line.starts_with("parent ") {
            continue;
        }
        let hex = line
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| ObjectError::MalformedParent {
                line: line.to_string(),
            })?;
        parents.push(ObjectId::from_hex(hex)?);
    }
    Ok(parents)
}
