//! Provenance marks: human-readable traceability strings attached to records
//! at creation. A mark is a plain concatenation, not a digest, and two
//! records created from identical inputs get identical marks.

/// Joins the mark's components.
pub const SEPARATOR: char = '_';

/// Builds the mark `{id}_{farmer_id}_{timestamp}`.
pub fn generate(id: &str, farmer_id: &str, timestamp: &str) -> String {
    let mut mark = String::with_capacity(id.len() + farmer_id.len() + timestamp.len() + 2);
    mark.push_str(id);
    mark.push(SEPARATOR);
    mark.push_str(farmer_id);
    mark.push(SEPARATOR);
    mark.push_str(timestamp);
    mark
}
