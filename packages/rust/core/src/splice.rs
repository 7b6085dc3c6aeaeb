//! Header-preserving splice of generated content into `SKILL.md`.

/// Result of [`splice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
    /// Preserved header, a blank line, then the new content.
    pub text: String,
    /// Whether the marker was present in the destination.
    pub marker_found: bool,
}

/// Keep `destination` up to and including `marker`, drop the rest, append `new_content`.
///
/// Without a marker the whole destination becomes the header, closed with a
/// `---` rule unless its trimmed text already ends with one.
pub fn splice(destination: &str, new_content: &str, marker: &str) -> Spliced {
    let (header, marker_found) = match destination.find(marker) {
        Some(idx) => (destination[..idx + marker.len()].to_string(), true),
        None => {
            let mut header = destination.to_string();
            if !header.trim().ends_with("---") {
                header.push_str("\n\n---");
            }
            (header, false)
        }
    };

    Spliced {
        text: format!("{header}\n\n{new_content}"),
        marker_found,
    }
}
