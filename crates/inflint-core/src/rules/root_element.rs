//! Root element validation for descriptor files.
//!
//! The built-in validators only confirm that a descriptor opens with the
//! element its directory calls for. Full schema validation belongs to
//! dedicated validators plugged into [`InfXmlCheck`](crate::InfXmlCheck).

use crate::{candidate::CandidateFile, diagnostics::ContentError, rules::DescriptorValidator};

/// Root element of `ESH-INF/thing/*.xml`.
pub const THING_ROOT_ELEMENT: &str = "thing:thing-descriptions";
/// Root element of `ESH-INF/binding/*.xml`.
pub const BINDING_ROOT_ELEMENT: &str = "binding:binding";
/// Root element of `ESH-INF/config/*.xml`.
pub const CONFIG_ROOT_ELEMENT: &str = "config-description:config-descriptions";

/// Checks the qualified name of the document element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootElementValidator {
    expected: &'static str,
}

impl RootElementValidator {
    pub const fn new(expected: &'static str) -> Self {
        Self { expected }
    }

    pub const fn thing() -> Self {
        Self::new(THING_ROOT_ELEMENT)
    }

    pub const fn binding() -> Self {
        Self::new(BINDING_ROOT_ELEMENT)
    }

    pub const fn config() -> Self {
        Self::new(CONFIG_ROOT_ELEMENT)
    }

    pub fn expected(&self) -> &'static str {
        self.expected
    }
}

impl DescriptorValidator for RootElementValidator {
    fn validate(&self, file: &CandidateFile) -> Result<(), ContentError> {
        let (found, line) = find_root_element(file.text())?;
        if found == self.expected {
            Ok(())
        } else {
            Err(ContentError::UnexpectedRoot {
                expected: self.expected.to_string(),
                found: found.to_string(),
                line,
            })
        }
    }
}

/// Locate the first element of an XML document.
///
/// Skips the XML declaration, processing instructions, comments and the
/// DOCTYPE. Returns the element's qualified name and its 1-based line.
pub fn find_root_element(content: &str) -> Result<(&str, usize), ContentError> {
    let mut rest = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut line = 1usize;

    loop {
        let trimmed = rest.trim_start();
        line += count_newlines(&rest[..rest.len() - trimmed.len()]);
        rest = trimmed;

        if rest.is_empty() {
            return Err(ContentError::Malformed {
                message: "document has no root element".to_string(),
                line: None,
            });
        }

        let terminator = if rest.starts_with("<?") {
            "?>"
        } else if rest.starts_with("<!--") {
            "-->"
        } else if rest.starts_with("<!") {
            ">"
        } else if let Some(tag) = rest.strip_prefix('<') {
            let end = tag
                .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
                .unwrap_or(tag.len());
            let name = &tag[..end];
            if name.is_empty() {
                return Err(malformed("element has no name", line));
            }
            return Ok((name, line));
        } else {
            return Err(malformed("unexpected text before root element", line));
        };

        match rest.find(terminator) {
            Some(idx) => {
                let skipped = &rest[..idx + terminator.len()];
                line += count_newlines(skipped);
                rest = &rest[idx + terminator.len()..];
            }
            None => return Err(malformed("unterminated markup in prolog", line)),
        }
    }
}

fn malformed(message: &str, line: usize) -> ContentError {
    ContentError::Malformed {
        message: message.to_string(),
        line: Some(line),
    }
}

fn count_newlines(s: &str) -> usize {
    s.bytes().filter(|&b| b == b'\n').count()
}
