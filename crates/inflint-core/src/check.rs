//! Dispatch of `ESH-INF` descriptor files to their validators.
//!
//! Each file goes through the same linear sequence:
//!
//! 1. files without the `.xml` extension are ignored
//! 2. empty files are reported at line 0 and go no further
//! 3. files not directly inside `ESH-INF/<dir>/` are skipped
//! 4. the parent directory selects the thing, binding or config validator;
//!    any other directory (such as `i18n`) is skipped
//!
//! Nothing is carried between calls, so a check can process files in any
//! order and from several threads at once.

use std::fmt;
use std::path::Path;

use tracing::{Span, debug, trace};

use crate::candidate::CandidateFile;
use crate::diagnostics::{ContentError, DiagnosticSink};
use crate::file_types::{
    DirectoryCategory, ESH_INF_DIRECTORY, category_for_directory, has_xml_extension,
};
use crate::rules::DescriptorValidator;
use crate::rules::root_element::RootElementValidator;

/// Outcome of processing a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The file was empty and a diagnostic was reported.
    Empty,
    /// The file is not a descriptor this check looks at.
    Skipped,
    /// The validator for the category ran and accepted the file.
    Dispatched(DirectoryCategory),
}

/// Check routing `ESH-INF` XML descriptors to one of three validators.
///
/// # Example
///
/// ```
/// use inflint_core::{CandidateFile, ContentError, Diagnostic, Dispatch, InfXmlCheck};
///
/// let ok = |_: &CandidateFile| -> Result<(), ContentError> { Ok(()) };
/// let check = InfXmlCheck::new(ok, ok, ok);
///
/// let mut diagnostics: Vec<Diagnostic> = Vec::new();
/// let file = CandidateFile::new("ESH-INF/binding/empty.xml", "");
///
/// assert_eq!(check.process(&file, &mut diagnostics), Ok(Dispatch::Empty));
/// assert!(diagnostics[0].message.contains("empty.xml"));
/// ```
pub struct InfXmlCheck {
    thing: Box<dyn DescriptorValidator>,
    binding: Box<dyn DescriptorValidator>,
    config: Box<dyn DescriptorValidator>,
    span: Span,
}

impl InfXmlCheck {
    pub fn new(
        thing: impl DescriptorValidator,
        binding: impl DescriptorValidator,
        config: impl DescriptorValidator,
    ) -> Self {
        Self {
            thing: Box::new(thing),
            binding: Box::new(binding),
            config: Box::new(config),
            span: tracing::debug_span!("inf_xml_check"),
        }
    }

    /// Check wired to the root element validators of [`crate::rules::root_element`].
    pub fn with_builtin_validators() -> Self {
        Self::new(
            RootElementValidator::thing(),
            RootElementValidator::binding(),
            RootElementValidator::config(),
        )
    }

    /// Replace the span that scopes this check's trace output.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Returns true if the traversal engine should hand `path` to this check.
    pub fn accepts(path: &Path) -> bool {
        has_xml_extension(path)
    }

    /// Validator for `category`, or `None` for [`DirectoryCategory::Unrecognized`].
    pub fn validator_for(&self, category: DirectoryCategory) -> Option<&dyn DescriptorValidator> {
        match category {
            DirectoryCategory::Thing => Some(self.thing.as_ref()),
            DirectoryCategory::Binding => Some(self.binding.as_ref()),
            DirectoryCategory::Configuration => Some(self.config.as_ref()),
            DirectoryCategory::Unrecognized => None,
        }
    }

    /// Called once per run, before the first file.
    pub fn begin_processing(&self, charset: &str) {
        self.span.in_scope(|| {
            debug!(
                charset,
                thing = self.thing.name(),
                binding = self.binding.name(),
                config = self.config.name(),
                "Executing the InfXmlCheck"
            );
        });
    }

    /// Process one candidate file.
    ///
    /// An empty file is reported to `sink` and never reaches a validator.
    /// Errors from the selected validator are returned unchanged.
    pub fn process(
        &self,
        file: &CandidateFile,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Dispatch, ContentError> {
        let _entered = self.span.enter();

        if !Self::accepts(file.path()) {
            trace!(path = %file.path().display(), "not an xml file");
            return Ok(Dispatch::Skipped);
        }

        if file.is_empty() {
            sink.report(
                0,
                format!("The file {} should not be empty.", file.file_name()),
                file.path(),
            );
            return Ok(Dispatch::Empty);
        }

        if file.grandparent_directory_name() != Some(ESH_INF_DIRECTORY) {
            trace!(path = %file.path().display(), "outside {}", ESH_INF_DIRECTORY);
            return Ok(Dispatch::Skipped);
        }

        let category = file
            .parent_directory_name()
            .map_or(DirectoryCategory::Unrecognized, category_for_directory);

        // Sibling directories like i18n are allowed but not checked here
        let Some(validator) = self.validator_for(category) else {
            trace!(path = %file.path().display(), "unrecognized descriptor directory");
            return Ok(Dispatch::Skipped);
        };

        debug!(
            path = %file.path().display(),
            %category,
            validator = validator.name(),
            "dispatching"
        );
        validator.validate(file)?;
        Ok(Dispatch::Dispatched(category))
    }
}

impl fmt::Debug for InfXmlCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfXmlCheck")
            .field("thing", &self.thing.name())
            .field("binding", &self.binding.name())
            .field("config", &self.config.name())
            .finish()
    }
}
