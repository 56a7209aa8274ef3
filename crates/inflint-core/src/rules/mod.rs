//! Descriptor validators

pub mod root_element;

use crate::{candidate::CandidateFile, diagnostics::ContentError};

/// Extract the short (unqualified) type name from `std::any::type_name`.
///
/// Given `"inflint_core::rules::root_element::RootElementValidator"`, returns
/// `"RootElementValidator"`. Generic suffixes are stripped first.
fn short_type_name<T: ?Sized + 'static>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Content validator for one descriptor category.
///
/// [`InfXmlCheck`](crate::InfXmlCheck) holds one implementor per category
/// and calls it for every non-empty, in-scope file of that category. A
/// returned [`ContentError`] is passed through to the caller of
/// [`InfXmlCheck::process`](crate::InfXmlCheck::process) untouched.
///
/// Any `Fn(&CandidateFile) -> Result<(), ContentError>` closure that is
/// `Send + Sync` is a validator, so checks can be assembled without
/// declaring new types:
///
/// ```
/// use inflint_core::{CandidateFile, ContentError, DescriptorValidator};
///
/// let no_doctype = |file: &CandidateFile| {
///     if file.text().contains("<!DOCTYPE") {
///         Err(ContentError::Other("DOCTYPE is not allowed".into()))
///     } else {
///         Ok(())
///     }
/// };
///
/// assert!(no_doctype.validate(&CandidateFile::new("a.xml", "<a/>")).is_ok());
/// ```
pub trait DescriptorValidator: Send + Sync + 'static {
    /// Check the content of `file`.
    fn validate(&self, file: &CandidateFile) -> Result<(), ContentError>;

    /// Short, human-readable name used in trace output.
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

impl<F> DescriptorValidator for F
where
    F: Fn(&CandidateFile) -> Result<(), ContentError> + Send + Sync + 'static,
{
    fn validate(&self, file: &CandidateFile) -> Result<(), ContentError> {
        self(file)
    }

    fn name(&self) -> &'static str {
        "closure"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysOk;

    impl DescriptorValidator for AlwaysOk {
        fn validate(&self, _file: &CandidateFile) -> Result<(), ContentError> {
            Ok(())
        }
    }

    #[test]
    fn test_default_name_is_short_type_name() {
        assert_eq!(AlwaysOk.name(), "AlwaysOk");
    }

    #[test]
    fn test_short_type_name_strips_generics() {
        #[allow(dead_code)]
        struct Wrapper<T>(T);
        assert_eq!(short_type_name::<Wrapper<String>>(), "Wrapper");
    }

    #[test]
    fn test_closure_is_validator() {
        let reject = |_: &CandidateFile| -> Result<(), ContentError> {
            Err(ContentError::Other("nope".into()))
        };
        let file = CandidateFile::new("ESH-INF/thing/a.xml", "<a/>");

        assert_eq!(
            reject.validate(&file),
            Err(ContentError::Other("nope".into()))
        );
        assert_eq!(reject.name(), "closure");
    }

    #[test]
    fn test_boxed_validators_are_object_safe() {
        let validators: Vec<Box<dyn DescriptorValidator>> = vec![
            Box::new(AlwaysOk),
            Box::new(|_: &CandidateFile| -> Result<(), ContentError> { Ok(()) }),
        ];
        let file = CandidateFile::new("a.xml", "<a/>");
        assert!(validators.iter().all(|v| v.validate(&file).is_ok()));
    }
}
