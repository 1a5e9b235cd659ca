//! Path to queue bindings

use serde::Deserialize;
use std::collections::HashSet;

use crate::error::BindingError;

/// One configured queue: the URL path it is served on and its capacity
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueueBinding {
    pub path: String,

    /// Maximum number of held entries, `0` for unbounded
    #[serde(default)]
    pub capacity: usize,
}

impl QueueBinding {
    pub fn new(path: impl Into<String>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
        }
    }

    /// Check that the path can be registered as a literal route
    pub fn validate(&self) -> Result<(), BindingError> {
        if !self.path.starts_with('/') {
            return Err(BindingError::MissingLeadingSlash(self.path.clone()));
        }

        // The router reads these anywhere in a path as parameter syntax
        if self.path.contains([':', '*', '{', '}']) {
            return Err(BindingError::PatternInPath(self.path.clone()));
        }

        Ok(())
    }
}

/// Validate every binding and reject paths bound more than once
pub fn validate_bindings(bindings: &[QueueBinding]) -> Result<(), BindingError> {
    let mut seen = HashSet::with_capacity(bindings.len());
    for binding in bindings {
        binding.validate()?;
        if !seen.insert(binding.path.as_str()) {
            return Err(BindingError::DuplicatePath(binding.path.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_paths_are_valid() {
        for path in ["/", "/jobs", "/jobs/high-priority", "/v1/mail.out"] {
            assert_eq!(QueueBinding::new(path, 0).validate(), Ok(()), "{path}");
        }
    }

    #[test]
    fn test_path_without_slash() {
        assert_eq!(
            QueueBinding::new("jobs", 1).validate(),
            Err(BindingError::MissingLeadingSlash("jobs".to_string()))
        );
        assert!(QueueBinding::new("", 1).validate().is_err());
    }

    #[test]
    fn test_route_patterns_rejected() {
        for path in [
            "/:id",
            "/jobs/*rest",
            "/{name}",
            "/a/{*tail}",
            "/a*b",
            "/v1:jobs",
            "/jobs:",
        ] {
            assert_eq!(
                QueueBinding::new(path, 0).validate(),
                Err(BindingError::PatternInPath(path.to_string())),
            );
        }
    }

    #[test]
    fn test_duplicate_paths_rejected() {
        let bindings = vec![
            QueueBinding::new("/a", 1),
            QueueBinding::new("/b", 2),
            QueueBinding::new("/a", 3),
        ];
        assert_eq!(
            validate_bindings(&bindings),
            Err(BindingError::DuplicatePath("/a".to_string()))
        );
    }

    #[test]
    fn test_distinct_paths_accepted() {
        let bindings = vec![QueueBinding::new("/a", 1), QueueBinding::new("/b", 0)];
        assert!(validate_bindings(&bindings).is_ok());
    }
}
