//! Repository layout patterns
//!
//! A pattern maps artifact coordinates to a path below a repository root:
//!
//! ```text
//! [organisation]/[module]/[revision]/[artifact]-[revision](-[classifier]).[ext]
//!        |
//!        v   org.acme#core;1.0, classifier "sources"
//! org.acme/core/1.0/core-1.0-sources.jar
//! ```
//!
//! A parenthesised group is kept only when every token inside it has a value,
//! so the classifier suffix disappears for the primary artifact.

use crate::domain::ModuleRevisionId;

/// Default pattern for primary and classifier artifacts
pub const DEFAULT_ARTIFACT_PATTERN: &str =
    "[organisation]/[module]/[revision]/[artifact]-[revision](-[classifier]).[ext]";

/// Default pattern for module descriptors
pub const DEFAULT_DESCRIPTOR_PATTERN: &str = "[organisation]/[module]/[revision]/module.yaml";

/// Values substituted into a pattern
#[derive(Debug, Clone, Default)]
pub struct PatternTokens<'a> {
    pub organisation: Option<&'a str>,
    pub module: Option<&'a str>,
    pub revision: Option<&'a str>,
    pub artifact: Option<&'a str>,
    pub artifact_type: Option<&'a str>,
    pub ext: Option<&'a str>,
    pub classifier: Option<&'a str>,
}

impl<'a> PatternTokens<'a> {
    /// Tokens for an artifact of a module revision
    pub fn artifact(
        mrid: &'a ModuleRevisionId,
        ext: &'a str,
        classifier: Option<&'a str>,
    ) -> Self {
        Self {
            organisation: Some(mrid.organisation()),
            module: Some(mrid.name()),
            revision: Some(&mrid.revision),
            artifact: Some(mrid.name()),
            artifact_type: Some(classifier.unwrap_or(ext)),
            ext: Some(ext),
            classifier,
        }
    }

    /// Tokens for a module descriptor
    pub fn descriptor(mrid: &'a ModuleRevisionId) -> Self {
        Self {
            organisation: Some(mrid.organisation()),
            module: Some(mrid.name()),
            revision: Some(&mrid.revision),
            artifact: Some("module"),
            artifact_type: Some("descriptor"),
            ext: Some("yaml"),
            classifier: None,
        }
    }

    fn value(&self, token: &str) -> Option<&'a str> {
        match token {
            "organisation" | "organization" | "org" => self.organisation,
            "module" => self.module,
            "revision" => self.revision,
            "artifact" => self.artifact,
            "type" => self.artifact_type,
            "ext" => self.ext,
            "classifier" => self.classifier,
            _ => None,
        }
    }
}

/// Substitute tokens into `pattern`
///
/// Unknown or missing tokens outside an optional group are left empty.
pub fn substitute(pattern: &str, tokens: &PatternTokens<'_>) -> String {
    let mut output = String::with_capacity(pattern.len());
    let mut group: Option<(String, bool)> = None;
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        match c {
            '(' if group.is_none() => group = Some((String::new(), true)),
            ')' if group.is_some() => {
                if let Some((text, complete)) = group.take() {
                    if complete {
                        output.push_str(&text);
                    }
                }
            }
            '[' => {
                let token: String = chars.by_ref().take_while(|c| *c != ']').collect();
                let value = tokens.value(&token);
                match group.as_mut() {
                    Some((text, complete)) => match value {
                        Some(v) => text.push_str(v),
                        None => *complete = false,
                    },
                    None => output.push_str(value.unwrap_or_default()),
                }
            }
            other => match group.as_mut() {
                Some((text, _)) => text.push(other),
                None => output.push(other),
            },
        }
    }

    output
}

/// The directory holding all revisions of a module, derived from a pattern
///
/// Everything up to the first path segment containing `[revision]` is kept,
/// so `[organisation]/[module]/[revision]/module.yaml` yields
/// `org.acme/core/`. Returns `None` if the pattern has no revision segment.
pub fn revisions_directory(pattern: &str, mrid: &ModuleRevisionId) -> Option<String> {
    let segments: Vec<&str> = pattern.split('/').collect();
    let index = segments.iter().position(|s| s.contains("[revision]"))?;
    let prefix = segments[..index].join("/");
    let tokens = PatternTokens::descriptor(mrid);
    let mut directory = substitute(&prefix, &tokens);
    if !directory.is_empty() {
        directory.push('/');
    }
    Some(directory)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core() -> ModuleRevisionId {
        ModuleRevisionId::new("org.acme", "core", "1.0")
    }

    #[test]
    fn test_primary_artifact_drops_classifier_group() {
        let mrid = core();
        let path = substitute(
            DEFAULT_ARTIFACT_PATTERN,
            &PatternTokens::artifact(&mrid, "jar", None),
        );
        assert_eq!(path, "org.acme/core/1.0/core-1.0.jar");
    }

    #[test]
    fn test_classifier_artifact_keeps_group() {
        let mrid = core();
        let path = substitute(
            DEFAULT_ARTIFACT_PATTERN,
            &PatternTokens::artifact(&mrid, "jar", Some("javadoc")),
        );
        assert_eq!(path, "org.acme/core/1.0/core-1.0-javadoc.jar");
    }

    #[test]
    fn test_descriptor_pattern() {
        let mrid = core();
        let path = substitute(DEFAULT_DESCRIPTOR_PATTERN, &PatternTokens::descriptor(&mrid));
        assert_eq!(path, "org.acme/core/1.0/module.yaml");
    }

    #[test]
    fn test_type_token() {
        let mrid = core();
        let path = substitute(
            "[module]/[type]/[artifact]-[revision].[ext]",
            &PatternTokens::artifact(&mrid, "jar", Some("sources")),
        );
        assert_eq!(path, "core/sources/core-1.0.jar");
    }

    #[test]
    fn test_revisions_directory() {
        let mrid = core();
        assert_eq!(
            revisions_directory(DEFAULT_ARTIFACT_PATTERN, &mrid),
            Some("org.acme/core/".to_string())
        );
        assert_eq!(
            revisions_directory("[revision]/[artifact].[ext]", &mrid),
            Some(String::new())
        );
        assert_eq!(revisions_directory("[module].[ext]", &mrid), None);
    }
}
