//! Resource metadata and narrative.

use chrono::{DateTime, Utc};

use crate::error::BuildError;
use crate::types::codes::NarrativeStatus;
use crate::types::coding::Coding;
use crate::types::element::{
    Element, HashCell, element_accessors, element_builder_accessors, memoized_value_hash,
};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

/// Infrastructure metadata carried by every resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub(crate) element: Element,
    pub(crate) version_id: Option<String>,
    pub(crate) last_updated: Option<DateTime<Utc>>,
    pub(crate) source: Option<String>,
    pub(crate) profile: Vec<String>,
    pub(crate) security: Vec<Coding>,
    pub(crate) tag: Vec<Coding>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(Meta);
memoized_value_hash!(Meta { element, version_id, last_updated, source, profile, security, tag });

impl Meta {
    pub fn builder() -> MetaBuilder {
        MetaBuilder::default()
    }

    pub fn version_id(&self) -> Option<&str> {
        self.version_id.as_deref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Canonical URLs of profiles the resource claims to conform to.
    pub fn profile(&self) -> &[String] {
        &self.profile
    }

    pub fn security(&self) -> &[Coding] {
        &self.security
    }

    pub fn tag(&self) -> &[Coding] {
        &self.tag
    }

    pub fn to_builder(&self) -> MetaBuilder {
        MetaBuilder {
            element: self.element.clone(),
            version_id: self.version_id.clone(),
            last_updated: self.last_updated,
            source: self.source.clone(),
            profile: self.profile.clone(),
            security: self.security.clone(),
            tag: self.tag.clone(),
        }
    }
}

impl Visitable for Meta {
    fn type_name(&self) -> &'static str {
        "Meta"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty()
            || self.version_id.is_some()
            || self.last_updated.is_some()
            || self.source.is_some()
            || !self.profile.is_empty()
            || !self.security.is_empty()
            || !self.tag.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_str(self.version_id(), "versionId", visitor);
            visitor::accept_instant(self.last_updated, "lastUpdated", visitor);
            visitor::accept_str(self.source(), "source", visitor);
            visitor::accept_strs(&self.profile, "profile", visitor);
            visitor::accept_nodes(&self.security, "security", visitor);
            visitor::accept_nodes(&self.tag, "tag", visitor);
        });
    }
}

impl Validate for Meta {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.validate_children(&self.security, "security");
        ctx.validate_children(&self.tag, "tag");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`Meta`].
#[derive(Debug, Clone, Default)]
pub struct MetaBuilder {
    element: Element,
    version_id: Option<String>,
    last_updated: Option<DateTime<Utc>>,
    source: Option<String>,
    profile: Vec<String>,
    security: Vec<Coding>,
    tag: Vec<Coding>,
}

element_builder_accessors!(MetaBuilder);

impl MetaBuilder {
    pub fn with_version_id(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }

    pub fn with_last_updated(mut self, last_updated: DateTime<Utc>) -> Self {
        self.last_updated = Some(last_updated);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn add_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile.push(profile.into());
        self
    }

    pub fn with_profile(mut self, profile: Vec<String>) -> Self {
        self.profile = profile;
        self
    }

    pub fn add_security(mut self, security: Coding) -> Self {
        self.security.push(security);
        self
    }

    pub fn with_security(mut self, security: Vec<Coding>) -> Self {
        self.security = security;
        self
    }

    pub fn add_tag(mut self, tag: Coding) -> Self {
        self.tag.push(tag);
        self
    }

    pub fn with_tag(mut self, tag: Vec<Coding>) -> Self {
        self.tag = tag;
        self
    }

    fn assemble(self) -> Meta {
        Meta {
            element: self.element,
            version_id: self.version_id,
            last_updated: self.last_updated,
            source: self.source,
            profile: self.profile,
            security: self.security,
            tag: self.tag,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Meta, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Meta {
        self.assemble()
    }
}

/// Human-readable narrative: a generation status plus the xhtml division.
/// Both parts are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub(crate) element: Element,
    pub(crate) status: Option<NarrativeStatus>,
    pub(crate) div: Option<String>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(Narrative);
memoized_value_hash!(Narrative { element, status, div });

impl Narrative {
    pub fn builder() -> NarrativeBuilder {
        NarrativeBuilder::default()
    }

    pub fn status(&self) -> Option<NarrativeStatus> {
        self.status
    }

    pub fn div(&self) -> Option<&str> {
        self.div.as_deref()
    }

    pub fn to_builder(&self) -> NarrativeBuilder {
        NarrativeBuilder {
            element: self.element.clone(),
            status: self.status,
            div: self.div.clone(),
        }
    }
}

impl Visitable for Narrative {
    fn type_name(&self) -> &'static str {
        "Narrative"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty() || self.status.is_some() || self.div.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_code(self.status.as_ref(), "status", visitor);
            visitor::accept_str(self.div(), "div", visitor);
        });
    }
}

impl Validate for Narrative {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.require(&self.status, "status");
        ctx.require(&self.div, "div");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`Narrative`].
#[derive(Debug, Clone, Default)]
pub struct NarrativeBuilder {
    element: Element,
    status: Option<NarrativeStatus>,
    div: Option<String>,
}

element_builder_accessors!(NarrativeBuilder);

impl NarrativeBuilder {
    pub fn with_status(mut self, status: NarrativeStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_div(mut self, div: impl Into<String>) -> Self {
        self.div = Some(div.into());
        self
    }

    fn assemble(self) -> Narrative {
        Narrative {
            element: self.element,
            status: self.status,
            div: self.div,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Narrative, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Narrative {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::IssueKind;

    #[test]
    fn narrative_requires_status_and_div() {
        let err = Narrative::builder()
            .with_id("narrative-1")
            .build()
            .unwrap_err();
        let paths: Vec<_> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, ["Narrative.status", "Narrative.div"]);
        assert!(err.issues().iter().all(|i| i.kind == IssueKind::MissingRequiredField));
    }

    #[test]
    fn generated_narrative_builds() {
        let narrative = Narrative::builder()
            .with_status(NarrativeStatus::Generated)
            .with_div("<div xmlns=\"http://www.w3.org/1999/xhtml\">Care team</div>")
            .build()
            .unwrap();
        assert_eq!(narrative.status(), Some(NarrativeStatus::Generated));
    }
}
