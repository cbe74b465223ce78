//! Attached content.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use crate::error::BuildError;
use crate::types::element::{
    Element, HashCell, element_accessors, element_builder_accessors, memoized_value_hash,
};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

/// Data content defined elsewhere or carried inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub(crate) element: Element,
    pub(crate) content_type: Option<String>,
    pub(crate) language: Option<String>,
    pub(crate) data: Option<Vec<u8>>,
    pub(crate) url: Option<String>,
    pub(crate) size: Option<i64>,
    pub(crate) hash: Option<Vec<u8>>,
    pub(crate) title: Option<String>,
    pub(crate) creation: Option<DateTime<FixedOffset>>,
    pub(crate) height: Option<u32>,
    pub(crate) width: Option<u32>,
    pub(crate) frames: Option<u32>,
    pub(crate) duration: Option<Decimal>,
    pub(crate) pages: Option<u32>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(Attachment);
memoized_value_hash!(Attachment {
    element,
    content_type,
    language,
    data,
    url,
    size,
    hash,
    title,
    creation,
    height,
    width,
    frames,
    duration,
    pages,
});

impl Attachment {
    pub fn builder() -> AttachmentBuilder {
        AttachmentBuilder::default()
    }

    /// Mime type of the content.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Inline content bytes.
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn size(&self) -> Option<i64> {
        self.size
    }

    /// SHA-1 digest of the content bytes.
    pub fn hash(&self) -> Option<&[u8]> {
        self.hash.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn creation(&self) -> Option<DateTime<FixedOffset>> {
        self.creation
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn frames(&self) -> Option<u32> {
        self.frames
    }

    pub fn duration(&self) -> Option<Decimal> {
        self.duration
    }

    pub fn pages(&self) -> Option<u32> {
        self.pages
    }

    pub fn to_builder(&self) -> AttachmentBuilder {
        AttachmentBuilder {
            element: self.element.clone(),
            content_type: self.content_type.clone(),
            language: self.language.clone(),
            data: self.data.clone(),
            url: self.url.clone(),
            size: self.size,
            hash: self.hash.clone(),
            title: self.title.clone(),
            creation: self.creation,
            height: self.height,
            width: self.width,
            frames: self.frames,
            duration: self.duration,
            pages: self.pages,
        }
    }
}

impl Visitable for Attachment {
    fn type_name(&self) -> &'static str {
        "Attachment"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty()
            || self.content_type.is_some()
            || self.language.is_some()
            || self.data.is_some()
            || self.url.is_some()
            || self.size.is_some()
            || self.hash.is_some()
            || self.title.is_some()
            || self.creation.is_some()
            || self.height.is_some()
            || self.width.is_some()
            || self.frames.is_some()
            || self.duration.is_some()
            || self.pages.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_str(self.content_type(), "contentType", visitor);
            visitor::accept_str(self.language(), "language", visitor);
            visitor::accept_bytes(self.data(), "data", visitor);
            visitor::accept_str(self.url(), "url", visitor);
            visitor::accept_int(self.size, "size", visitor);
            visitor::accept_bytes(self.hash(), "hash", visitor);
            visitor::accept_str(self.title(), "title", visitor);
            visitor::accept_date_time(self.creation, "creation", visitor);
            visitor::accept_int(self.height.map(i64::from), "height", visitor);
            visitor::accept_int(self.width.map(i64::from), "width", visitor);
            visitor::accept_int(self.frames.map(i64::from), "frames", visitor);
            visitor::accept_decimal(self.duration, "duration", visitor);
            visitor::accept_int(self.pages.map(i64::from), "pages", visitor);
        });
    }
}

impl Validate for Attachment {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.warn_code_format(self.content_type(), "contentType");
        ctx.warn_code_format(self.language(), "language");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`Attachment`].
#[derive(Debug, Clone, Default)]
pub struct AttachmentBuilder {
    element: Element,
    content_type: Option<String>,
    language: Option<String>,
    data: Option<Vec<u8>>,
    url: Option<String>,
    size: Option<i64>,
    hash: Option<Vec<u8>>,
    title: Option<String>,
    creation: Option<DateTime<FixedOffset>>,
    height: Option<u32>,
    width: Option<u32>,
    frames: Option<u32>,
    duration: Option<Decimal>,
    pages: Option<u32>,
}

element_builder_accessors!(AttachmentBuilder);

impl AttachmentBuilder {
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_data(mut self, data: Vec<u8>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_hash(mut self, hash: Vec<u8>) -> Self {
        self.hash = Some(hash);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_creation(mut self, creation: DateTime<FixedOffset>) -> Self {
        self.creation = Some(creation);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_frames(mut self, frames: u32) -> Self {
        self.frames = Some(frames);
        self
    }

    pub fn with_duration(mut self, duration: Decimal) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = Some(pages);
        self
    }

    fn assemble(self) -> Attachment {
        Attachment {
            element: self.element,
            content_type: self.content_type,
            language: self.language,
            data: self.data,
            url: self.url,
            size: self.size,
            hash: self.hash,
            title: self.title,
            creation: self.creation,
            height: self.height,
            width: self.width,
            frames: self.frames,
            duration: self.duration,
            pages: self.pages,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Attachment, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Attachment {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_url_and_content_type() {
        let attachment = Attachment::builder()
            .with_content_type("image/jpeg")
            .with_url("http://imaging.example.org/photo.jpg")
            .with_size(24_096)
            .build()
            .unwrap();
        assert_eq!(attachment.size(), Some(24_096));
    }
}
