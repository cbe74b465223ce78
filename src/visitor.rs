//! Traversal of frozen entities.
//!
//! Every node exposes `accept(name, index, visitor)`. The hook order per
//! node is fixed: `pre_visit` gates the node, `visit_start` opens it,
//! `visit` gates its children, children are visited in declaration order
//! (id first, then extensions, then the declared fields), `visit_end`
//! closes it and `post_visit` runs last. List fields wrap their items in
//! `visit_list_start`/`visit_list_end` and pass each item its index.
//!
//! All hooks default to no-ops, so a visitor implements only what it needs.
//! Serializers, redactors and collectors hang off this seam; the model
//! itself never walks for its own purposes.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

/// Receiver of traversal events.
#[allow(unused_variables)]
pub trait Visitor {
    /// Gate for the whole node; returning false skips it entirely.
    fn pre_visit(&mut self, node: &dyn Visitable) -> bool {
        true
    }

    /// Counterpart of `pre_visit`, after `visit_end`.
    fn post_visit(&mut self, node: &dyn Visitable) {}

    fn visit_start(&mut self, name: &str, index: Option<usize>, node: &dyn Visitable) {}

    /// Gate for the node's children; returning false prunes them.
    fn visit(&mut self, name: &str, index: Option<usize>, node: &dyn Visitable) -> bool {
        true
    }

    fn visit_end(&mut self, name: &str, index: Option<usize>, node: &dyn Visitable) {}

    fn visit_list_start(&mut self, name: &str, len: usize) {}

    fn visit_list_end(&mut self, name: &str, len: usize) {}

    fn visit_str(&mut self, name: &str, index: Option<usize>, value: &str) {}

    fn visit_bool(&mut self, name: &str, index: Option<usize>, value: bool) {}

    fn visit_int(&mut self, name: &str, index: Option<usize>, value: i64) {}

    fn visit_decimal(&mut self, name: &str, index: Option<usize>, value: Decimal) {}

    fn visit_date(&mut self, name: &str, index: Option<usize>, value: NaiveDate) {}

    fn visit_date_time(&mut self, name: &str, index: Option<usize>, value: DateTime<FixedOffset>) {}

    fn visit_instant(&mut self, name: &str, index: Option<usize>, value: DateTime<Utc>) {}

    fn visit_time(&mut self, name: &str, index: Option<usize>, value: NaiveTime) {}

    fn visit_bytes(&mut self, name: &str, index: Option<usize>, value: &[u8]) {}
}

/// A node that can be traversed.
pub trait Visitable {
    /// Structural type name; backbone components use their dotted FHIR
    /// path (`CareTeam.Participant`).
    fn type_name(&self) -> &'static str;

    /// True when at least one field, including id and extensions, is
    /// populated.
    fn has_children(&self) -> bool;

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor);
}

/// Standard accept skeleton around a node's child dispatch.
macro_rules! accept_frame {
    ($self:ident, $name:ident, $index:ident, $visitor:ident => $children:block) => {
        if $visitor.pre_visit($self) {
            $visitor.visit_start($name, $index, $self);
            if $visitor.visit($name, $index, $self) $children
            $visitor.visit_end($name, $index, $self);
            $visitor.post_visit($self);
        }
    };
}
pub(crate) use accept_frame;

pub fn accept_node<T: Visitable>(node: Option<&T>, name: &str, visitor: &mut dyn Visitor) {
    if let Some(node) = node {
        node.accept(name, None, visitor);
    }
}

pub fn accept_nodes<T: Visitable>(nodes: &[T], name: &str, visitor: &mut dyn Visitor) {
    if nodes.is_empty() {
        return;
    }
    visitor.visit_list_start(name, nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        node.accept(name, Some(index), visitor);
    }
    visitor.visit_list_end(name, nodes.len());
}

pub fn accept_str(value: Option<&str>, name: &str, visitor: &mut dyn Visitor) {
    if let Some(value) = value {
        visitor.visit_str(name, None, value);
    }
}

pub fn accept_strs(values: &[String], name: &str, visitor: &mut dyn Visitor) {
    if values.is_empty() {
        return;
    }
    visitor.visit_list_start(name, values.len());
    for (index, value) in values.iter().enumerate() {
        visitor.visit_str(name, Some(index), value);
    }
    visitor.visit_list_end(name, values.len());
}

pub fn accept_bool(value: Option<bool>, name: &str, visitor: &mut dyn Visitor) {
    if let Some(value) = value {
        visitor.visit_bool(name, None, value);
    }
}

pub fn accept_int(value: Option<i64>, name: &str, visitor: &mut dyn Visitor) {
    if let Some(value) = value {
        visitor.visit_int(name, None, value);
    }
}

pub fn accept_decimal(value: Option<Decimal>, name: &str, visitor: &mut dyn Visitor) {
    if let Some(value) = value {
        visitor.visit_decimal(name, None, value);
    }
}

pub fn accept_date(value: Option<NaiveDate>, name: &str, visitor: &mut dyn Visitor) {
    if let Some(value) = value {
        visitor.visit_date(name, None, value);
    }
}

pub fn accept_date_time(
    value: Option<DateTime<FixedOffset>>,
    name: &str,
    visitor: &mut dyn Visitor,
) {
    if let Some(value) = value {
        visitor.visit_date_time(name, None, value);
    }
}

pub fn accept_date_times(values: &[DateTime<FixedOffset>], name: &str, visitor: &mut dyn Visitor) {
    if values.is_empty() {
        return;
    }
    visitor.visit_list_start(name, values.len());
    for (index, value) in values.iter().enumerate() {
        visitor.visit_date_time(name, Some(index), *value);
    }
    visitor.visit_list_end(name, values.len());
}

pub fn accept_instant(value: Option<DateTime<Utc>>, name: &str, visitor: &mut dyn Visitor) {
    if let Some(value) = value {
        visitor.visit_instant(name, None, value);
    }
}

pub fn accept_time(value: Option<NaiveTime>, name: &str, visitor: &mut dyn Visitor) {
    if let Some(value) = value {
        visitor.visit_time(name, None, value);
    }
}

pub fn accept_times(values: &[NaiveTime], name: &str, visitor: &mut dyn Visitor) {
    if values.is_empty() {
        return;
    }
    visitor.visit_list_start(name, values.len());
    for (index, value) in values.iter().enumerate() {
        visitor.visit_time(name, Some(index), *value);
    }
    visitor.visit_list_end(name, values.len());
}

pub fn accept_bytes(value: Option<&[u8]>, name: &str, visitor: &mut dyn Visitor) {
    if let Some(value) = value {
        visitor.visit_bytes(name, None, value);
    }
}

/// Visit an optional coded value through its FHIR spelling.
pub fn accept_code<T: AsRef<str>>(value: Option<&T>, name: &str, visitor: &mut dyn Visitor) {
    if let Some(value) = value {
        visitor.visit_str(name, None, value.as_ref());
    }
}

pub fn accept_codes<T: AsRef<str>>(values: &[T], name: &str, visitor: &mut dyn Visitor) {
    if values.is_empty() {
        return;
    }
    visitor.visit_list_start(name, values.len());
    for (index, value) in values.iter().enumerate() {
        visitor.visit_str(name, Some(index), value.as_ref());
    }
    visitor.visit_list_end(name, values.len());
}

/// Dispatch an optional choice slot under its element name.
pub fn accept_choice(
    value: Option<&crate::choice::ChoiceValue>,
    name: &str,
    visitor: &mut dyn Visitor,
) {
    if let Some(value) = value {
        value.accept_as(name, visitor);
    }
}
