//! Measured amounts: [`Quantity`], [`Range`] and [`Ratio`].

use rust_decimal::Decimal;

use crate::error::BuildError;
use crate::types::codes::QuantityComparator;
use crate::types::element::{
    Element, HashCell, element_accessors, element_builder_accessors, memoized_value_hash,
};
use crate::validation::{self, Validate, ValidationContext};
use crate::visitor::{self, Visitable, Visitor, accept_frame};

/// A measured or measurable amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    pub(crate) element: Element,
    pub(crate) value: Option<Decimal>,
    pub(crate) comparator: Option<QuantityComparator>,
    pub(crate) unit: Option<String>,
    pub(crate) system: Option<String>,
    pub(crate) code: Option<String>,
    pub(crate) hash_cell: HashCell,
}

/// A length of time; structurally a [`Quantity`] whose unit is a time unit.
pub type Duration = Quantity;

/// A [`Quantity`] known to carry no comparator.
pub type SimpleQuantity = Quantity;

element_accessors!(Quantity);
memoized_value_hash!(Quantity { element, value, comparator, unit, system, code });

impl Quantity {
    pub fn builder() -> QuantityBuilder {
        QuantityBuilder::default()
    }

    pub fn value(&self) -> Option<Decimal> {
        self.value
    }

    pub fn comparator(&self) -> Option<QuantityComparator> {
        self.comparator
    }

    /// Human-readable unit representation.
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// System that defines the coded unit form, typically UCUM.
    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn to_builder(&self) -> QuantityBuilder {
        QuantityBuilder {
            element: self.element.clone(),
            value: self.value,
            comparator: self.comparator,
            unit: self.unit.clone(),
            system: self.system.clone(),
            code: self.code.clone(),
        }
    }
}

impl Visitable for Quantity {
    fn type_name(&self) -> &'static str {
        "Quantity"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty()
            || self.value.is_some()
            || self.comparator.is_some()
            || self.unit.is_some()
            || self.system.is_some()
            || self.code.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_decimal(self.value, "value", visitor);
            visitor::accept_code(self.comparator.as_ref(), "comparator", visitor);
            visitor::accept_str(self.unit(), "unit", visitor);
            visitor::accept_str(self.system(), "system", visitor);
            visitor::accept_str(self.code(), "code", visitor);
        });
    }
}

impl Validate for Quantity {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.warn_code_format(self.code(), "code");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`Quantity`].
#[derive(Debug, Clone, Default)]
pub struct QuantityBuilder {
    element: Element,
    value: Option<Decimal>,
    comparator: Option<QuantityComparator>,
    unit: Option<String>,
    system: Option<String>,
    code: Option<String>,
}

element_builder_accessors!(QuantityBuilder);

impl QuantityBuilder {
    pub fn with_value(mut self, value: Decimal) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_comparator(mut self, comparator: QuantityComparator) -> Self {
        self.comparator = Some(comparator);
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    fn assemble(self) -> Quantity {
        Quantity {
            element: self.element,
            value: self.value,
            comparator: self.comparator,
            unit: self.unit,
            system: self.system,
            code: self.code,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Quantity, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Quantity {
        self.assemble()
    }
}

/// A low/high pair of simple quantities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    pub(crate) element: Element,
    pub(crate) low: Option<SimpleQuantity>,
    pub(crate) high: Option<SimpleQuantity>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(Range);
memoized_value_hash!(Range { element, low, high });

impl Range {
    pub fn builder() -> RangeBuilder {
        RangeBuilder::default()
    }

    pub fn low(&self) -> Option<&SimpleQuantity> {
        self.low.as_ref()
    }

    pub fn high(&self) -> Option<&SimpleQuantity> {
        self.high.as_ref()
    }

    pub fn to_builder(&self) -> RangeBuilder {
        RangeBuilder {
            element: self.element.clone(),
            low: self.low.clone(),
            high: self.high.clone(),
        }
    }
}

impl Visitable for Range {
    fn type_name(&self) -> &'static str {
        "Range"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty() || self.low.is_some() || self.high.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_node(self.low.as_ref(), "low", visitor);
            visitor::accept_node(self.high.as_ref(), "high", visitor);
        });
    }
}

impl Validate for Range {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.validate_child(self.low.as_ref(), "low");
        ctx.validate_child(self.high.as_ref(), "high");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`Range`].
#[derive(Debug, Clone, Default)]
pub struct RangeBuilder {
    element: Element,
    low: Option<SimpleQuantity>,
    high: Option<SimpleQuantity>,
}

element_builder_accessors!(RangeBuilder);

impl RangeBuilder {
    pub fn with_low(mut self, low: SimpleQuantity) -> Self {
        self.low = Some(low);
        self
    }

    pub fn with_high(mut self, high: SimpleQuantity) -> Self {
        self.high = Some(high);
        self
    }

    fn assemble(self) -> Range {
        Range {
            element: self.element,
            low: self.low,
            high: self.high,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Range, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Range {
        self.assemble()
    }
}

/// A numerator/denominator pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ratio {
    pub(crate) element: Element,
    pub(crate) numerator: Option<Quantity>,
    pub(crate) denominator: Option<SimpleQuantity>,
    pub(crate) hash_cell: HashCell,
}

element_accessors!(Ratio);
memoized_value_hash!(Ratio { element, numerator, denominator });

impl Ratio {
    pub fn builder() -> RatioBuilder {
        RatioBuilder::default()
    }

    pub fn numerator(&self) -> Option<&Quantity> {
        self.numerator.as_ref()
    }

    pub fn denominator(&self) -> Option<&SimpleQuantity> {
        self.denominator.as_ref()
    }

    pub fn to_builder(&self) -> RatioBuilder {
        RatioBuilder {
            element: self.element.clone(),
            numerator: self.numerator.clone(),
            denominator: self.denominator.clone(),
        }
    }
}

impl Visitable for Ratio {
    fn type_name(&self) -> &'static str {
        "Ratio"
    }

    fn has_children(&self) -> bool {
        !self.element.is_empty() || self.numerator.is_some() || self.denominator.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_frame!(self, name, index, visitor => {
            self.element.accept_children(visitor);
            visitor::accept_node(self.numerator.as_ref(), "numerator", visitor);
            visitor::accept_node(self.denominator.as_ref(), "denominator", visitor);
        });
    }
}

impl Validate for Ratio {
    fn validate_node(&self, ctx: &mut ValidationContext) {
        self.element.validate_into(ctx);
        ctx.validate_child(self.numerator.as_ref(), "numerator");
        ctx.validate_child(self.denominator.as_ref(), "denominator");
        ctx.require_value_or_children(self);
    }
}

/// Builder for [`Ratio`].
#[derive(Debug, Clone, Default)]
pub struct RatioBuilder {
    element: Element,
    numerator: Option<Quantity>,
    denominator: Option<SimpleQuantity>,
}

element_builder_accessors!(RatioBuilder);

impl RatioBuilder {
    pub fn with_numerator(mut self, numerator: Quantity) -> Self {
        self.numerator = Some(numerator);
        self
    }

    pub fn with_denominator(mut self, denominator: SimpleQuantity) -> Self {
        self.denominator = Some(denominator);
        self
    }

    fn assemble(self) -> Ratio {
        Ratio {
            element: self.element,
            numerator: self.numerator,
            denominator: self.denominator,
            hash_cell: HashCell::new(),
        }
    }

    pub fn build(self) -> Result<Ratio, BuildError> {
        validation::finalize(self.assemble())
    }

    pub fn build_unvalidated(self) -> Ratio {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn quantity_builds_with_ucum_form() {
        let quantity = Quantity::builder()
            .with_value(dec!(25.5))
            .with_unit("mg")
            .with_system("http://unitsofmeasure.org")
            .with_code("mg")
            .build()
            .unwrap();
        assert_eq!(quantity.value(), Some(dec!(25.5)));
        assert_eq!(quantity.code(), Some("mg"));
    }

    #[test]
    fn range_descends_into_its_bounds() {
        let range = Range::builder()
            .with_low(Quantity::builder().build_unvalidated())
            .build_unvalidated();
        let issues = range.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "Range.low");
    }
}
