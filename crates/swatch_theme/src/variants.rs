//! Component variant attributes
//!
//! Component stylesheets select variants through `data-*` attributes
//! (`[data-size="lg"]`). Each axis is a closed enum with a fixed attribute
//! value, so the mapping is a lookup table rather than logic.

/// One variant axis and its attribute.
pub trait VariantAxis: Copy + Default + 'static {
    /// Attribute name, e.g. `data-size`
    const ATTRIBUTE: &'static str;

    /// Attribute value for this variant
    fn value(self) -> &'static str;

    /// Every variant of the axis.
    fn all() -> &'static [Self];

    /// Parse an attribute value back to a variant.
    fn from_value(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.value() == value)
    }
}

/// Size variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
}

impl VariantAxis for Size {
    const ATTRIBUTE: &'static str = "data-size";

    fn value(self) -> &'static str {
        match self {
            Self::Small => "sm",
            Self::Medium => "md",
            Self::Large => "lg",
        }
    }

    fn all() -> &'static [Self] {
        &[Self::Small, Self::Medium, Self::Large]
    }
}

/// Color variants, one per semantic role family
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tone {
    #[default]
    Primary,
    Secondary,
    Destructive,
    Muted,
}

impl VariantAxis for Tone {
    const ATTRIBUTE: &'static str = "data-tone";

    fn value(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Destructive => "destructive",
            Self::Muted => "muted",
        }
    }

    fn all() -> &'static [Self] {
        &[Self::Primary, Self::Secondary, Self::Destructive, Self::Muted]
    }
}

/// Corner shape variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Shape {
    Square,
    #[default]
    Rounded,
    Pill,
}

impl VariantAxis for Shape {
    const ATTRIBUTE: &'static str = "data-shape";

    fn value(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Rounded => "rounded",
            Self::Pill => "pill",
        }
    }

    fn all() -> &'static [Self] {
        &[Self::Square, Self::Rounded, Self::Pill]
    }
}

/// The variant selection of one component instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VariantSet {
    pub size: Size,
    pub tone: Tone,
    pub shape: Shape,
}

impl VariantSet {
    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// `(attribute, value)` pairs in a fixed order.
    pub fn attributes(&self) -> [(&'static str, &'static str); 3] {
        [
            (Size::ATTRIBUTE, self.size.value()),
            (Tone::ATTRIBUTE, self.tone.value()),
            (Shape::ATTRIBUTE, self.shape.value()),
        ]
    }

    /// Write the attributes onto an element.
    pub fn apply(&self, target: &mut impl crate::scope::ThemeTarget) {
        for (name, value) in self.attributes() {
            target.set_attribute(name, value);
        }
    }
}
