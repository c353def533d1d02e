pub mod schema;
pub mod signals;

pub use schema::{
    ColorProfile, ColorRoles, ComponentCategory, ComponentProfile, DesignSchema, DesignSummary,
    FontSpec, IconProfile, LayoutProfile, Metadata, PageDimensions, StyleMap, StyleSample,
    TypographyTable,
};
pub use signals::{ColorSource, RawColorSample, SignalSet};
