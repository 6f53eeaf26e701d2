pub(crate) mod attributes;
pub(crate) mod effective;
pub(crate) mod resolve;
pub(crate) mod schema;
pub(crate) mod styles;

pub use attributes::{camel_to_kebab, extract_attributes, kebab_to_camel};
pub use effective::{
    AnimationTrigger, BurstOptions, BurstStyle, CircleOptions, DrawingMode, EffectiveConfig,
    HighlightOptions,
};
pub use resolve::{ConfigResolver, OptionLayers, ResolvedConfig, merge_tiers};
pub use schema::{
    ConfigWarning, OptionMap, ValidatedOptions, WarningKind, parse_option_map, validate_options,
};
pub use styles::StyleRegistry;
