//! Pipeline module - builds, fits and applies the preprocessing transformer

pub mod artifact;
pub mod builder;
pub mod column_transformer;
pub mod encode;
pub mod error;
pub mod frame;
pub mod group;
pub mod impute;
pub mod loader;
pub mod missing;
pub mod scale;
pub mod schema;
pub mod traits;
pub mod transformation;

pub use artifact::*;
pub use builder::*;
pub use column_transformer::*;
pub use encode::{FittedOneHotEncoder, HandleUnknown, OneHotEncoder};
pub use error::*;
pub use group::*;
pub use impute::{
    FittedMostFrequentImputer, FittedSimpleImputer, ImputeStrategy, MostFrequentImputer,
    SimpleImputer,
};
pub use loader::*;
pub use missing::*;
pub use scale::{FittedStandardScaler, StandardScaler};
pub use schema::ColumnSchema;
pub use traits::{FittedTransformer, Transformer};
pub use transformation::*;
