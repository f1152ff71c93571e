//! Column-group pipelines
//!
//! A group pipeline reads its declared columns from a DataFrame and chains two
//! stages. The numeric pipeline imputes then standardizes; the categorical
//! pipeline imputes then one-hot encodes. [`GroupPipeline`] puts both behind
//! the same [`Transformer`] interface so a column transformer can hold either.

use ndarray::Array2;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use super::encode::{FittedOneHotEncoder, OneHotEncoder};
use super::error::TransformError;
use super::frame::{CategoricalBlock, NumericBlock};
use super::impute::{
    FittedMostFrequentImputer, FittedSimpleImputer, MostFrequentImputer, SimpleImputer,
};
use super::scale::{FittedStandardScaler, StandardScaler};
use super::traits::{FittedTransformer, Transformer};

/// Impute-then-scale pipeline for numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericPipeline {
    columns: Vec<String>,
    imputer: SimpleImputer,
    scaler: StandardScaler,
}

impl NumericPipeline {
    pub fn new(columns: Vec<String>, imputer: SimpleImputer) -> Self {
        let scaler = StandardScaler::new(columns.clone());
        Self {
            columns,
            imputer,
            scaler,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedNumericPipeline {
    columns: Vec<String>,
    imputer: FittedSimpleImputer,
    scaler: FittedStandardScaler,
}

impl FittedNumericPipeline {
    pub fn imputer(&self) -> &FittedSimpleImputer {
        &self.imputer
    }

    pub fn scaler(&self) -> &FittedStandardScaler {
        &self.scaler
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Transformer for NumericPipeline {
    type Input = DataFrame;
    type Output = Array2<f64>;
    type Fitted = FittedNumericPipeline;

    fn fit(&self, df: &DataFrame) -> Result<FittedNumericPipeline, TransformError> {
        let block = NumericBlock::from_frame(df, &self.columns)?;
        let imputer = self.imputer.fit(&block)?;
        let imputed = imputer.transform(&block)?;
        let scaler = self.scaler.fit(&imputed)?;

        Ok(FittedNumericPipeline {
            columns: self.columns.clone(),
            imputer,
            scaler,
        })
    }
}

impl FittedTransformer for FittedNumericPipeline {
    type Input = DataFrame;
    type Output = Array2<f64>;

    fn transform(&self, df: &DataFrame) -> Result<Array2<f64>, TransformError> {
        let block = NumericBlock::from_frame(df, &self.columns)?;
        let imputed = self.imputer.transform(&block)?;
        self.scaler.transform(&imputed)
    }

    fn n_features_in(&self) -> usize {
        self.columns.len()
    }

    fn n_features_out(&self) -> usize {
        self.scaler.n_features_out()
    }

    fn feature_names_out(&self) -> Vec<String> {
        self.scaler.feature_names_out()
    }
}

/// Impute-then-encode pipeline for categorical columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalPipeline {
    columns: Vec<String>,
    imputer: MostFrequentImputer,
    encoder: OneHotEncoder,
}

impl CategoricalPipeline {
    pub fn new(columns: Vec<String>, encoder: OneHotEncoder) -> Self {
        Self {
            columns,
            imputer: MostFrequentImputer::new(),
            encoder,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedCategoricalPipeline {
    columns: Vec<String>,
    imputer: FittedMostFrequentImputer,
    encoder: FittedOneHotEncoder,
}

impl FittedCategoricalPipeline {
    pub fn imputer(&self) -> &FittedMostFrequentImputer {
        &self.imputer
    }

    pub fn encoder(&self) -> &FittedOneHotEncoder {
        &self.encoder
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Transformer for CategoricalPipeline {
    type Input = DataFrame;
    type Output = Array2<f64>;
    type Fitted = FittedCategoricalPipeline;

    fn fit(&self, df: &DataFrame) -> Result<FittedCategoricalPipeline, TransformError> {
        let block = CategoricalBlock::from_frame(df, &self.columns)?;
        let imputer = self.imputer.fit(&block)?;
        let filled = imputer.transform(&block)?;
        let encoder = self.encoder.fit(&filled)?;

        Ok(FittedCategoricalPipeline {
            columns: self.columns.clone(),
            imputer,
            encoder,
        })
    }
}

impl FittedTransformer for FittedCategoricalPipeline {
    type Input = DataFrame;
    type Output = Array2<f64>;

    fn transform(&self, df: &DataFrame) -> Result<Array2<f64>, TransformError> {
        let block = CategoricalBlock::from_frame(df, &self.columns)?;
        let filled = self.imputer.transform(&block)?;
        self.encoder.transform(&filled)
    }

    fn n_features_in(&self) -> usize {
        self.columns.len()
    }

    fn n_features_out(&self) -> usize {
        self.encoder.n_features_out()
    }

    fn feature_names_out(&self) -> Vec<String> {
        self.encoder.feature_names_out()
    }
}

/// Either column-group pipeline, dispatched by group membership.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupPipeline {
    Numeric(NumericPipeline),
    Categorical(CategoricalPipeline),
}

impl GroupPipeline {
    pub fn columns(&self) -> &[String] {
        match self {
            GroupPipeline::Numeric(p) => p.columns(),
            GroupPipeline::Categorical(p) => p.columns(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FittedGroupPipeline {
    Numeric(FittedNumericPipeline),
    Categorical(FittedCategoricalPipeline),
}

impl FittedGroupPipeline {
    pub fn columns(&self) -> &[String] {
        match self {
            FittedGroupPipeline::Numeric(p) => p.columns(),
            FittedGroupPipeline::Categorical(p) => p.columns(),
        }
    }
}

impl Transformer for GroupPipeline {
    type Input = DataFrame;
    type Output = Array2<f64>;
    type Fitted = FittedGroupPipeline;

    fn fit(&self, df: &DataFrame) -> Result<FittedGroupPipeline, TransformError> {
        Ok(match self {
            GroupPipeline::Numeric(p) => FittedGroupPipeline::Numeric(p.fit(df)?),
            GroupPipeline::Categorical(p) => FittedGroupPipeline::Categorical(p.fit(df)?),
        })
    }
}

impl FittedTransformer for FittedGroupPipeline {
    type Input = DataFrame;
    type Output = Array2<f64>;

    fn transform(&self, df: &DataFrame) -> Result<Array2<f64>, TransformError> {
        match self {
            FittedGroupPipeline::Numeric(p) => p.transform(df),
            FittedGroupPipeline::Categorical(p) => p.transform(df),
        }
    }

    fn n_features_in(&self) -> usize {
        match self {
            FittedGroupPipeline::Numeric(p) => p.n_features_in(),
            FittedGroupPipeline::Categorical(p) => p.n_features_in(),
        }
    }

    fn n_features_out(&self) -> usize {
        match self {
            FittedGroupPipeline::Numeric(p) => p.n_features_out(),
            FittedGroupPipeline::Categorical(p) => p.n_features_out(),
        }
    }

    fn feature_names_out(&self) -> Vec<String> {
        match self {
            FittedGroupPipeline::Numeric(p) => p.feature_names_out(),
            FittedGroupPipeline::Categorical(p) => p.feature_names_out(),
        }
    }
}
