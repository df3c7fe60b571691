//! Numeric statistics primitives.

mod correlation;
mod descriptive;

pub use correlation::{autocorrelation, pearson_correlation};
pub use descriptive::{
    linear_regression, mean, mean_absolute_change, min_max, quartiles, standard_deviation,
    variance,
};
