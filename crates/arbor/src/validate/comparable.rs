//! Rules over ordered values. The bound and the offending value are handed
//! to the error builder as [`Value`]s.

use arbor_value::{Location, Value};

use crate::env::ReaderEnv;
use crate::error::{
    EqErrorBuilder, ExclusiveMaximumErrorBuilder, ExclusiveMinimumErrorBuilder,
    MaximumErrorBuilder, MinimumErrorBuilder, NeErrorBuilder,
};
use crate::result::ValidationResult;
use crate::validate::{Validator, ValidatorExt};

macro_rules! comparable_rule {
    ($(#[$doc:meta])* $name:ident, $ctor:ident, $builder:ident, |$bound:ident, $value:ident| $holds:expr, $env:ident => $error:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name<T> {
            bound: T,
        }

        pub fn $ctor<T>(bound: T) -> $name<T> {
            $name { bound }
        }

        impl<T> ValidatorExt for $name<T> {}

        impl<EB, T> Validator<EB, T> for $name<T>
        where
            EB: $builder,
            T: PartialOrd + Clone + Into<Value>,
        {
            fn validate(
                &self,
                $env: &ReaderEnv<EB>,
                location: &Location,
                value: &T,
            ) -> ValidationResult<EB::Error> {
                let $bound = &self.bound;
                let $value = value;
                ValidationResult::check($holds, location, || $error)
            }
        }
    };
}

comparable_rule!(
    /// Inclusive lower bound.
    Min, min, MinimumErrorBuilder,
    |bound, value| value >= bound,
    env => env.error_builders.minimum_error(bound.clone().into(), value.clone().into())
);

comparable_rule!(
    /// Inclusive upper bound.
    Max, max, MaximumErrorBuilder,
    |bound, value| value <= bound,
    env => env.error_builders.maximum_error(bound.clone().into(), value.clone().into())
);

comparable_rule!(
    /// Exclusive lower bound.
    Gt, gt, ExclusiveMinimumErrorBuilder,
    |bound, value| value > bound,
    env => env.error_builders.exclusive_minimum_error(bound.clone().into(), value.clone().into())
);

comparable_rule!(
    /// Exclusive upper bound.
    Lt, lt, ExclusiveMaximumErrorBuilder,
    |bound, value| value < bound,
    env => env.error_builders.exclusive_maximum_error(bound.clone().into(), value.clone().into())
);

comparable_rule!(
    /// Equality with a fixed value.
    Equal, eq, EqErrorBuilder,
    |bound, value| value == bound,
    env => env.error_builders.eq_error(bound.clone().into(), value.clone().into())
);

comparable_rule!(
    NotEqual, ne, NeErrorBuilder,
    |bound, value| value != bound,
    env => env.error_builders.ne_error(bound.clone().into())
);

/// Same as [`min`].
pub fn ge<T>(bound: T) -> Min<T> {
    min(bound)
}

/// Same as [`max`].
pub fn le<T>(bound: T) -> Max<T> {
    max(bound)
}
