use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly positive (greater than zero).
///
/// Flows, pressures, batch masses and durations are all strictly positive.
///
/// # Examples
///
/// ```
/// use sugar_train::support::constraint::StrictlyPositive;
///
/// let flow = StrictlyPositive::new(20_000.0).unwrap();
/// assert_eq!(flow.into_inner(), 20_000.0);
///
/// assert!(StrictlyPositive::new(0.0).is_err());
/// assert!(StrictlyPositive::new(-1.0).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        f64::{MassRate, Pressure},
        mass_rate::kilogram_per_second,
        pressure::bar,
    };

    #[test]
    fn feed_flows() {
        let feed = MassRate::new::<kilogram_per_second>(5.5);
        assert!(StrictlyPositive::new(feed).is_ok());

        let stopped = MassRate::new::<kilogram_per_second>(0.0);
        assert_eq!(
            StrictlyPositive::new(stopped).unwrap_err(),
            ConstraintError::Zero
        );
    }

    #[test]
    fn pressures() {
        assert!(StrictlyPositive::new(Pressure::new::<bar>(0.15)).is_ok());
        assert_eq!(
            StrictlyPositive::new(Pressure::new::<bar>(-0.1)).unwrap_err(),
            ConstraintError::Negative
        );
        assert_eq!(
            StrictlyPositive::new(Pressure::new::<bar>(f64::NAN)).unwrap_err(),
            ConstraintError::NotANumber
        );
    }
}
