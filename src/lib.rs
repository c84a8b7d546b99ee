// ============================================================================
// Exact Quantity Library
// Overflow-checked exact arithmetic for dimensional physical quantities
// ============================================================================

//! # Exact Quantity
//!
//! Dimension-tagged physical quantities whose fixed-point arithmetic is either
//! exact or fails loudly.
//!
//! ## Features
//!
//! - **Exact decimal scaling** of i64 counts by f64 factors, using the
//!   shortest round-trip decimal form of the factor and 128-bit intermediates
//! - **Overflow-checked** integer arithmetic with explicit error values
//! - **Compile-time dimensions** (length, time, speed, acceleration, jerk)
//! - **Interchangeable representations** (nano-unit fixed point, f64) that
//!   compare and hash by canonical value
//!
//! ## Example
//!
//! ```rust
//! use exact_quantity::prelude::*;
//!
//! let km = Length::unit("km").unwrap();
//! let hour = Time::unit("h").unwrap();
//!
//! let distance = FixedLength::from_i64(36, km).unwrap();
//! let duration = FixedTime::from_i64(1, hour).unwrap();
//! let speed = FixedSpeed::per(&distance, &duration).unwrap();
//!
//! assert_eq!(speed.to_i64(Speed::canonical_unit()), 10);
//! assert_eq!(
//!     FixedLength::MAX.checked_mul_scalar(2.0),
//!     Err(NumericError::Overflow)
//! );
//! ```

pub mod domain;
pub mod interfaces;
pub mod numeric;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        Acceleration, Dimension, DimensionKind, FixedAcceleration, FixedJerk, FixedLength,
        FixedQuantity, FixedSpeed, FixedTime, FloatQuantity, Jerk, Length, QuantityUnit, Rate,
        RateDimension, Speed, Time, UnitCatalog, UnitCatalogConfig,
    };
    pub use crate::interfaces::Quantity;
    pub use crate::numeric::{
        descale_exact, reciprocal_exact, scale_exact, NumericError, NumericResult,
    };
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use crate::domain::calculate_hash_code;
    use proptest::prelude::*;

    fn meters() -> &'static QuantityUnit<Length> {
        Length::canonical_unit()
    }

    fn seconds() -> &'static QuantityUnit<Time> {
        Time::canonical_unit()
    }

    #[test]
    fn test_length_equality_across_units_and_representations() {
        let nm = Length::unit("nm").unwrap();
        let mm = Length::unit("mm").unwrap();

        let from_nm = FixedLength::from_i64(1_000_000_000, nm).unwrap();
        let from_mm = FixedLength::from_i64(1000, mm).unwrap();
        let float_m = FloatQuantity::<Length>::new(1.0, meters()).unwrap();

        assert_eq!(from_nm, from_mm);
        assert!(from_nm == float_m);
        assert_eq!(calculate_hash_code(&from_nm), calculate_hash_code(&from_mm));
        assert_eq!(calculate_hash_code(&from_mm), calculate_hash_code(&float_m));

        let boxed: Vec<Box<dyn Quantity<Length>>> = vec![Box::new(from_nm), Box::new(float_m)];
        assert!(*boxed[0] == *boxed[1]);
    }

    #[test]
    fn test_speed_and_acceleration_chains() {
        let hour = Time::unit("h").unwrap();
        let one_hour = FixedTime::from_i64(1, hour).unwrap();
        let one_second = FixedTime::from_i64(1, seconds()).unwrap();

        let slow = FixedSpeed::per(&FixedLength::from_i64(3600, meters()).unwrap(), &one_hour).unwrap();
        let unit_speed =
            FixedSpeed::per(&FixedLength::from_i64(1, meters()).unwrap(), &one_second).unwrap();
        assert_eq!(slow, unit_speed);

        let fast =
            FixedSpeed::per(&FixedLength::from_i64(12_960_000, meters()).unwrap(), &one_hour)
                .unwrap();
        let acceleration = FixedAcceleration::per(&fast, &one_hour).unwrap();
        let unit_acceleration = FixedAcceleration::per(&unit_speed, &one_second).unwrap();
        assert_eq!(acceleration, unit_acceleration);
        assert_eq!(
            calculate_hash_code(&acceleration),
            calculate_hash_code(&unit_acceleration)
        );
    }

    #[test]
    fn test_scaling_examples() {
        assert_eq!(scale_exact(123_456_789, 0.1), Ok(12_345_678));
        assert_eq!(scale_exact(-7, 2.5), Ok(-17));
        assert_eq!(descale_exact(10, 0.3), Ok(33));
        assert_eq!(scale_exact(i64::MAX, 2.0), Err(NumericError::Overflow));
        assert_eq!(descale_exact(1, 0.0), Err(NumericError::InvalidArgument));
        assert_eq!(reciprocal_exact(4.0), Ok(0.25));
    }

    #[test]
    fn test_fixed_negation_edges() {
        let max = FixedLength::MAX;
        assert_eq!(max.checked_neg().unwrap().checked_neg().unwrap(), max);
        assert_eq!(FixedLength::MIN.checked_neg(), Err(NumericError::Overflow));
    }

    #[test]
    fn test_custom_catalog() {
        let config = UnitCatalogConfig::new(DimensionKind::Length)
            .with_unit("kilometer", "km", "m", 1000.0)
            .with_unit("astronomical unit", "au", "km", 149_597_870.7);
        let catalog = UnitCatalog::<Length>::build(&config).unwrap();
        let au = catalog.get("au").unwrap();

        // 1 au in nanometers exceeds i64
        assert_eq!(FixedLength::from_i64(1, au), Err(NumericError::Overflow));
        let near = FloatQuantity::<Length>::new(1.0, au).unwrap();
        assert_eq!(near.to_i64(catalog.get("km").unwrap()), 149_597_870);
    }

    // Values whose float products stay exact for every preset factor.
    fn assert_presets_agree<D: Dimension>(nano_inexact: &[&str]) {
        for unit in D::catalog().iter() {
            if nano_inexact.iter().any(|symbol| *symbol == unit.symbol()) {
                continue;
            }
            for value in [1i64, 2, -4, 1024] {
                let fixed = FixedQuantity::<D>::from_i64(value, unit).unwrap();
                let float = FloatQuantity::<D>::new(value as f64, unit).unwrap();
                assert!(fixed == float, "{} {} differs across representations", value, unit.symbol());
                assert_eq!(calculate_hash_code(&fixed), calculate_hash_code(&float));
            }
        }
    }

    #[test]
    fn test_presets_agree_across_representations() {
        assert_presets_agree::<Length>(&[]);
        assert_presets_agree::<Time>(&[]);
        // km/h and kn are not a whole number of nm/s
        assert_presets_agree::<Speed>(&["km/h", "kn"]);
        assert_presets_agree::<Acceleration>(&[]);
        assert_presets_agree::<Jerk>(&[]);

        let mile = Length::unit("mi").unwrap();
        let fixed = FixedLength::from_i64(1, mile).unwrap();
        let float = FloatQuantity::<Length>::new(1.0, mile).unwrap();
        assert!(fixed == float);
        assert_eq!(fixed.to_f64(meters()), 1609.344);
        assert_eq!(float.to_i64(Length::unit("ft").unwrap()), 5280);
    }

    proptest! {
        #[test]
        fn prop_fixed_double_negation(nanos in (i64::MIN + 1)..=i64::MAX) {
            let q = FixedLength::from_nanos(nanos);
            prop_assert_eq!(q.checked_neg().unwrap().checked_neg().unwrap(), q);
        }

        #[test]
        fn prop_equal_quantities_hash_equal(value in -9_000_000i64..9_000_000) {
            let mm = Length::unit("mm").unwrap();
            let um = Length::unit("µm").unwrap();
            let a = FixedLength::from_i64(value, mm).unwrap();
            let b = FixedLength::from_i64(value * 1000, um).unwrap();
            prop_assert_eq!(a, b);
            prop_assert_eq!(calculate_hash_code(&a), calculate_hash_code(&b));
        }

        #[test]
        fn prop_integral_scaling_matches_multiply(value in any::<i32>(), factor in -1000i64..1000) {
            let value = value as i64;
            prop_assert_eq!(scale_exact(value, factor as f64), Ok(value * factor));
        }
    }
}
