// ============================================================================
// Basic Usage Example
// ============================================================================

use exact_quantity::domain::calculate_hash_code;
use exact_quantity::prelude::*;

fn main() -> Result<(), NumericError> {
    #[cfg(feature = "logging")]
    let _ = exact_quantity::utils::init_logging(tracing::Level::DEBUG);

    println!("=== Exact Quantity Example ===\n");

    let meters = Length::canonical_unit();
    let km = Length::unit("km").ok_or(NumericError::InvalidArgument)?;
    let mile = Length::unit("mi").ok_or(NumericError::InvalidArgument)?;
    let hour = Time::unit("h").ok_or(NumericError::InvalidArgument)?;

    // Fixed-point lengths are exact nanometer counts
    println!("Lengths:");
    let marathon = FixedLength::from_i64(42_195, meters)?;
    println!("  marathon          = {}", marathon);
    println!("  in km             = {}", marathon.to_f64(km));
    println!("  in miles (round)  = {}", marathon.round_to_i64(mile));

    let one_mile = FixedLength::from_i64(1, mile)?;
    println!("  1 mi              = {} (nanos = {})", one_mile, one_mile.nanos());

    // Speed from distance over time, then acceleration over another hour
    println!("\nRates:");
    let trip = FixedLength::from_i64(12_960, km)?;
    let one_hour = FixedTime::from_i64(1, hour)?;
    let speed = FixedSpeed::per(&trip, &one_hour)?;
    println!("  {} over 1 h   = {}", trip, speed);

    let acceleration = FixedAcceleration::per(&speed, &one_hour)?;
    println!("  after 1 h         = {}", acceleration);

    // Cross-representation equality and hashing
    println!("\nEquality:");
    let fixed = FixedLength::from_i64(1000, Length::unit("mm").ok_or(NumericError::InvalidArgument)?)?;
    let float = FloatQuantity::<Length>::new(1.0, meters)?;
    println!("  1000 mm == 1.0 m  : {}", fixed == float);
    println!(
        "  same hash         : {}",
        calculate_hash_code(&fixed) == calculate_hash_code(&float)
    );

    // Exact scaling vs float
    println!("\nExact scaling:");
    let count = 123_456_789_123_456_789i64;
    println!("  scale_exact({}, 0.1)  = {}", count, scale_exact(count, 0.1)?);
    println!("  f64 path              = {}", (count as f64 * 0.1) as i64);
    println!("  descale_exact(10, 0.3) = {}", descale_exact(10, 0.3)?);

    // Overflow is reported, never wrapped
    println!("\nOverflow:");
    match FixedLength::MAX.checked_add(&marathon) {
        Ok(sum) => println!("  unexpected sum {}", sum),
        Err(err) => println!("  MAX + marathon -> {}", err),
    }

    Ok(())
}
