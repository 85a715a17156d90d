//! Public API smoke test
//!
//! Exercises the crate surface a downstream consumer sees, without any
//! hardware attached.

use mma8451::{
    AccelError, AccelReading, Accelerometer, DataRate, HighPassCutoff, HighPassFilter,
    Mma8451Config, Mma8451Driver, OperationMode, ScaleRange,
};

/// Stub I2C bus that satisfies the trait bound
///
/// Never performs a transaction; only needed for type instantiation.
struct StubI2c;

impl embedded_hal_async::i2c::ErrorType for StubI2c {
    type Error = embedded_hal_async::i2c::ErrorKind;
}

impl embedded_hal_async::i2c::I2c for StubI2c {
    async fn transaction(
        &mut self,
        _address: u8,
        _operations: &mut [embedded_hal_async::i2c::Operation<'_>],
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[test]
fn default_config_matches_power_on_state() {
    let config = Mma8451Config::default();
    assert_eq!(config.address, 0x1D);
    assert_eq!(config.scale_range, ScaleRange::G2);
    assert_eq!(config.data_rate, DataRate::Hz800);
    assert_eq!(config.high_pass_filter, HighPassFilter::Disabled);
    assert_eq!(config.high_pass_cutoff, HighPassCutoff::Hz16);
}

#[test]
fn uninitialized_driver_reports_state() {
    let driver = Mma8451Driver::new(StubI2c, Mma8451Config::default());
    assert!(!driver.is_initialized());
    assert!(!driver.is_healthy());
    assert_eq!(driver.address(), 0x1D);
    assert_eq!(Accelerometer::sample_rate_hz(&driver), 800.0);
}

#[test]
fn driver_releases_bus() {
    let driver = Mma8451Driver::new(StubI2c, Mma8451Config::default());
    let _i2c: StubI2c = driver.release();
}

#[tokio::test]
async fn reads_require_initialization() {
    let mut driver = Mma8451Driver::new(StubI2c, Mma8451Config::default());
    assert_eq!(
        driver.read_acceleration().await.err(),
        Some(AccelError::NotInitialized)
    );
    assert_eq!(
        driver.set_operation_mode(OperationMode::Standby).await.err(),
        Some(AccelError::NotInitialized)
    );
}

#[test]
fn reading_default_is_one_g() {
    let reading = AccelReading::default();
    assert!((reading.accel.norm() - 9.80665).abs() < 1e-3);
}

#[test]
fn errors_format_for_humans() {
    assert_eq!(
        format!("{}", AccelError::I2cError),
        "I2C communication error"
    );
    assert_eq!(format!("{}", AccelError::InvalidConfig), "invalid configuration");
}
