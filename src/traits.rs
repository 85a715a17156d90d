//! Accelerometer Trait and Data Types
//!
//! Device-independent interface for 3-axis accelerometers, to be consumed
//! by attitude estimation, vibration monitoring, or application code
//! without tying it to a specific part.

use core::fmt;
use nalgebra::Vector3;

/// Accelerometer error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum AccelError {
    /// I2C communication failed
    I2cError,

    /// Register contents failed validation (e.g., reserved bit pattern)
    InvalidData,

    /// Driver not initialized or wrong device on the bus
    NotInitialized,

    /// Invalid driver configuration (e.g., impossible I2C address)
    InvalidConfig,
}

impl fmt::Display for AccelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccelError::I2cError => write!(f, "I2C communication error"),
            AccelError::InvalidData => write!(f, "invalid register data"),
            AccelError::NotInitialized => write!(f, "driver not initialized"),
            AccelError::InvalidConfig => write!(f, "invalid configuration"),
        }
    }
}

/// Timestamped accelerometer reading
///
/// Acceleration is in m/s² in the sensor body frame and includes gravity.
#[derive(Debug, Clone, Copy)]
pub struct AccelReading {
    /// Acceleration: m/s², body frame
    pub accel: Vector3<f32>,

    /// Timestamp: microseconds since boot (0 on hosts without a clock)
    pub timestamp_us: u64,
}

impl Default for AccelReading {
    fn default() -> Self {
        Self {
            accel: Vector3::new(0.0, 0.0, 9.80665), // 1g up through +Z at rest
            timestamp_us: 0,
        }
    }
}

/// Device-independent accelerometer interface
///
/// This trait abstracts sensor hardware specifics, enabling:
/// - Testability with mock implementations
/// - Sensor independence for consumers
/// - Future sensor upgrades without application changes
#[allow(async_fn_in_trait)]
pub trait Accelerometer {
    /// Read acceleration in m/s², body frame (includes gravity)
    async fn read_accel(&mut self) -> Result<Vector3<f32>, AccelError>;

    /// Read raw right-justified axis counts
    async fn read_raw(&mut self) -> Result<[i16; 3], AccelError>;

    /// Read acceleration with a timestamp attached
    async fn reading(&mut self) -> Result<AccelReading, AccelError>;

    /// Get the configured output data rate in Hz
    fn sample_rate_hz(&self) -> f32;

    /// Check if the sensor is healthy
    ///
    /// Returns `false` after repeated communication errors.
    fn is_healthy(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock Accelerometer implementation for testing
    struct MockAccel {
        accel: Vector3<f32>,
        raw: [i16; 3],
        sample_rate: f32,
        healthy: bool,
    }

    impl MockAccel {
        fn new() -> Self {
            Self {
                accel: Vector3::new(0.0, 0.0, 9.80665),
                raw: [0, 0, 4096],
                sample_rate: 800.0,
                healthy: true,
            }
        }

        fn set_unhealthy(&mut self) {
            self.healthy = false;
        }
    }

    impl Accelerometer for MockAccel {
        async fn read_accel(&mut self) -> Result<Vector3<f32>, AccelError> {
            if self.healthy {
                Ok(self.accel)
            } else {
                Err(AccelError::I2cError)
            }
        }

        async fn read_raw(&mut self) -> Result<[i16; 3], AccelError> {
            if self.healthy {
                Ok(self.raw)
            } else {
                Err(AccelError::I2cError)
            }
        }

        async fn reading(&mut self) -> Result<AccelReading, AccelError> {
            let accel = self.read_accel().await?;
            Ok(AccelReading {
                accel,
                timestamp_us: 0,
            })
        }

        fn sample_rate_hz(&self) -> f32 {
            self.sample_rate
        }

        fn is_healthy(&self) -> bool {
            self.healthy
        }
    }

    /// Simple blocking executor for async tests (no external deps)
    fn block_on<F: core::future::Future>(fut: F) -> F::Output {
        use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                dummy_raw_waker()
            }
            const VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(core::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut fut = core::pin::pin!(fut);

        loop {
            match fut.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => continue,
            }
        }
    }

    #[test]
    fn test_accel_reading_default() {
        let reading = AccelReading::default();
        assert!((reading.accel.z - 9.80665).abs() < 0.001);
        assert_eq!(reading.timestamp_us, 0);
    }

    #[test]
    fn test_error_display() {
        let mut buf = String::new();
        use core::fmt::Write;
        write!(buf, "{}", AccelError::I2cError).unwrap();
        assert_eq!(buf, "I2C communication error");
    }

    #[test]
    fn test_mock_accel_read() {
        let mut accel = MockAccel::new();
        let result = block_on(accel.read_accel());
        assert!(result.is_ok());
        assert!((result.unwrap().z - 9.80665).abs() < 0.001);
    }

    #[test]
    fn test_mock_accel_raw() {
        let mut accel = MockAccel::new();
        let raw = block_on(accel.read_raw()).unwrap();
        assert_eq!(raw, [0, 0, 4096]);
    }

    #[test]
    fn test_mock_accel_unhealthy() {
        let mut accel = MockAccel::new();
        assert!(accel.is_healthy());

        accel.set_unhealthy();
        assert!(!accel.is_healthy());

        let result = block_on(accel.read_accel());
        assert_eq!(result.unwrap_err(), AccelError::I2cError);
    }

    #[test]
    fn test_mock_accel_sample_rate() {
        let accel = MockAccel::new();
        assert_eq!(accel.sample_rate_hz(), 800.0);
    }
}
