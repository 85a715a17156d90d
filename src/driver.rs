//! MMA8451Q I2C Driver Implementation
//!
//! Core driver implementation for reading acceleration data via I2C.
//!
//! This driver is platform-agnostic and works with any
//! `embedded_hal_async::i2c::I2c` implementation. Time operations require
//! the `embassy` feature.

use crate::config::{
    DataRate, HighPassCutoff, HighPassFilter, Mma8451Config, OperationMode, ScaleRange, SystemMode,
};
use crate::registers;
use crate::traits::{AccelError, AccelReading, Accelerometer};
use embedded_hal_async::i2c::I2c;
use nalgebra::Vector3;

/// Maximum consecutive errors before marking sensor unhealthy
const MAX_CONSECUTIVE_ERRORS: u32 = 3;

/// Maximum polls of CTRL_REG2 for the soft-reset bit to clear
const RESET_POLL_LIMIT: u32 = 10;

// =============================================================================
// Time Abstraction Helpers
// =============================================================================

/// Async delay in milliseconds
///
/// Uses `embassy_time::Timer` when the `embassy` feature is enabled.
/// No-op for host tests without embassy.
#[cfg(feature = "embassy")]
async fn delay_ms(ms: u64) {
    embassy_time::Timer::after_millis(ms).await;
}

#[cfg(not(feature = "embassy"))]
async fn delay_ms(_ms: u64) {
    // No-op for host tests
}

/// Get current timestamp in microseconds
///
/// Returns actual timestamp when `embassy` feature is enabled.
/// Returns 0 for host tests without embassy.
#[cfg(feature = "embassy")]
fn timestamp_us() -> u64 {
    embassy_time::Instant::now().as_micros()
}

#[cfg(not(feature = "embassy"))]
fn timestamp_us() -> u64 {
    0 // Host test stub
}

/// MMA8451Q I2C Driver
///
/// Implements the `Accelerometer` trait for the MMA8451Q 3-axis
/// accelerometer. Samples are 14-bit; configuration covers operation mode,
/// full-scale range, output data rate, and the output high-pass filter.
///
/// Control registers other than CTRL_REG1 only accept writes in standby,
/// so every configuration setter parks the device in standby for the write
/// and returns it to active mode afterwards.
///
/// # Type Parameters
///
/// * `I2C` - Any type implementing `embedded_hal_async::i2c::I2c`
pub struct Mma8451Driver<I2C>
where
    I2C: I2c,
{
    /// I2C bus handle
    i2c: I2C,

    /// Driver configuration
    config: Mma8451Config,

    /// Accel scale factor (raw counts to m/s²), cached from the range
    accel_scale: f32,

    /// Health status
    healthy: bool,

    /// Consecutive error count
    error_count: u32,

    /// Initialization complete flag
    initialized: bool,
}

impl<I2C> Mma8451Driver<I2C>
where
    I2C: I2c,
{
    /// Create a new MMA8451Q driver (uninitialized)
    ///
    /// Call `init()` to initialize the sensor before use.
    ///
    /// # Arguments
    ///
    /// * `i2c` - I2C bus implementing `embedded_hal_async::i2c::I2c`
    /// * `config` - Driver configuration
    pub fn new(i2c: I2C, config: Mma8451Config) -> Self {
        Self {
            i2c,
            config,
            accel_scale: config.scale_range.scale_to_m_s2(),
            healthy: false,
            error_count: 0,
            initialized: false,
        }
    }

    /// Create and initialize a new MMA8451Q driver
    ///
    /// # Arguments
    ///
    /// * `i2c` - I2C bus implementing `embedded_hal_async::i2c::I2c`
    /// * `config` - Driver configuration
    ///
    /// # Returns
    ///
    /// Initialized driver or error if initialization failed
    pub async fn new_initialized(i2c: I2C, config: Mma8451Config) -> Result<Self, AccelError> {
        let mut driver = Self::new(i2c, config);
        driver.init().await?;
        Ok(driver)
    }

    /// Initialize the MMA8451Q
    ///
    /// This performs the full initialization sequence:
    /// 1. Verify WHO_AM_I
    /// 2. Soft reset and wait for completion
    /// 3. Program range, high-pass filter, and data rate (device in standby)
    /// 4. Enter active mode
    ///
    /// # Returns
    ///
    /// Ok(()) if initialization succeeded, or AccelError on failure
    pub async fn init(&mut self) -> Result<(), AccelError> {
        // Step 1: Reject addresses the part cannot respond on
        if !self.config.address_is_valid() {
            crate::log_error!(
                "MMA8451 address {:#x} is not a valid SA0 address (expected 0x1C or 0x1D)",
                self.config.address
            );
            return Err(AccelError::InvalidConfig);
        }

        // Step 2: Verify WHO_AM_I
        let whoami = self.read_register(registers::WHO_AM_I).await?;
        if whoami != registers::WHO_AM_I_VALUE {
            crate::log_error!(
                "MMA8451 WHO_AM_I mismatch: expected {:#x}, got {:#x}",
                registers::WHO_AM_I_VALUE,
                whoami
            );
            return Err(AccelError::NotInitialized);
        }
        crate::log_info!("MMA8451 detected (WHO_AM_I: {:#x})", whoami);

        // Step 3: Soft reset; the device comes back in standby with
        // power-on register defaults
        self.write_register(registers::CTRL_REG2, registers::CTRL_REG2_RST)
            .await?;
        self.wait_reset_complete().await?;

        // Step 4: Configure while still in standby
        let data_cfg = self.config.scale_range.register_value()
            | self.config.high_pass_filter.register_value();
        self.write_register(registers::XYZ_DATA_CFG, data_cfg).await?;

        self.write_register(
            registers::HP_FILTER_CUTOFF,
            self.config.high_pass_cutoff.register_value(),
        )
        .await?;

        self.write_register(registers::CTRL_REG1, self.config.data_rate.register_value())
            .await?;

        // Step 5: Enter active mode
        self.write_register(
            registers::CTRL_REG1,
            self.config.data_rate.register_value() | registers::CTRL_REG1_ACTIVE,
        )
        .await?;

        self.accel_scale = self.config.scale_range.scale_to_m_s2();
        self.initialized = true;
        self.healthy = true;
        self.error_count = 0;
        crate::log_info!("MMA8451 initialized successfully");

        Ok(())
    }

    /// Wait for the CTRL_REG2 RST bit to clear after a soft reset
    ///
    /// The device NACKs while rebooting, so read errors here mean
    /// "not done yet", not failure.
    async fn wait_reset_complete(&mut self) -> Result<(), AccelError> {
        for _ in 0..RESET_POLL_LIMIT {
            delay_ms(1).await;
            match self.read_register(registers::CTRL_REG2).await {
                Ok(value) if value & registers::CTRL_REG2_RST == 0 => return Ok(()),
                Ok(_) | Err(_) => {}
            }
        }
        crate::log_error!("MMA8451 soft reset did not complete");
        Err(AccelError::NotInitialized)
    }

    // =========================================================================
    // Register Access Helpers
    // =========================================================================

    /// Read a register from the MMA8451Q
    async fn read_register(&mut self, reg: u8) -> Result<u8, AccelError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.config.address, &[reg], &mut buf)
            .await
            .map_err(|_| {
                self.error_count += 1;
                if self.error_count >= MAX_CONSECUTIVE_ERRORS {
                    self.healthy = false;
                }
                AccelError::I2cError
            })?;
        self.error_count = 0;
        Ok(buf[0])
    }

    /// Write a register to the MMA8451Q
    async fn write_register(&mut self, reg: u8, value: u8) -> Result<(), AccelError> {
        self.i2c
            .write(self.config.address, &[reg, value])
            .await
            .map_err(|_| {
                self.error_count += 1;
                if self.error_count >= MAX_CONSECUTIVE_ERRORS {
                    self.healthy = false;
                }
                AccelError::I2cError
            })?;
        self.error_count = 0;
        Ok(())
    }

    /// Read multiple bytes from the MMA8451Q
    async fn read_bytes(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), AccelError> {
        self.i2c
            .write_read(self.config.address, &[reg], buf)
            .await
            .map_err(|_| {
                self.error_count += 1;
                if self.error_count >= MAX_CONSECUTIVE_ERRORS {
                    self.healthy = false;
                }
                AccelError::I2cError
            })?;
        self.error_count = 0;
        Ok(())
    }

    /// Read-modify-write a sub-byte register field
    async fn modify_register(&mut self, reg: u8, mask: u8, value: u8) -> Result<(), AccelError> {
        let current = self.read_register(reg).await?;
        let updated = (current & !mask) | (value & mask);
        self.write_register(reg, updated).await
    }

    /// Clear the CTRL_REG1 ACTIVE bit
    async fn enter_standby(&mut self) -> Result<(), AccelError> {
        self.modify_register(registers::CTRL_REG1, registers::CTRL_REG1_ACTIVE, 0)
            .await
    }

    /// Set the CTRL_REG1 ACTIVE bit
    async fn enter_active(&mut self) -> Result<(), AccelError> {
        self.modify_register(
            registers::CTRL_REG1,
            registers::CTRL_REG1_ACTIVE,
            registers::CTRL_REG1_ACTIVE,
        )
        .await
    }

    // =========================================================================
    // Configuration Setters
    // =========================================================================

    /// Set the operation mode (standby or active)
    pub async fn set_operation_mode(&mut self, mode: OperationMode) -> Result<(), AccelError> {
        if !self.initialized {
            return Err(AccelError::NotInitialized);
        }
        self.modify_register(
            registers::CTRL_REG1,
            registers::CTRL_REG1_ACTIVE,
            mode.register_value(),
        )
        .await
    }

    /// Set the full-scale range
    ///
    /// The device is active again when this returns, regardless of the
    /// mode it was in before.
    pub async fn set_scale_range(&mut self, range: ScaleRange) -> Result<(), AccelError> {
        if !self.initialized {
            return Err(AccelError::NotInitialized);
        }
        self.enter_standby().await?;
        self.modify_register(
            registers::XYZ_DATA_CFG,
            registers::XYZ_DATA_CFG_FS_MASK,
            range.register_value(),
        )
        .await?;
        self.enter_active().await?;

        self.config.scale_range = range;
        self.accel_scale = range.scale_to_m_s2();
        Ok(())
    }

    /// Set the output data rate
    pub async fn set_data_rate(&mut self, rate: DataRate) -> Result<(), AccelError> {
        if !self.initialized {
            return Err(AccelError::NotInitialized);
        }
        self.enter_standby().await?;
        self.modify_register(
            registers::CTRL_REG1,
            registers::CTRL_REG1_DR_MASK,
            rate.register_value(),
        )
        .await?;
        self.enter_active().await?;

        self.config.data_rate = rate;
        Ok(())
    }

    /// Enable or disable the output high-pass filter
    pub async fn set_high_pass_filter(&mut self, filter: HighPassFilter) -> Result<(), AccelError> {
        if !self.initialized {
            return Err(AccelError::NotInitialized);
        }
        self.enter_standby().await?;
        self.modify_register(
            registers::XYZ_DATA_CFG,
            registers::XYZ_DATA_CFG_HPF_OUT,
            filter.register_value(),
        )
        .await?;
        self.enter_active().await?;

        self.config.high_pass_filter = filter;
        Ok(())
    }

    /// Set the high-pass filter cutoff frequency
    ///
    /// Takes effect on the output data only while the high-pass filter
    /// is enabled.
    pub async fn set_high_pass_cutoff(&mut self, cutoff: HighPassCutoff) -> Result<(), AccelError> {
        if !self.initialized {
            return Err(AccelError::NotInitialized);
        }
        self.enter_standby().await?;
        self.modify_register(
            registers::HP_FILTER_CUTOFF,
            registers::HP_FILTER_CUTOFF_SEL_MASK,
            cutoff.register_value(),
        )
        .await?;
        self.enter_active().await?;

        self.config.high_pass_cutoff = cutoff;
        Ok(())
    }

    // =========================================================================
    // Configuration Getters (register readback)
    // =========================================================================

    /// Read the operation mode back from CTRL_REG1
    pub async fn operation_mode(&mut self) -> Result<OperationMode, AccelError> {
        let reg = self.read_register(registers::CTRL_REG1).await?;
        Ok(OperationMode::from_bits(reg))
    }

    /// Read the full-scale range back from XYZ_DATA_CFG
    pub async fn scale_range(&mut self) -> Result<ScaleRange, AccelError> {
        let reg = self.read_register(registers::XYZ_DATA_CFG).await?;
        ScaleRange::from_bits(reg).ok_or(AccelError::InvalidData)
    }

    /// Read the output data rate back from CTRL_REG1
    pub async fn data_rate(&mut self) -> Result<DataRate, AccelError> {
        let reg = self.read_register(registers::CTRL_REG1).await?;
        Ok(DataRate::from_bits(reg))
    }

    /// Read the high-pass filter setting back from XYZ_DATA_CFG
    pub async fn high_pass_filter(&mut self) -> Result<HighPassFilter, AccelError> {
        let reg = self.read_register(registers::XYZ_DATA_CFG).await?;
        Ok(HighPassFilter::from_bits(reg))
    }

    /// Read the high-pass filter cutoff back from HP_FILTER_CUTOFF
    pub async fn high_pass_cutoff(&mut self) -> Result<HighPassCutoff, AccelError> {
        let reg = self.read_register(registers::HP_FILTER_CUTOFF).await?;
        Ok(HighPassCutoff::from_bits(reg))
    }

    /// Read the system mode from SYSMOD
    ///
    /// Unlike `operation_mode()`, this reflects the auto-sleep state the
    /// device is actually in.
    pub async fn system_mode(&mut self) -> Result<SystemMode, AccelError> {
        let reg = self.read_register(registers::SYSMOD).await?;
        SystemMode::from_bits(reg).ok_or(AccelError::InvalidData)
    }

    // =========================================================================
    // Sensor Reading Methods
    // =========================================================================

    /// Read raw acceleration counts (right-justified 14-bit)
    pub async fn read_raw_counts(&mut self) -> Result<[i16; 3], AccelError> {
        if !self.initialized {
            return Err(AccelError::NotInitialized);
        }

        // Burst-read 6 bytes: OUT_X_MSB through OUT_Z_LSB
        let mut buf = [0u8; 6];
        self.read_bytes(registers::OUT_X_MSB, &mut buf).await?;

        // Samples are big-endian and left-justified; the arithmetic shift
        // keeps the sign of the 14-bit value
        Ok([
            i16::from_be_bytes([buf[0], buf[1]]) >> 2,
            i16::from_be_bytes([buf[2], buf[3]]) >> 2,
            i16::from_be_bytes([buf[4], buf[5]]) >> 2,
        ])
    }

    /// Read acceleration in m/s²
    pub async fn read_acceleration(&mut self) -> Result<Vector3<f32>, AccelError> {
        let raw = self.read_raw_counts().await?;
        Ok(self.convert_accel(raw))
    }

    /// Convert raw counts to m/s² using the cached range sensitivity
    fn convert_accel(&self, raw: [i16; 3]) -> Vector3<f32> {
        Vector3::new(raw[0] as f32, raw[1] as f32, raw[2] as f32) * self.accel_scale
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Check if the driver is initialized
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Check if the sensor is healthy
    pub fn is_healthy(&self) -> bool {
        self.initialized && self.healthy
    }

    /// Get the I2C address
    pub fn address(&self) -> u8 {
        self.config.address
    }

    /// Get the configuration
    pub fn config(&self) -> &Mma8451Config {
        &self.config
    }

    /// Release the underlying I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

// =============================================================================
// Accelerometer Trait Implementation
// =============================================================================

impl<I2C> Accelerometer for Mma8451Driver<I2C>
where
    I2C: I2c,
{
    /// Read acceleration in m/s², body frame (includes gravity)
    async fn read_accel(&mut self) -> Result<Vector3<f32>, AccelError> {
        self.read_acceleration().await
    }

    /// Read raw right-justified 14-bit axis counts
    async fn read_raw(&mut self) -> Result<[i16; 3], AccelError> {
        self.read_raw_counts().await
    }

    /// Read acceleration with a timestamp attached
    async fn reading(&mut self) -> Result<AccelReading, AccelError> {
        let accel = self.read_acceleration().await?;
        Ok(AccelReading {
            accel,
            timestamp_us: timestamp_us(),
        })
    }

    /// Get the configured output data rate in Hz
    fn sample_rate_hz(&self) -> f32 {
        self.config.data_rate.frequency_hz()
    }

    /// Get sensor health status
    fn is_healthy(&self) -> bool {
        self.initialized && self.healthy
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{I2cTransaction, MockI2c};

    /// Queue the responses `init()` consumes: WHO_AM_I, then the
    /// CTRL_REG2 poll showing the reset bit cleared
    fn queue_init_responses(i2c: &mut MockI2c) {
        i2c.queue_read_data(&[registers::WHO_AM_I_VALUE, 0x00]);
    }

    #[tokio::test]
    async fn test_init_sequence() {
        let mut i2c = MockI2c::new();
        queue_init_responses(&mut i2c);

        {
            let driver = Mma8451Driver::new_initialized(&mut i2c, Mma8451Config::default())
                .await
                .unwrap();
            assert!(driver.is_initialized());
            assert!(driver.is_healthy());
        }

        let expected = [
            // WHO_AM_I check
            I2cTransaction::WriteRead {
                addr: 0x1D,
                write_data: vec![registers::WHO_AM_I],
                read_len: 1,
            },
            // Soft reset, then poll until the bit clears
            I2cTransaction::Write {
                addr: 0x1D,
                data: vec![registers::CTRL_REG2, registers::CTRL_REG2_RST],
            },
            I2cTransaction::WriteRead {
                addr: 0x1D,
                write_data: vec![registers::CTRL_REG2],
                read_len: 1,
            },
            // Range + HPF, cutoff, data rate (standby), then active
            I2cTransaction::Write {
                addr: 0x1D,
                data: vec![registers::XYZ_DATA_CFG, 0x00],
            },
            I2cTransaction::Write {
                addr: 0x1D,
                data: vec![registers::HP_FILTER_CUTOFF, 0x00],
            },
            I2cTransaction::Write {
                addr: 0x1D,
                data: vec![registers::CTRL_REG1, 0x00],
            },
            I2cTransaction::Write {
                addr: 0x1D,
                data: vec![registers::CTRL_REG1, registers::CTRL_REG1_ACTIVE],
            },
        ];
        assert_eq!(i2c.transactions(), &expected);
    }

    #[tokio::test]
    async fn test_init_applies_configured_settings() {
        let mut i2c = MockI2c::new();
        queue_init_responses(&mut i2c);

        let config = Mma8451Config {
            scale_range: ScaleRange::G8,
            data_rate: DataRate::Hz100,
            high_pass_filter: HighPassFilter::Enabled,
            high_pass_cutoff: HighPassCutoff::Hz2,
            ..Default::default()
        };
        Mma8451Driver::new_initialized(&mut i2c, config)
            .await
            .unwrap();

        // XYZ_DATA_CFG carries FS=8g and HPF_OUT in one write
        assert!(i2c.transactions().contains(&I2cTransaction::Write {
            addr: 0x1D,
            data: vec![registers::XYZ_DATA_CFG, 0x12],
        }));
        assert!(i2c.transactions().contains(&I2cTransaction::Write {
            addr: 0x1D,
            data: vec![registers::HP_FILTER_CUTOFF, 0x03],
        }));
        // DR=100Hz written in standby, then activated
        assert!(i2c.transactions().contains(&I2cTransaction::Write {
            addr: 0x1D,
            data: vec![registers::CTRL_REG1, 0x18],
        }));
        assert!(i2c.transactions().contains(&I2cTransaction::Write {
            addr: 0x1D,
            data: vec![registers::CTRL_REG1, 0x19],
        }));
    }

    #[tokio::test]
    async fn test_init_rejects_wrong_device() {
        let mut i2c = MockI2c::new();
        i2c.queue_read_data(&[0x2A]); // not an MMA8451

        let result = Mma8451Driver::new_initialized(&mut i2c, Mma8451Config::default()).await;
        assert_eq!(result.err(), Some(AccelError::NotInitialized));

        // Nothing was written after the failed identity check
        assert_eq!(i2c.transactions().len(), 1);
    }

    #[tokio::test]
    async fn test_init_rejects_invalid_address() {
        let mut i2c = MockI2c::new();

        let config = Mma8451Config {
            address: 0x68,
            ..Default::default()
        };
        let result = Mma8451Driver::new_initialized(&mut i2c, config).await;
        assert_eq!(result.err(), Some(AccelError::InvalidConfig));

        // The bus was never touched
        assert!(i2c.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_read_before_init_fails() {
        let mut i2c = MockI2c::new();
        let mut driver = Mma8451Driver::new(&mut i2c, Mma8451Config::default());

        let result = driver.read_acceleration().await;
        assert_eq!(result.err(), Some(AccelError::NotInitialized));
    }

    #[tokio::test]
    async fn test_read_acceleration_2g() {
        let mut i2c = MockI2c::new();
        queue_init_responses(&mut i2c);
        // +1g on X (4096 counts << 2), -1g on Y, 0 on Z
        i2c.queue_read_data(&[0x40, 0x00, 0xC0, 0x00, 0x00, 0x00]);

        let mut driver = Mma8451Driver::new_initialized(&mut i2c, Mma8451Config::default())
            .await
            .unwrap();

        let accel = driver.read_acceleration().await.unwrap();
        assert!((accel.x - 9.80665).abs() < 1e-4);
        assert!((accel.y + 9.80665).abs() < 1e-4);
        assert!(accel.z.abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_read_raw_sign_extension() {
        let mut i2c = MockI2c::new();
        queue_init_responses(&mut i2c);
        // 0xFFFC = -4 counts before shift, -1 count after
        i2c.queue_read_data(&[0xFF, 0xFC, 0x00, 0x04, 0x20, 0x00]);

        let mut driver = Mma8451Driver::new_initialized(&mut i2c, Mma8451Config::default())
            .await
            .unwrap();

        let raw = driver.read_raw_counts().await.unwrap();
        assert_eq!(raw, [-1, 1, 2048]);
    }

    #[tokio::test]
    async fn test_scale_cache_tracks_range() {
        let mut i2c = MockI2c::new();
        queue_init_responses(&mut i2c);

        let config = Mma8451Config {
            scale_range: ScaleRange::G8,
            ..Default::default()
        };
        // 4096 counts at 1024 counts/g = 4g
        i2c.queue_read_data(&[0x40, 0x00, 0x00, 0x00, 0x00, 0x00]);

        let mut driver = Mma8451Driver::new_initialized(&mut i2c, config).await.unwrap();
        let accel = driver.read_acceleration().await.unwrap();
        assert!((accel.x - 4.0 * 9.80665).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_set_data_rate_standby_dance() {
        let mut i2c = MockI2c::new();
        queue_init_responses(&mut i2c);
        // Responses for the three read-modify-writes: enter_standby sees
        // the active device, the DR write sees standby, enter_active sees
        // the new rate
        i2c.queue_read_data(&[0x01, 0x00, 0x18]);

        {
            let mut driver = Mma8451Driver::new_initialized(&mut i2c, Mma8451Config::default())
                .await
                .unwrap();
            driver.set_data_rate(DataRate::Hz100).await.unwrap();
            assert_eq!(driver.config().data_rate, DataRate::Hz100);
            assert_eq!(driver.sample_rate_hz(), 100.0);
        }

        // The last three writes: deactivate, program DR, reactivate
        let writes: Vec<_> = i2c
            .transactions()
            .iter()
            .filter_map(|t| match t {
                I2cTransaction::Write { data, .. } => Some(data.clone()),
                _ => None,
            })
            .collect();
        let n = writes.len();
        assert_eq!(writes[n - 3], vec![registers::CTRL_REG1, 0x00]);
        assert_eq!(writes[n - 2], vec![registers::CTRL_REG1, 0x18]);
        assert_eq!(writes[n - 1], vec![registers::CTRL_REG1, 0x19]);
    }

    #[tokio::test]
    async fn test_set_scale_range_updates_conversion() {
        let mut i2c = MockI2c::new();
        queue_init_responses(&mut i2c);
        // enter_standby, XYZ_DATA_CFG read, enter_active
        i2c.queue_read_data(&[0x01, 0x00, 0x00]);
        // 4096 counts at 2048 counts/g = 2g
        i2c.queue_read_data(&[0x40, 0x00, 0x00, 0x00, 0x00, 0x00]);

        let mut driver = Mma8451Driver::new_initialized(&mut i2c, Mma8451Config::default())
            .await
            .unwrap();
        driver.set_scale_range(ScaleRange::G4).await.unwrap();

        let accel = driver.read_acceleration().await.unwrap();
        assert!((accel.x - 2.0 * 9.80665).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_set_operation_mode_direct_write() {
        let mut i2c = MockI2c::new();
        queue_init_responses(&mut i2c);
        i2c.queue_read_data(&[0x01]); // CTRL_REG1 readback for the RMW

        {
            let mut driver = Mma8451Driver::new_initialized(&mut i2c, Mma8451Config::default())
                .await
                .unwrap();
            driver
                .set_operation_mode(OperationMode::Standby)
                .await
                .unwrap();
        }

        // Mode change is a single RMW, no standby dance
        let last = i2c.transactions().last().unwrap();
        assert_eq!(
            *last,
            I2cTransaction::Write {
                addr: 0x1D,
                data: vec![registers::CTRL_REG1, 0x00],
            }
        );
    }

    #[tokio::test]
    async fn test_getters_decode_registers() {
        let mut i2c = MockI2c::new();
        let mut driver = Mma8451Driver::new(&mut i2c, Mma8451Config::default());

        driver.i2c.queue_read_data(&[0x19]); // CTRL_REG1: active, DR=100Hz
        assert_eq!(driver.operation_mode().await.unwrap(), OperationMode::Active);

        driver.i2c.queue_read_data(&[0x19]);
        assert_eq!(driver.data_rate().await.unwrap(), DataRate::Hz100);

        driver.i2c.queue_read_data(&[0x12]); // XYZ_DATA_CFG: HPF out, 8g
        assert_eq!(driver.scale_range().await.unwrap(), ScaleRange::G8);

        driver.i2c.queue_read_data(&[0x12]);
        assert_eq!(
            driver.high_pass_filter().await.unwrap(),
            HighPassFilter::Enabled
        );

        driver.i2c.queue_read_data(&[0x02]); // SYSMOD: sleep
        assert_eq!(driver.system_mode().await.unwrap(), SystemMode::Sleep);
    }

    #[tokio::test]
    async fn test_scale_range_reserved_pattern_is_invalid_data() {
        let mut i2c = MockI2c::new();
        let mut driver = Mma8451Driver::new(&mut i2c, Mma8451Config::default());

        driver.i2c.queue_read_data(&[0x03]); // FS = 0b11 is reserved
        assert_eq!(
            driver.scale_range().await.err(),
            Some(AccelError::InvalidData)
        );
    }

    #[tokio::test]
    async fn test_health_degrades_after_consecutive_errors() {
        let mut i2c = MockI2c::new();
        queue_init_responses(&mut i2c);

        let mut driver = Mma8451Driver::new_initialized(&mut i2c, Mma8451Config::default())
            .await
            .unwrap();
        assert!(driver.is_healthy());

        driver.i2c.inject_errors(3);
        for _ in 0..3 {
            assert!(driver.read_acceleration().await.is_err());
        }
        assert!(!driver.is_healthy());

        // Health does not recover on its own
        driver.i2c.queue_read_data(&[0x40, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert!(driver.read_acceleration().await.is_ok());
        assert!(!driver.is_healthy());
    }

    #[tokio::test]
    async fn test_two_errors_do_not_degrade_health() {
        let mut i2c = MockI2c::new();
        queue_init_responses(&mut i2c);

        let mut driver = Mma8451Driver::new_initialized(&mut i2c, Mma8451Config::default())
            .await
            .unwrap();

        driver.i2c.inject_errors(2);
        assert!(driver.read_acceleration().await.is_err());
        assert!(driver.read_acceleration().await.is_err());
        assert!(driver.is_healthy());

        // A success resets the consecutive error counter
        driver.i2c.queue_read_data(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert!(driver.read_acceleration().await.is_ok());
        assert!(driver.is_healthy());
    }

    #[tokio::test]
    async fn test_release_returns_bus() {
        let i2c = MockI2c::new();
        let driver = Mma8451Driver::new(i2c, Mma8451Config::default());
        let i2c = driver.release();
        assert!(i2c.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_accelerometer_trait_reading() {
        let mut i2c = MockI2c::new();
        queue_init_responses(&mut i2c);
        i2c.queue_read_data(&[0x40, 0x00, 0x00, 0x00, 0x00, 0x00]);

        let mut driver = Mma8451Driver::new_initialized(&mut i2c, Mma8451Config::default())
            .await
            .unwrap();

        let reading = Accelerometer::reading(&mut driver).await.unwrap();
        assert!((reading.accel.x - 9.80665).abs() < 1e-4);
        // No clock on the host
        assert_eq!(reading.timestamp_us, 0);
    }
}
