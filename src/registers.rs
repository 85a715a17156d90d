//! MMA8451Q Register Definitions
//!
//! Based on the NXP MMA8451Q data sheet (rev 10).

#![allow(dead_code)]

// ============================================================================
// MMA8451Q I2C Address
// ============================================================================

/// MMA8451Q I2C address when SA0 pin is high (default on most breakouts)
pub const MMA8451_ADDR: u8 = 0x1D;

/// MMA8451Q I2C address when SA0 pin is low
pub const MMA8451_ADDR_ALT: u8 = 0x1C;

// ============================================================================
// MMA8451Q Registers
// ============================================================================

/// Data status register (data-ready and overwrite flags)
pub const STATUS: u8 = 0x00;

/// Acceleration measurements (high byte first, 14-bit left-justified)
pub const OUT_X_MSB: u8 = 0x01;
pub const OUT_X_LSB: u8 = 0x02;
pub const OUT_Y_MSB: u8 = 0x03;
pub const OUT_Y_LSB: u8 = 0x04;
pub const OUT_Z_MSB: u8 = 0x05;
pub const OUT_Z_LSB: u8 = 0x06;

/// FIFO setup
pub const F_SETUP: u8 = 0x09;

/// FIFO trigger configuration
pub const TRIG_CFG: u8 = 0x0A;

/// System mode register (standby / wake / sleep)
pub const SYSMOD: u8 = 0x0B;

/// Interrupt source register
pub const INT_SOURCE: u8 = 0x0C;

/// Device ID (should read 0x1A)
pub const WHO_AM_I: u8 = 0x0D;

/// Data configuration (full-scale range, high-pass filter output)
pub const XYZ_DATA_CFG: u8 = 0x0E;

/// High-pass filter cutoff selection
pub const HP_FILTER_CUTOFF: u8 = 0x0F;

/// Portrait/landscape status
pub const PL_STATUS: u8 = 0x10;

/// Portrait/landscape configuration
pub const PL_CFG: u8 = 0x11;

/// Control register 1 (active mode, fast read, data rate)
pub const CTRL_REG1: u8 = 0x2A;

/// Control register 2 (self-test, reset, oversampling modes)
pub const CTRL_REG2: u8 = 0x2B;

/// Control register 3 (wake interrupts, polarity)
pub const CTRL_REG3: u8 = 0x2C;

/// Control register 4 (interrupt enable)
pub const CTRL_REG4: u8 = 0x2D;

/// Control register 5 (interrupt routing)
pub const CTRL_REG5: u8 = 0x2E;

/// User offset correction registers
pub const OFF_X: u8 = 0x2F;
pub const OFF_Y: u8 = 0x30;
pub const OFF_Z: u8 = 0x31;

// ============================================================================
// MMA8451Q Register Values
// ============================================================================

/// WHO_AM_I expected value
pub const WHO_AM_I_VALUE: u8 = 0x1A;

/// CTRL_REG1 bits
pub const CTRL_REG1_ACTIVE: u8 = 0x01;
pub const CTRL_REG1_F_READ: u8 = 0x02;
pub const CTRL_REG1_LNOISE: u8 = 0x04;

/// CTRL_REG1 output data rate field DR[2:0] (bits 5:3)
pub const CTRL_REG1_DR_MASK: u8 = 0x38;
pub const CTRL_REG1_DR_SHIFT: u8 = 3;

/// CTRL_REG2 bits
pub const CTRL_REG2_RST: u8 = 0x40;
pub const CTRL_REG2_ST: u8 = 0x80;

/// XYZ_DATA_CFG full-scale field FS[1:0] (bits 1:0)
pub const XYZ_DATA_CFG_FS_MASK: u8 = 0x03;

/// XYZ_DATA_CFG high-pass filter output enable (bit 4)
pub const XYZ_DATA_CFG_HPF_OUT: u8 = 0x10;

/// HP_FILTER_CUTOFF cutoff selection field SEL[1:0] (bits 1:0)
pub const HP_FILTER_CUTOFF_SEL_MASK: u8 = 0x03;

/// SYSMOD system mode values
pub const SYSMOD_STANDBY: u8 = 0x00;
pub const SYSMOD_WAKE: u8 = 0x01;
pub const SYSMOD_SLEEP: u8 = 0x02;

// ============================================================================
// Full Scale Range
// ============================================================================

/// Full-scale range bits (XYZ_DATA_CFG[1:0])
pub const FS_2G: u8 = 0x00;
pub const FS_4G: u8 = 0x01;
pub const FS_8G: u8 = 0x02;

// ============================================================================
// Output Data Rate
// ============================================================================

/// Data rate bits (CTRL_REG1[5:3], pre-shifted)
pub const DR_800HZ: u8 = 0x00;
pub const DR_400HZ: u8 = 0x08;
pub const DR_200HZ: u8 = 0x10;
pub const DR_100HZ: u8 = 0x18;
pub const DR_50HZ: u8 = 0x20;
pub const DR_12_5HZ: u8 = 0x28;
pub const DR_6_25HZ: u8 = 0x30;
pub const DR_1_56HZ: u8 = 0x38;

// ============================================================================
// High-Pass Filter Cutoff
// ============================================================================

/// Cutoff selection bits (HP_FILTER_CUTOFF[1:0]); nominal frequency at
/// 800 Hz output data rate
pub const CUTOFF_16HZ: u8 = 0x00;
pub const CUTOFF_8HZ: u8 = 0x01;
pub const CUTOFF_4HZ: u8 = 0x02;
pub const CUTOFF_2HZ: u8 = 0x03;

// ============================================================================
// Scaling Constants
// ============================================================================

/// Accelerometer sensitivity (counts/g) for each range, 14-bit samples
pub const ACCEL_SENSITIVITY_2G: f32 = 4096.0;
pub const ACCEL_SENSITIVITY_4G: f32 = 2048.0;
pub const ACCEL_SENSITIVITY_8G: f32 = 1024.0;

/// Gravity constant (m/s²)
pub const GRAVITY: f32 = 9.80665;
