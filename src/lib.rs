#![cfg_attr(not(test), no_std)]

//! mma8451 - Async I2C driver for the NXP MMA8451Q 3-axis accelerometer
//!
//! This library provides a platform-independent driver built on
//! `embedded_hal_async::i2c::I2c`, typed register configuration, and a
//! device-independent accelerometer trait for higher-level consumers.

#[cfg(all(feature = "mock", not(test)))]
extern crate std;

// Register map and bit-field constants
pub mod registers;

// Typed sensor configuration
pub mod config;

// Device-independent accelerometer interface
pub mod traits;

// MMA8451Q driver
pub mod driver;

// Logging abstraction (defmt / USB Serial / host)
pub mod logging;

// Mock I2C bus for host testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use config::{
    DataRate, HighPassCutoff, HighPassFilter, Mma8451Config, OperationMode, ScaleRange, SystemMode,
};
pub use driver::Mma8451Driver;
pub use traits::{AccelError, AccelReading, Accelerometer};

#[cfg(any(test, feature = "mock"))]
pub use mock::{I2cTransaction, MockI2c};
