//! MMA8451Q Configuration
//!
//! Typed configuration for operation mode, full-scale range, output data
//! rate, and the high-pass filter. Each enum maps to the corresponding
//! register bit-field and decodes back from raw register reads.

use crate::registers;

/// Operation mode (CTRL_REG1 ACTIVE bit)
///
/// Control registers other than CTRL_REG1 itself only accept writes while
/// the device is in standby. The driver handles that transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum OperationMode {
    /// Standby: no measurements, configuration writes allowed
    #[default]
    Standby,
    /// Active: measurements running at the configured data rate
    Active,
}

impl OperationMode {
    /// Get the CTRL_REG1 ACTIVE bit for this mode
    pub fn register_value(self) -> u8 {
        match self {
            OperationMode::Standby => 0x00,
            OperationMode::Active => registers::CTRL_REG1_ACTIVE,
        }
    }

    /// Decode from the CTRL_REG1 ACTIVE bit
    pub fn from_bits(bits: u8) -> Self {
        if bits & registers::CTRL_REG1_ACTIVE != 0 {
            OperationMode::Active
        } else {
            OperationMode::Standby
        }
    }
}

/// Full-scale range (XYZ_DATA_CFG FS[1:0])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum ScaleRange {
    /// ±2 g (power-on default)
    #[default]
    G2,
    /// ±4 g
    G4,
    /// ±8 g
    G8,
}

impl ScaleRange {
    /// Get the register value for this range
    pub fn register_value(self) -> u8 {
        match self {
            ScaleRange::G2 => registers::FS_2G,
            ScaleRange::G4 => registers::FS_4G,
            ScaleRange::G8 => registers::FS_8G,
        }
    }

    /// Decode from XYZ_DATA_CFG FS bits; FS = 0b11 is reserved
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits & registers::XYZ_DATA_CFG_FS_MASK {
            registers::FS_2G => Some(ScaleRange::G2),
            registers::FS_4G => Some(ScaleRange::G4),
            registers::FS_8G => Some(ScaleRange::G8),
            _ => None,
        }
    }

    /// Get the sensitivity (counts per g) for this range
    pub fn sensitivity(self) -> f32 {
        match self {
            ScaleRange::G2 => registers::ACCEL_SENSITIVITY_2G,
            ScaleRange::G4 => registers::ACCEL_SENSITIVITY_4G,
            ScaleRange::G8 => registers::ACCEL_SENSITIVITY_8G,
        }
    }

    /// Get scale factor to convert raw counts to m/s²
    pub fn scale_to_m_s2(self) -> f32 {
        registers::GRAVITY / self.sensitivity()
    }
}

/// Output data rate (CTRL_REG1 DR[2:0])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum DataRate {
    /// 800 Hz (power-on default)
    #[default]
    Hz800,
    /// 400 Hz
    Hz400,
    /// 200 Hz
    Hz200,
    /// 100 Hz
    Hz100,
    /// 50 Hz
    Hz50,
    /// 12.5 Hz
    Hz12_5,
    /// 6.25 Hz
    Hz6_25,
    /// 1.56 Hz
    Hz1_56,
}

impl DataRate {
    /// Get the register value for this rate (pre-shifted into DR[2:0])
    pub fn register_value(self) -> u8 {
        match self {
            DataRate::Hz800 => registers::DR_800HZ,
            DataRate::Hz400 => registers::DR_400HZ,
            DataRate::Hz200 => registers::DR_200HZ,
            DataRate::Hz100 => registers::DR_100HZ,
            DataRate::Hz50 => registers::DR_50HZ,
            DataRate::Hz12_5 => registers::DR_12_5HZ,
            DataRate::Hz6_25 => registers::DR_6_25HZ,
            DataRate::Hz1_56 => registers::DR_1_56HZ,
        }
    }

    /// Decode from the CTRL_REG1 DR field
    pub fn from_bits(bits: u8) -> Self {
        match bits & registers::CTRL_REG1_DR_MASK {
            registers::DR_800HZ => DataRate::Hz800,
            registers::DR_400HZ => DataRate::Hz400,
            registers::DR_200HZ => DataRate::Hz200,
            registers::DR_100HZ => DataRate::Hz100,
            registers::DR_50HZ => DataRate::Hz50,
            registers::DR_12_5HZ => DataRate::Hz12_5,
            registers::DR_6_25HZ => DataRate::Hz6_25,
            _ => DataRate::Hz1_56,
        }
    }

    /// Get the output data rate in Hz
    pub fn frequency_hz(self) -> f32 {
        match self {
            DataRate::Hz800 => 800.0,
            DataRate::Hz400 => 400.0,
            DataRate::Hz200 => 200.0,
            DataRate::Hz100 => 100.0,
            DataRate::Hz50 => 50.0,
            DataRate::Hz12_5 => 12.5,
            DataRate::Hz6_25 => 6.25,
            DataRate::Hz1_56 => 1.56,
        }
    }
}

/// High-pass filter output routing (XYZ_DATA_CFG HPF_OUT bit)
///
/// When enabled, OUT_X/Y/Z deliver high-pass filtered data, removing the
/// gravity offset and slow-changing acceleration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum HighPassFilter {
    /// Unfiltered output data (power-on default)
    #[default]
    Disabled,
    /// High-pass filtered output data
    Enabled,
}

impl HighPassFilter {
    /// Get the XYZ_DATA_CFG HPF_OUT bit for this setting
    pub fn register_value(self) -> u8 {
        match self {
            HighPassFilter::Disabled => 0x00,
            HighPassFilter::Enabled => registers::XYZ_DATA_CFG_HPF_OUT,
        }
    }

    /// Decode from the XYZ_DATA_CFG HPF_OUT bit
    pub fn from_bits(bits: u8) -> Self {
        if bits & registers::XYZ_DATA_CFG_HPF_OUT != 0 {
            HighPassFilter::Enabled
        } else {
            HighPassFilter::Disabled
        }
    }
}

/// High-pass filter cutoff frequency (HP_FILTER_CUTOFF SEL[1:0])
///
/// Variants name the nominal cutoff at 800 Hz output data rate; the actual
/// cutoff scales down with the data rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum HighPassCutoff {
    /// 16 Hz at 800 Hz ODR (power-on default)
    #[default]
    Hz16,
    /// 8 Hz at 800 Hz ODR
    Hz8,
    /// 4 Hz at 800 Hz ODR
    Hz4,
    /// 2 Hz at 800 Hz ODR
    Hz2,
}

impl HighPassCutoff {
    /// Get the register value for this cutoff
    pub fn register_value(self) -> u8 {
        match self {
            HighPassCutoff::Hz16 => registers::CUTOFF_16HZ,
            HighPassCutoff::Hz8 => registers::CUTOFF_8HZ,
            HighPassCutoff::Hz4 => registers::CUTOFF_4HZ,
            HighPassCutoff::Hz2 => registers::CUTOFF_2HZ,
        }
    }

    /// Decode from the HP_FILTER_CUTOFF SEL field
    pub fn from_bits(bits: u8) -> Self {
        match bits & registers::HP_FILTER_CUTOFF_SEL_MASK {
            registers::CUTOFF_16HZ => HighPassCutoff::Hz16,
            registers::CUTOFF_8HZ => HighPassCutoff::Hz8,
            registers::CUTOFF_4HZ => HighPassCutoff::Hz4,
            _ => HighPassCutoff::Hz2,
        }
    }
}

/// System mode as reported by the SYSMOD register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum SystemMode {
    /// Standby
    Standby,
    /// Wake (active measurements)
    Wake,
    /// Sleep (auto-sleep low-power state)
    Sleep,
}

impl SystemMode {
    /// Decode from the SYSMOD register
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0x03 {
            registers::SYSMOD_STANDBY => Some(SystemMode::Standby),
            registers::SYSMOD_WAKE => Some(SystemMode::Wake),
            registers::SYSMOD_SLEEP => Some(SystemMode::Sleep),
            _ => None,
        }
    }
}

/// MMA8451Q driver configuration
#[derive(Debug, Clone, Copy)]
pub struct Mma8451Config {
    /// I2C address (0x1D when SA0 is high, 0x1C when low)
    pub address: u8,

    /// Full-scale range
    pub scale_range: ScaleRange,

    /// Output data rate
    pub data_rate: DataRate,

    /// High-pass filter output routing
    pub high_pass_filter: HighPassFilter,

    /// High-pass filter cutoff
    pub high_pass_cutoff: HighPassCutoff,
}

impl Default for Mma8451Config {
    fn default() -> Self {
        Self {
            address: registers::MMA8451_ADDR,
            scale_range: ScaleRange::G2,
            data_rate: DataRate::Hz800,
            high_pass_filter: HighPassFilter::Disabled,
            high_pass_cutoff: HighPassCutoff::Hz16,
        }
    }
}

impl Mma8451Config {
    /// Check that the configured I2C address is one the part can respond on
    pub fn address_is_valid(&self) -> bool {
        self.address == registers::MMA8451_ADDR || self.address == registers::MMA8451_ADDR_ALT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_range_sensitivity() {
        assert_eq!(ScaleRange::G2.sensitivity(), 4096.0);
        assert_eq!(ScaleRange::G4.sensitivity(), 2048.0);
        assert_eq!(ScaleRange::G8.sensitivity(), 1024.0);
    }

    #[test]
    fn test_scale_range_conversion() {
        let scale = ScaleRange::G2.scale_to_m_s2();
        // ±2g at 4096 counts/g
        let expected = 9.80665 / 4096.0;
        assert!((scale - expected).abs() < 1e-9);
    }

    #[test]
    fn test_scale_range_reserved_bits() {
        assert_eq!(ScaleRange::from_bits(0b00), Some(ScaleRange::G2));
        assert_eq!(ScaleRange::from_bits(0b10), Some(ScaleRange::G8));
        // FS = 0b11 is reserved
        assert_eq!(ScaleRange::from_bits(0b11), None);
    }

    #[test]
    fn test_data_rate_register_values() {
        assert_eq!(DataRate::Hz800.register_value(), 0x00);
        assert_eq!(DataRate::Hz100.register_value(), 0x18);
        assert_eq!(DataRate::Hz1_56.register_value(), 0x38);
    }

    #[test]
    fn test_data_rate_decode_ignores_other_bits() {
        // ACTIVE and LNOISE bits set alongside DR = 100 Hz
        let reg = 0x18 | 0x01 | 0x04;
        assert_eq!(DataRate::from_bits(reg), DataRate::Hz100);
    }

    #[test]
    fn test_operation_mode_decode() {
        assert_eq!(OperationMode::from_bits(0x00), OperationMode::Standby);
        assert_eq!(OperationMode::from_bits(0x39), OperationMode::Active);
    }

    #[test]
    fn test_high_pass_cutoff_register_values() {
        assert_eq!(HighPassCutoff::Hz16.register_value(), 0x00);
        assert_eq!(HighPassCutoff::Hz2.register_value(), 0x03);
    }

    #[test]
    fn test_system_mode_decode() {
        assert_eq!(SystemMode::from_bits(0x00), Some(SystemMode::Standby));
        assert_eq!(SystemMode::from_bits(0x01), Some(SystemMode::Wake));
        assert_eq!(SystemMode::from_bits(0x02), Some(SystemMode::Sleep));
        assert_eq!(SystemMode::from_bits(0x03), None);
    }

    #[test]
    fn test_config_default() {
        let config = Mma8451Config::default();
        assert_eq!(config.address, 0x1D);
        assert_eq!(config.scale_range, ScaleRange::G2);
        assert_eq!(config.data_rate, DataRate::Hz800);
        assert_eq!(config.high_pass_filter, HighPassFilter::Disabled);
        assert!(config.address_is_valid());
    }

    #[test]
    fn test_config_address_validation() {
        let mut config = Mma8451Config::default();
        config.address = 0x1C;
        assert!(config.address_is_valid());

        config.address = 0x68;
        assert!(!config.address_is_valid());
    }
}
