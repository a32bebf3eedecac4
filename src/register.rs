//! DS75 register map and configuration bitfield.
//!
//! ```text
//! CONFIG: | 7 | R1 R0 | F1 F0 | POL | TM | SD |
//! ```

/// Fixed part of the 7-bit bus address, the low 3 bits come from A2..A0.
pub const DS75_I2CADDR_BASE: u8 = 0b100_1000;
/// Mask of the address pins part.
pub const DS75_SUB_ADDRESS_MSK: u8 = 0b111;

pub const DS75_TEMP_ADDR: u8 = 0x00; // R   Temperature (16 bits)
pub const DS75_CONFIG_ADDR: u8 = 0x01; // R/W Configuration (8 bits)
pub const DS75_THYST_ADDR: u8 = 0x02; // R/W Hysteresis threshold (16 bits)
pub const DS75_TOS_ADDR: u8 = 0x03; // R/W Over-temperature threshold (16 bits)

const DS75_RESOLUTION_MSK: u8 = 0b0110_0000;
const DS75_RESOLUTION_POS: u8 = 5;
const DS75_FAULT_QUEUE_MSK: u8 = 0b0001_1000;
const DS75_FAULT_QUEUE_POS: u8 = 3;
const DS75_POLARITY_MSK: u8 = 0b0000_0100;
const DS75_POLARITY_POS: u8 = 2;
const DS75_THERMOSTAT_MODE_MSK: u8 = 0b0000_0010;
const DS75_THERMOSTAT_MODE_POS: u8 = 1;
const DS75_SHUTDOWN_MSK: u8 = 0b0000_0001;
const DS75_SHUTDOWN_POS: u8 = 0;

macro_rules! set_bits {
    ($reg_data:expr, $mask:expr, $pos:expr, $data:expr) => {
        ($reg_data & !$mask) | (($data << $pos) & $mask)
    };
}

macro_rules! get_bits {
    ($reg_data:expr, $mask:expr, $pos:expr) => {
        ($reg_data & $mask) >> $pos
    };
}

/// Compose the 7-bit bus address from the A2..A0 pin strapping.
///
/// Values wider than 3 bits are masked, not rejected.
pub const fn device_address(sub_address: u8) -> u8 {
    DS75_I2CADDR_BASE | (sub_address & DS75_SUB_ADDRESS_MSK)
}

/// DS75 registers.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Temperature, read-only, 16 bits.
    Temperature = DS75_TEMP_ADDR,
    /// Configuration, 8 bits.
    Config = DS75_CONFIG_ADDR,
    /// T_HYST, 16 bits.
    Hysteresis = DS75_THYST_ADDR,
    /// T_OS, 16 bits.
    OverTemperature = DS75_TOS_ADDR,
}

impl Register {
    #[inline]
    pub fn addr(self) -> u8 {
        self as u8
    }
}

/// Sub-fields of the configuration register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Resolution,
    FaultTolerance,
    Polarity,
    ThermostatMode,
    Shutdown,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Resolution,
        Field::FaultTolerance,
        Field::Polarity,
        Field::ThermostatMode,
        Field::Shutdown,
    ];

    pub fn mask(self) -> u8 {
        match self {
            Field::Resolution => DS75_RESOLUTION_MSK,
            Field::FaultTolerance => DS75_FAULT_QUEUE_MSK,
            Field::Polarity => DS75_POLARITY_MSK,
            Field::ThermostatMode => DS75_THERMOSTAT_MODE_MSK,
            Field::Shutdown => DS75_SHUTDOWN_MSK,
        }
    }

    pub fn shift(self) -> u8 {
        match self {
            Field::Resolution => DS75_RESOLUTION_POS,
            Field::FaultTolerance => DS75_FAULT_QUEUE_POS,
            Field::Polarity => DS75_POLARITY_POS,
            Field::ThermostatMode => DS75_THERMOSTAT_MODE_POS,
            Field::Shutdown => DS75_SHUTDOWN_POS,
        }
    }

    /// Largest raw value the field can hold.
    pub fn max_value(self) -> u8 {
        self.mask() >> self.shift()
    }

    pub fn get(self, reg: u8) -> u8 {
        get_bits!(reg, self.mask(), self.shift())
    }
}

/// Replace one sub-field of a configuration byte.
///
/// Only the bits under `field.mask()` change, extra bits of `value` are dropped.
#[inline]
pub fn set_field(prior: u8, field: Field, value: u8) -> u8 {
    set_bits!(prior, field.mask(), field.shift(), value)
}

/// Thermometer conversion resolution.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 0.5C
    Nine = 0b00,
    /// 0.25C
    Ten = 0b01,
    /// 0.125C
    Eleven = 0b10,
    /// 0.0625C
    Twelve = 0b11,
}

impl Resolution {
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            9 => Some(Resolution::Nine),
            10 => Some(Resolution::Ten),
            11 => Some(Resolution::Eleven),
            12 => Some(Resolution::Twelve),
            _ => None,
        }
    }

    pub fn bits(&self) -> u8 {
        *self as u8 + 9
    }

    /// Max conversion time from the datasheet.
    pub fn conversion_time_ms(&self) -> u16 {
        match self {
            Resolution::Nine => 150,
            Resolution::Ten => 300,
            Resolution::Eleven => 600,
            Resolution::Twelve => 1200,
        }
    }

    fn from_field(raw: u8) -> Self {
        match raw & 0b11 {
            0b00 => Resolution::Nine,
            0b01 => Resolution::Ten,
            0b10 => Resolution::Eleven,
            _ => Resolution::Twelve,
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::Nine
    }
}

/// Number of consecutive out-of-limit conversions before OS trips.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultTolerance {
    One = 0b00,
    Two = 0b01,
    Four = 0b10,
    Six = 0b11,
}

impl FaultTolerance {
    pub fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(FaultTolerance::One),
            1 => Some(FaultTolerance::Two),
            2 => Some(FaultTolerance::Four),
            3 => Some(FaultTolerance::Six),
            _ => None,
        }
    }

    pub fn count(&self) -> u8 {
        match self {
            FaultTolerance::One => 1,
            FaultTolerance::Two => 2,
            FaultTolerance::Four => 4,
            FaultTolerance::Six => 6,
        }
    }
}

impl Default for FaultTolerance {
    fn default() -> Self {
        FaultTolerance::One
    }
}

/// Active level of the OS output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    ActiveLow,
    ActiveHigh,
}

impl Default for Polarity {
    fn default() -> Self {
        Polarity::ActiveLow
    }
}

/// OS output behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThermostatMode {
    /// OS follows the temperature, with T_HYST as the release point.
    Comparator,
    /// OS latches until any register is read.
    Interrupt,
}

impl Default for ThermostatMode {
    fn default() -> Self {
        ThermostatMode::Comparator
    }
}

/// Decoded configuration register. Defaults to the power-on state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub resolution: Resolution,
    pub fault_tolerance: FaultTolerance,
    pub polarity: Polarity,
    pub mode: ThermostatMode,
    pub shutdown: bool,
}

impl Config {
    /// Unpack a raw configuration byte.
    pub fn from_bits(reg: u8) -> Self {
        Config {
            resolution: Resolution::from_field(Field::Resolution.get(reg)),
            fault_tolerance: match Field::FaultTolerance.get(reg) {
                0b00 => FaultTolerance::One,
                0b01 => FaultTolerance::Two,
                0b10 => FaultTolerance::Four,
                _ => FaultTolerance::Six,
            },
            polarity: if Field::Polarity.get(reg) != 0 {
                Polarity::ActiveHigh
            } else {
                Polarity::ActiveLow
            },
            mode: if Field::ThermostatMode.get(reg) != 0 {
                ThermostatMode::Interrupt
            } else {
                ThermostatMode::Comparator
            },
            shutdown: Field::Shutdown.get(reg) != 0,
        }
    }

    /// Raw value of one sub-field.
    pub fn field(&self, field: Field) -> u8 {
        match field {
            Field::Resolution => self.resolution as u8,
            Field::FaultTolerance => self.fault_tolerance as u8,
            Field::Polarity => matches!(self.polarity, Polarity::ActiveHigh) as u8,
            Field::ThermostatMode => matches!(self.mode, ThermostatMode::Interrupt) as u8,
            Field::Shutdown => self.shutdown as u8,
        }
    }

    /// Pack onto `prior`, keeping every bit no sub-field owns.
    pub fn apply(&self, prior: u8) -> u8 {
        Field::ALL
            .iter()
            .fold(prior, |reg, &field| set_field(reg, field, self.field(field)))
    }

    pub fn bits(&self) -> u8 {
        self.apply(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_from_pins() {
        assert_eq!(device_address(0), 0x48);
        assert_eq!(device_address(5), 0b100_1101);
        assert_eq!(device_address(7), 0x4f);
        // only A2..A0 count
        assert_eq!(device_address(0b1111_1101), 0b100_1101);
    }

    #[test]
    fn register_map() {
        assert_eq!(Register::Temperature.addr(), 0);
        assert_eq!(Register::Config.addr(), 1);
        assert_eq!(Register::Hysteresis.addr(), 2);
        assert_eq!(Register::OverTemperature.addr(), 3);
    }

    #[test]
    fn fields_do_not_overlap() {
        let mut seen = 0u8;
        for field in Field::ALL {
            assert_eq!(seen & field.mask(), 0, "{:?}", field);
            seen |= field.mask();
        }
        assert_eq!(seen, 0b0111_1111);
    }

    #[test]
    fn set_field_keeps_other_bits() {
        for prior in [0x00u8, 0xff, 0b1010_1010, 0b0101_0101] {
            for field in Field::ALL {
                for value in 0..=field.max_value() {
                    let reg = set_field(prior, field, value);
                    assert_eq!(reg & !field.mask(), prior & !field.mask());
                    assert_eq!(field.get(reg), value);
                }
            }
        }
    }

    #[test]
    fn set_field_drops_overflow() {
        assert_eq!(set_field(0, Field::Shutdown, 0b10), 0);
        assert_eq!(set_field(0, Field::Resolution, 0b111), 0b0110_0000);
    }

    #[test]
    fn config_default_is_power_on_state() {
        assert_eq!(Config::default().bits(), 0x00);
        assert_eq!(Config::from_bits(0x00), Config::default());
    }

    #[test]
    fn config_unpack() {
        let config = Config::from_bits(0b1111_0110);
        assert_eq!(config.resolution, Resolution::Twelve);
        assert_eq!(config.fault_tolerance, FaultTolerance::Four);
        assert_eq!(config.polarity, Polarity::ActiveHigh);
        assert_eq!(config.mode, ThermostatMode::Interrupt);
        assert!(!config.shutdown);
    }

    #[test]
    fn config_apply_keeps_bit7() {
        let config = Config {
            resolution: Resolution::Ten,
            fault_tolerance: FaultTolerance::Six,
            polarity: Polarity::ActiveLow,
            mode: ThermostatMode::Comparator,
            shutdown: true,
        };
        assert_eq!(config.apply(0x00), 0b0011_1001);
        assert_eq!(config.apply(0xff), 0b1011_1001);
        assert_eq!(Config::from_bits(config.apply(0x80)), config);
    }

    #[test]
    fn resolution_bits() {
        assert_eq!(Resolution::from_bits(8), None);
        assert_eq!(Resolution::from_bits(13), None);
        for bits in 9..=12 {
            assert_eq!(Resolution::from_bits(bits).map(|r| r.bits()), Some(bits));
        }
    }

    #[test]
    fn resolution_conversion_time_doubles_per_bit() {
        assert_eq!(Resolution::Nine.conversion_time_ms(), 150);
        assert_eq!(Resolution::Twelve.conversion_time_ms(), 1200);
        for bits in 9..12 {
            let lower = Resolution::from_bits(bits).unwrap();
            let higher = Resolution::from_bits(bits + 1).unwrap();
            assert_eq!(higher.conversion_time_ms(), lower.conversion_time_ms() * 2);
        }
    }

    #[test]
    fn fault_tolerance_counts() {
        let counts: [u8; 4] = [1, 2, 4, 6];
        for (raw, count) in counts.iter().enumerate() {
            let ft = FaultTolerance::from_raw(raw as u8).unwrap();
            assert_eq!(ft.count(), *count);
            assert_eq!(ft as u8, raw as u8);
        }
        assert_eq!(FaultTolerance::from_raw(4), None);
    }
}
