use crate::error::Error;

/// Heating and density parameters of the print head.
///
/// The values are sent with [`crate::command::config`] at the start of a
/// document and again before an image block. A value never changes once
/// built, each `with_*` call returns a fresh snapshot.
///
/// # Example
///
/// ```
/// use thermal_serial::PrinterConfig;
///
/// let config = PrinterConfig::text_mode().with_heat_time(200).unwrap();
/// assert_eq!(config.heat_time(), 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    dots: u8,
    heat_time: u8,
    heat_interval: u8,
    density: u8,
    break_time: u8,
}

/// Largest value of the 3-bit print density field.
pub const MAX_DENSITY: u8 = 0b111;

/// Largest value of the 5-bit print break time field.
pub const MAX_BREAK_TIME: u8 = 0b1_1111;

impl PrinterConfig {
    /// Build a configuration, rejecting values that do not fit their field.
    ///
    /// `dots`, `heat_time` and `heat_interval` must be in `1..=255`,
    /// `density` fits 3 bits and `break_time` fits 5 bits.
    pub fn new(
        dots: u8,
        heat_time: u8,
        heat_interval: u8,
        density: u8,
        break_time: u8,
    ) -> Result<Self, Error> {
        check_nonzero("heating dots", dots)?;
        check_nonzero("heat time", heat_time)?;
        check_nonzero("heat interval", heat_interval)?;
        if density > MAX_DENSITY {
            return Err(Error::InvalidConfig(format!(
                "print density {} does not fit 3 bits",
                density
            )));
        }
        if break_time > MAX_BREAK_TIME {
            return Err(Error::InvalidConfig(format!(
                "print break time {} does not fit 5 bits",
                break_time
            )));
        }
        Ok(PrinterConfig {
            dots,
            heat_time,
            heat_interval,
            density,
            break_time,
        })
    }

    /// Profile used for text output.
    pub const fn text_mode() -> Self {
        PrinterConfig {
            dots: 6,
            heat_time: 180,
            heat_interval: 127,
            density: 0b001,
            break_time: 0b00011,
        }
    }

    /// Darker, slower profile used before printing bitmap rows.
    pub const fn image_mode() -> Self {
        PrinterConfig {
            dots: 12,
            heat_time: 255,
            heat_interval: 127,
            density: 0b111,
            break_time: 0b00111,
        }
    }

    pub fn with_dots(self, dots: u8) -> Result<Self, Error> {
        Self::new(
            dots,
            self.heat_time,
            self.heat_interval,
            self.density,
            self.break_time,
        )
    }

    pub fn with_heat_time(self, heat_time: u8) -> Result<Self, Error> {
        Self::new(
            self.dots,
            heat_time,
            self.heat_interval,
            self.density,
            self.break_time,
        )
    }

    pub fn with_heat_interval(self, heat_interval: u8) -> Result<Self, Error> {
        Self::new(
            self.dots,
            self.heat_time,
            heat_interval,
            self.density,
            self.break_time,
        )
    }

    pub fn with_density(self, density: u8) -> Result<Self, Error> {
        Self::new(
            self.dots,
            self.heat_time,
            self.heat_interval,
            density,
            self.break_time,
        )
    }

    pub fn with_break_time(self, break_time: u8) -> Result<Self, Error> {
        Self::new(
            self.dots,
            self.heat_time,
            self.heat_interval,
            self.density,
            break_time,
        )
    }

    pub fn dots(&self) -> u8 {
        self.dots
    }

    pub fn heat_time(&self) -> u8 {
        self.heat_time
    }

    pub fn heat_interval(&self) -> u8 {
        self.heat_interval
    }

    pub fn density(&self) -> u8 {
        self.density
    }

    pub fn break_time(&self) -> u8 {
        self.break_time
    }

    /// Density and break time packed into the single byte of `DC2 #`.
    pub fn density_byte(&self) -> u8 {
        (self.density << 5) | self.break_time
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::text_mode()
    }
}

fn check_nonzero(name: &str, value: u8) -> Result<(), Error> {
    if value == 0 {
        Err(Error::InvalidConfig(format!("{} must be at least 1", name)))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_pack_density() {
        assert_eq!(PrinterConfig::text_mode().density_byte(), 35);
        assert_eq!(PrinterConfig::image_mode().density_byte(), 0b1110_0111);
    }

    #[test]
    fn test_new_rejects_wide_fields() {
        assert!(matches!(
            PrinterConfig::new(6, 180, 127, 8, 3),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            PrinterConfig::new(6, 180, 127, 1, 32),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            PrinterConfig::new(0, 180, 127, 1, 3),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_new_accepts_field_limits() {
        let config = PrinterConfig::new(255, 1, 255, MAX_DENSITY, MAX_BREAK_TIME).unwrap();
        assert_eq!(config.density_byte(), 0xFF);
    }

    #[test]
    fn test_with_setters_keep_other_fields() {
        let config = PrinterConfig::text_mode()
            .with_dots(9)
            .and_then(|c| c.with_density(4))
            .unwrap();
        assert_eq!(config.dots(), 9);
        assert_eq!(config.density(), 4);
        assert_eq!(config.heat_time(), 180);
        assert_eq!(config.heat_interval(), 127);
        assert_eq!(config.break_time(), 3);

        assert!(PrinterConfig::text_mode().with_heat_interval(0).is_err());
        assert!(PrinterConfig::text_mode().with_break_time(40).is_err());
    }
}
