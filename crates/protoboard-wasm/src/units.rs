//! Physical length constants in drawing units.

/// One inch in drawing units.
pub const INCH: f64 = 3.5;

/// One millimeter in drawing units.
pub const MILLIMETER: f64 = INCH / 25.4;

/// Center-to-center distance of breadboard holes (0.1 inch).
pub const PIN_SPACING: f64 = 0.1 * INCH;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_spacing_is_two_point_five_four_millimeters() {
        assert!((PIN_SPACING - 2.54 * MILLIMETER).abs() < 1e-12);
    }
}
