//! Output layout for node record lines.
//!
//! ADCIRC mesh files write node records as fixed-width columns:
//!
//! ```text
//!          12   100.5000000000   200.2500000000   -3.0000000000
//! ```
//!
//! Geographic meshes (longitude/latitude in degrees) need more decimal
//! digits than projected meshes in meters or feet, so the precision depends
//! on which convention the caller asks for.

/// Decimal digits written for geographic coordinates.
pub const GEOGRAPHIC_PRECISION: usize = 10;

/// Decimal digits written for projected (Cartesian) coordinates.
pub const PROJECTED_PRECISION: usize = 4;

/// Column layout and precision for formatting node records.
///
/// # Example
/// ```
/// use adc_node::{MeshNode, RecordFormat};
///
/// let node = MeshNode::new(3, 1.5, 2.5, -4.0);
/// let compact = RecordFormat::compact().with_projected_precision(1);
/// assert_eq!(node.format_record_with(&compact, false), "3 1.5 2.5 -4.0");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecordFormat {
    /// Minimum width of the id column (right-aligned)
    pub id_width: usize,
    /// Minimum width of each coordinate column (right-aligned)
    pub coord_width: usize,
    /// Decimal digits in geographic mode
    pub geographic_precision: usize,
    /// Decimal digits in projected mode
    pub projected_precision: usize,
    /// Separator between id and x, and between x and y
    pub separator: String,
    /// Separator between y and z
    pub z_separator: String,
}

impl RecordFormat {
    /// Standard ADCIRC fixed-width layout.
    pub fn adcirc() -> Self {
        Self {
            id_width: 11,
            coord_width: 14,
            geographic_precision: GEOGRAPHIC_PRECISION,
            projected_precision: PROJECTED_PRECISION,
            separator: "   ".to_string(),
            z_separator: "  ".to_string(),
        }
    }

    /// Single-space separated, no padding.
    pub fn compact() -> Self {
        Self {
            id_width: 0,
            coord_width: 0,
            separator: " ".to_string(),
            z_separator: " ".to_string(),
            ..Self::adcirc()
        }
    }

    /// Set decimal digits for geographic mode.
    pub fn with_geographic_precision(mut self, digits: usize) -> Self {
        self.geographic_precision = digits;
        self
    }

    /// Set decimal digits for projected mode.
    pub fn with_projected_precision(mut self, digits: usize) -> Self {
        self.projected_precision = digits;
        self
    }

    /// Set column widths.
    pub fn with_widths(mut self, id_width: usize, coord_width: usize) -> Self {
        self.id_width = id_width;
        self.coord_width = coord_width;
        self
    }

    /// Precision for the given convention.
    pub fn precision(&self, use_geographic: bool) -> usize {
        if use_geographic {
            self.geographic_precision
        } else {
            self.projected_precision
        }
    }
}

impl Default for RecordFormat {
    fn default() -> Self {
        Self::adcirc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_adcirc() {
        let fmt = RecordFormat::default();
        assert_eq!(fmt, RecordFormat::adcirc());
        assert_eq!(fmt.precision(true), 10);
        assert_eq!(fmt.precision(false), 4);
    }

    #[test]
    fn test_builders() {
        let fmt = RecordFormat::compact()
            .with_geographic_precision(6)
            .with_widths(4, 8);
        assert_eq!(fmt.precision(true), 6);
        assert_eq!(fmt.precision(false), PROJECTED_PRECISION);
        assert_eq!(fmt.id_width, 4);
        assert_eq!(fmt.coord_width, 8);
        assert_eq!(fmt.separator, " ");
    }
}
