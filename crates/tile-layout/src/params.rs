//! User-facing layout parameters.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Maximum photo height range accepted by parameter providers, in mm.
pub const MAX_HEIGHT_MM_RANGE: RangeInclusive<f32> = 8.0..=35.0;

/// Inter-photo spacing range accepted by parameter providers, in pixels.
pub const SPACING_PX_RANGE: RangeInclusive<u32> = 5..=30;

/// Order in which generated instances are packed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Generation order, i.e. effectively random.
    #[default]
    None,
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::None => "none",
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "none" => Ok(SortOrder::None),
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!(
                "unknown sort order '{other}' (expected none, asc, or desc)"
            )),
        }
    }
}

/// Parameters driving instance generation and packing order.
///
/// The packer uses these values as given; providers are expected to
/// clamp them to [`MAX_HEIGHT_MM_RANGE`] and [`SPACING_PX_RANGE`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParameters {
    /// Tallest photo the layout may generate, in millimeters.
    pub max_height_mm: f32,

    /// Gap kept between photos and from the canvas edges, in pixels.
    pub spacing_px: u32,

    /// Packing order of the generated instances.
    pub sort_order: SortOrder,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            max_height_mm: 30.0,
            spacing_px: 10,
            sort_order: SortOrder::None,
        }
    }
}

impl LayoutParameters {
    /// Create parameters with the interactive defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the maximum photo height in millimeters.
    pub fn with_max_height_mm(mut self, mm: f32) -> Self {
        self.max_height_mm = mm;
        self
    }

    /// Builder: set the inter-photo spacing in pixels.
    pub fn with_spacing_px(mut self, px: u32) -> Self {
        self.spacing_px = px;
        self
    }

    /// Builder: set the packing order.
    pub fn with_sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters() {
        let params = LayoutParameters::default();
        assert_eq!(params.max_height_mm, 30.0);
        assert_eq!(params.spacing_px, 10);
        assert_eq!(params.sort_order, SortOrder::None);
    }

    #[test]
    fn builder_chain() {
        let params = LayoutParameters::new()
            .with_max_height_mm(12.0)
            .with_spacing_px(25)
            .with_sort_order(SortOrder::Desc);
        assert_eq!(params.max_height_mm, 12.0);
        assert_eq!(params.spacing_px, 25);
        assert_eq!(params.sort_order, SortOrder::Desc);
    }

    #[test]
    fn sort_order_round_trips_through_str() {
        for order in [SortOrder::None, SortOrder::Asc, SortOrder::Desc] {
            assert_eq!(order.to_string().parse::<SortOrder>(), Ok(order));
        }
        assert!("ascending".parse::<SortOrder>().is_err());
    }

    #[test]
    fn serde_round_trip() {
        let params = LayoutParameters::new().with_sort_order(SortOrder::Asc);
        let json = serde_json::to_string(&params).unwrap();
        let back: LayoutParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
