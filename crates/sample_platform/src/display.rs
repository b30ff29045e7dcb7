//! Display metrics

/// Baseline density (mdpi) that maps to a scale factor of 1.0
pub const DENSITY_BASELINE: u32 = 160;

/// `ACONFIGURATION_DENSITY_DEFAULT`
pub const DENSITY_DEFAULT: u32 = 0;
/// `ACONFIGURATION_DENSITY_ANY`
pub const DENSITY_ANY: u32 = 0xfffe;
/// `ACONFIGURATION_DENSITY_NONE`
pub const DENSITY_NONE: u32 = 0xffff;

/// Convert a configuration density (dpi) into a scale factor.
///
/// Missing and sentinel densities fall back to 1.0.
pub fn density_scale_factor(density: Option<u32>) -> f64 {
    match density {
        Some(dpi) if !matches!(dpi, DENSITY_DEFAULT | DENSITY_ANY | DENSITY_NONE) => {
            dpi as f64 / DENSITY_BASELINE as f64
        }
        _ => 1.0,
    }
}
