// ABOUTME: Length unit conversions shared by the DOCX reader and the PPTX writer
// ABOUTME: Word stores twips and half-points, DrawingML stores EMUs

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_CM: i64 = 360_000;
pub const EMUS_PER_PT: i64 = 12_700;
pub const EMUS_PER_TWIP: i64 = 635;

/// Inches to EMUs, rounded to the nearest whole unit.
pub fn inches(value: f64) -> i64 {
    (value * EMUS_PER_INCH as f64).round() as i64
}

pub fn twips_to_emu(twips: i64) -> i64 {
    twips * EMUS_PER_TWIP
}

pub fn emu_to_cm(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_CM as f64
}

/// Round to `places` decimals using the exact binary value, ties to even.
///
/// Scaling by a power of ten first can push a value like 3.17499.. onto 317.5,
/// so the decimal formatter does the rounding instead.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

/// DrawingML font sizes are hundredths of a point.
pub fn centipoints(pt: f64) -> u32 {
    (pt * 100.0).round() as u32
}
