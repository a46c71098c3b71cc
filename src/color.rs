use palette::{Hsl, IntoColor, Srgb};

/// 8-bit sRGB triple, independent of any renderer.
pub type Rgb8 = [u8; 3];

/// Number of distinct hues before trace colours repeat.
const TRACE_SLOTS: usize = 10;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb8> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            [
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ]
        })
        .collect()
}

/// Colour of the trace at `position` on the chart.
///
/// Slots are fixed so adding a region never recolours the ones already shown.
pub fn trace_color(position: usize) -> Rgb8 {
    // Step through the wheel with a stride coprime to the slot count so
    // neighbouring traces land far apart in hue.
    let slot = (position * 3) % TRACE_SLOTS;
    generate_palette(TRACE_SLOTS)[slot]
}

/// Mix a colour towards white; `amount` 0 keeps it, 1 gives white.
pub fn lighten(rgb: Rgb8, amount: f32) -> Rgb8 {
    let amount = amount.clamp(0.0, 1.0);
    rgb.map(|c| (c as f32 + (255.0 - c as f32) * amount).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_distinct() {
        let p = generate_palette(TRACE_SLOTS);
        for (i, a) in p.iter().enumerate() {
            for b in &p[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn trace_colors_are_stable_and_cycle() {
        assert_eq!(trace_color(0), trace_color(TRACE_SLOTS));
        assert_ne!(trace_color(0), trace_color(1));
    }

    #[test]
    fn lighten_bounds() {
        assert_eq!(lighten([10, 20, 30], 0.0), [10, 20, 30]);
        assert_eq!(lighten([10, 20, 30], 1.0), [255, 255, 255]);
    }
}
