//! Floating hearts and sparkles for the presentational sections
//!
//! Positions are random percentages of the section; colors cycle through
//! small palettes by index. Generated once per mount from the seeded RNG.

use rand::Rng;

pub const HEART_COLORS: [&str; 3] = ["#FF9A9E", "#FECFEF", "#A8E6CF"];
pub const SPARKLE_COLORS: [&str; 4] = ["#FFD3A5", "#FFAAA5", "#A8E6CF", "#FECFEF"];

/// One scattered decoration; `x`/`y` are percentages, `size` in pixels
#[derive(Debug, Clone, PartialEq)]
pub struct DecorItem {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: &'static str,
}

/// Scatter floating hearts across a section
pub fn floating_hearts<R: Rng>(rng: &mut R, count: usize) -> Vec<DecorItem> {
    scatter(rng, count, 20.0, 45.0, &HEART_COLORS)
}

/// Scatter twinkling sparkles across a section
pub fn sparkles<R: Rng>(rng: &mut R, count: usize) -> Vec<DecorItem> {
    scatter(rng, count, 15.0, 35.0, &SPARKLE_COLORS)
}

fn scatter<R: Rng>(
    rng: &mut R,
    count: usize,
    size_min: f32,
    size_max: f32,
    palette: &[&'static str],
) -> Vec<DecorItem> {
    (0..count)
        .map(|i| DecorItem {
            x: rng.random_range(0.0..100.0),
            y: rng.random_range(0.0..100.0),
            size: rng.random_range(size_min..size_max),
            color: palette[i % palette.len()],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_scatter_stays_in_bounds() {
        let mut rng = Pcg32::seed_from_u64(1);
        for item in floating_hearts(&mut rng, 8) {
            assert!((0.0..100.0).contains(&item.x));
            assert!((0.0..100.0).contains(&item.y));
            assert!((20.0..45.0).contains(&item.size));
        }
        for item in sparkles(&mut rng, 12) {
            assert!((15.0..35.0).contains(&item.size));
        }
    }

    #[test]
    fn test_palette_cycles_by_index() {
        let mut rng = Pcg32::seed_from_u64(2);
        let hearts = floating_hearts(&mut rng, 7);
        for (i, item) in hearts.iter().enumerate() {
            assert_eq!(item.color, HEART_COLORS[i % HEART_COLORS.len()]);
        }
    }

    #[test]
    fn test_deterministic_for_seed() {
        let mut a = Pcg32::seed_from_u64(3);
        let mut b = Pcg32::seed_from_u64(3);
        assert_eq!(sparkles(&mut a, 12), sparkles(&mut b, 12));
    }
}
