use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Generated colours
// ---------------------------------------------------------------------------

/// `n` extra status colours on evenly spaced hues. The wheel starts at blue
/// so the first generated colour stays clear of the default pinks.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    let step = 360.0 / n.max(1) as f32;
    (0..n)
        .map(|i| {
            let rgb: Srgb = Hsl::new(210.0 + i as f32 * step, 0.65, 0.5).into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Status colours: loan status → Color32
// ---------------------------------------------------------------------------

/// Assigns each loan status a fixed colour so the pie and the stacked bars
/// agree, whatever subset the current filters leave.
#[derive(Debug, Clone)]
pub struct StatusColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl StatusColors {
    /// Statuses are sorted and take `fixed` colours in order; any beyond
    /// that get generated hues.
    pub fn new(statuses: &[String], fixed: &[Color32]) -> Self {
        let mut sorted: Vec<&String> = statuses.iter().collect();
        sorted.sort();
        sorted.dedup();

        let extra = generate_palette(sorted.len().saturating_sub(fixed.len()));
        let colors = fixed.iter().copied().chain(extra);

        let mapping = sorted
            .into_iter()
            .zip(colors)
            .map(|(s, c)| (s.clone(), c))
            .collect();

        StatusColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a status.
    pub fn color_for(&self, status: &str) -> Color32 {
        self.mapping
            .get(status)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(5);
        assert_eq!(p.len(), 5);
        assert_ne!(p[0], p[1]);
    }

    #[test]
    fn fixed_colours_follow_sorted_status_order() {
        let statuses = vec!["PaidOff".to_string(), "Current".into(), "Defaulted".into()];
        let fixed = [Color32::RED, Color32::GREEN, Color32::BLUE];
        let colors = StatusColors::new(&statuses, &fixed);

        assert_eq!(colors.color_for("Current"), Color32::RED);
        assert_eq!(colors.color_for("Defaulted"), Color32::GREEN);
        assert_eq!(colors.color_for("PaidOff"), Color32::BLUE);
        assert_eq!(colors.color_for("Restructured"), Color32::GRAY);
    }

    #[test]
    fn extra_statuses_get_generated_colours() {
        let statuses = vec!["A".to_string(), "B".into(), "C".into()];
        let colors = StatusColors::new(&statuses, &[Color32::RED]);
        assert_eq!(colors.color_for("A"), Color32::RED);
        assert_ne!(colors.color_for("B"), Color32::GRAY);
        assert_ne!(colors.color_for("B"), colors.color_for("C"));
    }
}
