//! Fixed colors of the tracked series
//!
//! The tracked keys are static configuration, independent of the columns a pasted dataset happens to
//! have. A key missing from the data simply renders as an empty series.

use egui::Color32;

/// Opacity of a card's tinted background
const BACKGROUND_ALPHA: f32 = 0.1;
/// Opacity of the lower gradient stop
const GRADIENT_END_ALPHA: f32 = 0.7;

/// One tracked column and the color it is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedKey {
    pub name: &'static str,
    pub main: Color32,
}

/// Tracked keys in display order
pub static TRACKED_KEYS: [TrackedKey; 4] = [
    TrackedKey {
        name: "BAS",
        main: Color32::from_rgb(221, 66, 44),
    },
    TrackedKey {
        name: "ATS",
        main: Color32::from_rgb(24, 71, 141),
    },
    TrackedKey {
        name: "RAS",
        main: Color32::from_rgb(250, 223, 0),
    },
    TrackedKey {
        name: "CNS",
        main: Color32::from_rgb(0, 128, 0),
    },
];

impl TrackedKey {
    /// Main color at 10% opacity
    pub fn background(&self) -> Color32 {
        with_alpha(self.main, BACKGROUND_ALPHA)
    }

    /// Top and bottom stops of the area gradient under a line
    pub fn gradient(&self) -> [Color32; 2] {
        [self.main, with_alpha(self.main, GRADIENT_END_ALPHA)]
    }
}

/// `color` with its alpha replaced by `alpha` (0.0 to 1.0)
pub fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let alpha = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
