//! Overlay surface drawn into a ratatui buffer.

use std::collections::BTreeMap;

use flurry_core::{Size, Viewport};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect as Area},
    widgets::Widget,
};

use crate::chars::flake_char;
use crate::color::flake_color;
use crate::surface::{ElementId, OverlaySurface, Stylesheet};

/// State for a single flake on the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Flake {
    x: f64,
    y: f64,
    blur: f64,
}

/// Full-screen flake layer painted on top of whatever the frame already holds.
///
/// Flakes only change the glyph and foreground of the cells they cover, so
/// the content underneath keeps its background. Positions are in overlay
/// units and mapped to cells through the installed [`Stylesheet`].
#[derive(Debug, Default)]
pub struct TerminalOverlay {
    stylesheet: Stylesheet,
    flakes: BTreeMap<ElementId, Flake>,
    next_id: u64,
}

impl TerminalOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// Number of attached flakes.
    pub fn len(&self) -> usize {
        self.flakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flakes.is_empty()
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.flakes.contains_key(&element)
    }

    /// Position of an attached flake.
    pub fn position(&self, element: ElementId) -> Option<(f64, f64)> {
        self.flakes.get(&element).map(|f| (f.x, f.y))
    }

    /// Blur an attached flake was created with.
    pub fn blur(&self, element: ElementId) -> Option<f64> {
        self.flakes.get(&element).map(|f| f.blur)
    }

    /// Size in overlay units of a drawing area of `width` x `height` cells.
    pub fn viewport_for(&self, width: u16, height: u16) -> Viewport {
        self.stylesheet.viewport_for(width, height)
    }

    /// Cell offset of an overlay coordinate inside an area, if it is visible.
    fn cell_of(&self, flake: &Flake, area: Area) -> Option<Position> {
        let col = (flake.x / self.stylesheet.cell.width).floor();
        let row = (flake.y / self.stylesheet.cell.height).floor();
        if !(0.0..f64::from(area.width)).contains(&col)
            || !(0.0..f64::from(area.height)).contains(&row)
        {
            return None;
        }
        Some(Position::new(area.x + col as u16, area.y + row as u16))
    }
}

impl OverlaySurface for TerminalOverlay {
    fn install(&mut self, stylesheet: Stylesheet) {
        self.stylesheet = stylesheet;
    }

    fn create_flake(&mut self, blur: f64) -> ElementId {
        let element = ElementId(self.next_id);
        self.next_id += 1;
        self.flakes.insert(
            element,
            Flake {
                x: 0.0,
                y: 0.0,
                blur,
            },
        );
        element
    }

    fn place(&mut self, element: ElementId, x: f64, y: f64) {
        if let Some(flake) = self.flakes.get_mut(&element) {
            flake.x = x;
            flake.y = y;
        }
    }

    fn extent(&self, _element: ElementId) -> Size {
        Size::new(self.stylesheet.flake_size, self.stylesheet.flake_size)
    }

    fn detach(&mut self, element: ElementId) {
        self.flakes.remove(&element);
    }
}

impl Widget for &TerminalOverlay {
    fn render(self, area: Area, buf: &mut Buffer) {
        // Softer flakes first so sharp ones win shared cells
        let mut flakes: Vec<&Flake> = self.flakes.values().collect();
        flakes.sort_by(|a, b| b.blur.total_cmp(&a.blur));

        for flake in flakes {
            let Some(position) = self.cell_of(flake, area) else {
                continue;
            };
            if let Some(cell) = buf.cell_mut(position) {
                cell.set_char(flake_char(flake.blur))
                    .set_fg(flake_color(flake.blur, self.stylesheet.tint));
            }
        }
    }
}
