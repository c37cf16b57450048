// Copyright 2026 the Timewheel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A read-only snapshot of everything a rendering surface draws.
//!
//! A [`Frame`] resolves the layout, the current animated values and the
//! selected theme into screen-space shapes. It borrows text from the theme
//! catalog, so it lives no longer than the orchestrator that built it.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Circle, Point, Rect, Size};

use crate::catalog::{Fact, ThemeCatalog};
use crate::config::TimelineConfig;
use crate::geometry::{Geometry, GuideLines, Paddings};
use crate::handle::VisualHandle;
use crate::layout::Layout;
use crate::rotation::{label_position, rotate_point};
use crate::selection::SelectionController;
use crate::store::{Property, PropertyStore};
use crate::style::{Color, DotStyle, Emphasis, Sizes};

/// One dot, placed and styled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotFrame {
    /// Theme id.
    pub id: u32,
    /// Center after ring rotation.
    pub position: Point,
    /// Static label anchor, rotated with the ring.
    pub label_anchor: Point,
    /// Current (possibly mid-animation) style.
    pub style: DotStyle,
    /// Highlight state the style is heading to.
    pub emphasis: Emphasis,
    /// Reacts to hover and click; false for the selected dot.
    pub interactive: bool,
}

/// The floating name of the selected theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeLabel<'a> {
    /// Theme name.
    pub text: &'a str,
    /// Point next to the selected dot the label hangs off.
    pub anchor: Point,
    /// Box the label text is laid out in.
    pub bounds: Rect,
    /// Current fade, `0.0..=1.0`.
    pub opacity: f64,
}

/// Start and end years drawn across the ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeriodLabels {
    /// First year of the selected period.
    pub start: i32,
    /// Last year of the selected period.
    pub end: i32,
    /// Where the start year is drawn.
    pub start_position: Point,
    /// Where the end year is drawn.
    pub end_position: Point,
}

/// "03/06"-style navigation counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Counter {
    /// 1-based position of the selected theme; 0 before any selection.
    pub current: u32,
    /// Number of themes.
    pub total: u32,
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.current, self.total)
    }
}

/// Everything needed to draw the widget once.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<'a> {
    /// Viewport size.
    pub size: Size,
    /// Ring placement.
    pub geometry: Geometry,
    /// Horizontal margins.
    pub paddings: Paddings,
    /// Stroke widths and radii.
    pub sizes: Sizes,
    /// Straight decorations.
    pub guides: GuideLines,
    /// Gradient marker colors, top to bottom.
    pub gradient: (Color, Color),
    /// The ring outline.
    pub ring: Circle,
    /// Ring rotation in degrees.
    pub rotation: f64,
    /// Dots in id order.
    pub dots: Vec<DotFrame>,
    /// Name of the selected theme.
    pub label: Option<ThemeLabel<'a>>,
    /// Years of the selected theme.
    pub period: Option<PeriodLabels>,
    /// Navigation counter.
    pub counter: Counter,
    /// Facts of the selected theme, for the carousel.
    pub facts: &'a [Fact],
}

impl<'a> Frame<'a> {
    /// Resolves a frame from the layout, controller state and animated values.
    #[must_use]
    pub fn build(
        layout: &Layout,
        controller: &SelectionController,
        store: &PropertyStore,
        catalog: &'a ThemeCatalog,
        config: &TimelineConfig,
        title_baseline: f64,
    ) -> Self {
        let geometry = layout.geometry;
        let center = geometry.center;
        let rotation = store
            .scalar(VisualHandle::Ring, Property::Rotation)
            .unwrap_or_else(|| controller.rotation());
        let selected = controller.selected();

        let dots = layout
            .dots
            .iter()
            .zip(0_u32..)
            .map(|(dot, index)| {
                let emphasis = controller.emphasis(dot.id);
                DotFrame {
                    id: dot.id,
                    position: rotate_point(dot.position, center, rotation),
                    label_anchor: rotate_point(dot.label_anchor, center, rotation),
                    style: store.dot_style(index).unwrap_or_else(|| {
                        DotStyle::for_emphasis(emphasis, &layout.sizes, &config.palette)
                    }),
                    emphasis,
                    interactive: selected != Some(dot.id),
                }
            })
            .collect();

        let theme = selected.and_then(|id| catalog.get(id));
        let label = theme.and_then(|theme| {
            let dot = layout.dots.iter().find(|dot| dot.id == theme.id)?;
            let anchor = label_position(dot.position, center, rotation, &layout.sizes, &config.label);
            let origin = Point::new(
                anchor.x - config.label.position_adjustment,
                anchor.y + config.label.period_offset_y,
            );
            Some(ThemeLabel {
                text: &theme.name,
                anchor,
                bounds: Rect::from_origin_size(
                    origin,
                    Size::new(config.label.width, config.label.height),
                ),
                opacity: store
                    .scalar(VisualHandle::ThemeLabel, Property::Opacity)
                    .unwrap_or(0.0),
            })
        });
        let period = theme.map(|theme| {
            let y = center.y + config.label.period_offset_y;
            let inset = geometry.circle_radius - config.label.period_offset_x;
            PeriodLabels {
                start: theme.period.start,
                end: theme.period.end,
                start_position: Point::new(center.x - inset, y),
                end_position: Point::new(center.x + inset, y),
            }
        });

        Self {
            size: layout.size,
            geometry,
            paddings: layout.paddings,
            sizes: layout.sizes,
            guides: GuideLines::new(
                layout.size,
                &geometry,
                &layout.paddings,
                layout.sizes.gradient_line_width,
                title_baseline,
            ),
            gradient: (config.palette.gradient_start, config.palette.gradient_end),
            ring: geometry.circle(),
            rotation,
            dots,
            label,
            period,
            counter: Counter {
                current: selected.unwrap_or(0),
                total: catalog.last_id(),
            },
            facts: theme.map(|theme| theme.facts.as_slice()).unwrap_or_default(),
        }
    }

    /// The dot with this id.
    #[must_use]
    pub fn dot(&self, id: u32) -> Option<&DotFrame> {
        self.dots.iter().find(|dot| dot.id == id)
    }
}
