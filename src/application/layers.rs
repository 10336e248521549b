//! Layer registry
//!
//! Owns every layer (and the separator path) of a loaded window. A registry is
//! built on load and consumed by [`LayerRegistry::destroy`] on unload, so
//! nothing can reach a layer once its window is gone.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use time::PrimitiveDateTime;

use crate::application::draw;
use crate::application::format::{ClockText, HourStyle};
use crate::application::layout::{self, Shape, LINE_PATH};
use crate::application::locale::Language;
use crate::system::bms::ChargeState;
use crate::system::gfx::{LayerId, PathId, TextStyle, WindowId};
use crate::system::Compositor;

/// Number of layers a fully prepared registry owns
pub const LAYER_COUNT: usize = 5;

pub struct LayerRegistry {
    window: WindowId,
    bounds: Rectangle,
    shape: Shape,
    time: Option<LayerId>,
    date: Option<LayerId>,
    week_day: Option<LayerId>,
    line: Option<LayerId>,
    line_path: Option<PathId>,
    battery_line: Option<LayerId>,
    /// `100 - percent` of the last battery reading
    drained: u8,
}

impl LayerRegistry {
    /// An empty registry for `window`, nothing is allocated yet
    pub fn new(window: WindowId, bounds: Rectangle, shape: Shape) -> Self {
        Self {
            window,
            bounds,
            shape,
            time: None,
            date: None,
            week_day: None,
            line: None,
            line_path: None,
            battery_line: None,
            drained: 0,
        }
    }

    /// Build every region, bottom to top
    pub fn prepare(compositor: &mut impl Compositor, window: WindowId, shape: Shape) -> Self {
        let bounds = compositor.window_bounds(window);
        let mut registry = Self::new(window, bounds, shape);
        registry.draw_line(compositor);
        registry.draw_battery_line(compositor);
        registry.draw_week_day(compositor);
        registry.draw_date(compositor);
        registry.draw_time(compositor);
        debug!("prepared {} layers in {:?}", registry.layer_count(), bounds);
        registry
    }

    pub fn draw_line(&mut self, compositor: &mut impl Compositor) {
        if self.line.is_some() {
            return;
        }
        let layer = compositor.create_layer(self.bounds);
        compositor.add_child(self.window, layer);
        self.line_path = Some(compositor.create_path(&LINE_PATH));
        self.line = Some(layer);
    }

    pub fn draw_battery_line(&mut self, compositor: &mut impl Compositor) {
        if self.battery_line.is_some() {
            return;
        }
        let layer = compositor.create_layer(self.bounds);
        compositor.add_child(self.window, layer);
        self.battery_line = Some(layer);
    }

    pub fn draw_time(&mut self, compositor: &mut impl Compositor) {
        if self.time.is_none() {
            let frame = layout::time_frame(self.shape, &self.bounds);
            self.time = Some(self.text_layer(compositor, frame, layout::TIME_STYLE));
        }
    }

    pub fn draw_date(&mut self, compositor: &mut impl Compositor) {
        if self.date.is_none() {
            let frame = layout::date_frame(self.shape, &self.bounds);
            self.date = Some(self.text_layer(compositor, frame, layout::DATE_STYLE));
        }
    }

    pub fn draw_week_day(&mut self, compositor: &mut impl Compositor) {
        if self.week_day.is_none() {
            let frame = layout::week_day_frame(self.shape, &self.bounds);
            self.week_day = Some(self.text_layer(compositor, frame, layout::WEEK_DAY_STYLE));
        }
    }

    fn text_layer(
        &self,
        compositor: &mut impl Compositor,
        frame: Rectangle,
        style: TextStyle,
    ) -> LayerId {
        let layer = compositor.create_text_layer(frame);
        compositor.set_text_style(layer, style);
        compositor.add_child(self.window, layer);
        layer
    }

    /// Refresh the time, date and week day text
    pub fn update_time(
        &self,
        compositor: &mut impl Compositor,
        now: &PrimitiveDateTime,
        style: HourStyle,
        language: Language,
    ) {
        let text = ClockText::new(now, style, language);
        if let Some(layer) = self.time {
            compositor.set_text(layer, &text.time);
        }
        if let Some(layer) = self.date {
            compositor.set_text(layer, &text.date);
        }
        if let Some(layer) = self.week_day {
            compositor.set_text(layer, &text.week_day);
        }
    }

    /// Remember the new charge and schedule a repaint of the bar
    pub fn update_battery_line(&mut self, compositor: &mut impl Compositor, state: &ChargeState) {
        self.drained = state.drained();
        if let Some(layer) = self.battery_line {
            compositor.mark_dirty(layer);
        }
    }

    pub fn drained(&self) -> u8 {
        self.drained
    }

    pub fn battery_layer(&self) -> Option<LayerId> {
        self.battery_line
    }

    pub fn time_layer(&self) -> Option<LayerId> {
        self.time
    }

    pub fn date_layer(&self) -> Option<LayerId> {
        self.date
    }

    pub fn week_day_layer(&self) -> Option<LayerId> {
        self.week_day
    }

    pub fn line_layer(&self) -> Option<LayerId> {
        self.line
    }

    pub fn layer_count(&self) -> usize {
        [self.time, self.date, self.week_day, self.line, self.battery_line]
            .iter()
            .filter(|l| l.is_some())
            .count()
    }

    /// Paint `layer` if it is one of ours and is not a text layer.
    ///
    /// Returns `Ok(false)` for layers this registry does not draw.
    pub fn redraw<D>(&self, layer: LayerId, display: &mut D) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        if Some(layer) == self.line {
            draw::draw_line(display, &LINE_PATH)?;
            Ok(true)
        } else if Some(layer) == self.battery_line {
            draw::draw_battery_line(display, &self.bounds, self.drained)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Hand every layer and the path back to the compositor
    pub fn destroy(mut self, compositor: &mut impl Compositor) {
        let layers = [
            self.time.take(),
            self.date.take(),
            self.week_day.take(),
            self.line.take(),
            self.battery_line.take(),
        ];
        for layer in layers.into_iter().flatten() {
            compositor.destroy_layer(layer);
        }
        if let Some(path) = self.line_path.take() {
            compositor.destroy_path(path);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::MockPlatform;
    use time::{Date, Month, Time};

    fn prepared(mock: &mut MockPlatform) -> LayerRegistry {
        let window = mock.create_window();
        LayerRegistry::prepare(mock, window, Shape::Rect)
    }

    #[test]
    fn prepare_creates_every_layer_once() {
        let mut mock = MockPlatform::default();
        let registry = prepared(&mut mock);
        assert_eq!(registry.layer_count(), LAYER_COUNT);
        assert_eq!(mock.layers_created, LAYER_COUNT);
        assert_eq!(mock.paths_created, 1);
        assert_eq!(mock.children.len(), LAYER_COUNT);
        // bottom to top
        assert_eq!(mock.children[0], registry.line_layer().unwrap());
        assert_eq!(mock.children[4], registry.time_layer().unwrap());
    }

    #[test]
    fn draw_functions_are_idempotent() {
        let mut mock = MockPlatform::default();
        let mut registry = prepared(&mut mock);
        registry.draw_time(&mut mock);
        registry.draw_line(&mut mock);
        assert_eq!(mock.layers_created, LAYER_COUNT);
        assert_eq!(mock.paths_created, 1);
    }

    #[test]
    fn text_layers_get_their_style() {
        let mut mock = MockPlatform::default();
        let registry = prepared(&mut mock);
        let time = registry.time_layer().unwrap();
        assert_eq!(mock.styles[&time], layout::TIME_STYLE);
        assert_eq!(mock.frames[&time], layout::time_frame(Shape::Rect, &mock.bounds));
    }

    #[test]
    fn update_time_sets_all_three_strings() {
        let mut mock = MockPlatform::default();
        let registry = prepared(&mut mock);
        let now = PrimitiveDateTime::new(
            Date::from_calendar_date(2024, Month::March, 5).unwrap(),
            Time::from_hms(14, 5, 0).unwrap(),
        );
        registry.update_time(&mut mock, &now, HourStyle::TwelveHour, Language::English);
        assert_eq!(mock.text(registry.time_layer().unwrap()), "02:05");
        assert_eq!(mock.text(registry.date_layer().unwrap()), "March 05");
        assert_eq!(mock.text(registry.week_day_layer().unwrap()), "Tuesday");
    }

    #[test]
    fn battery_update_only_marks_the_bar() {
        let mut mock = MockPlatform::default();
        let mut registry = prepared(&mut mock);
        registry.update_battery_line(&mut mock, &ChargeState::new(30));
        assert_eq!(registry.drained(), 70);
        assert_eq!(mock.dirty, vec![registry.battery_layer().unwrap()]);
    }

    #[test]
    fn overfull_battery_reads_as_full() {
        let mut mock = MockPlatform::default();
        let mut registry = prepared(&mut mock);
        registry.update_battery_line(&mut mock, &ChargeState::new(30));
        registry.update_battery_line(&mut mock, &ChargeState::new(104));
        assert_eq!(registry.drained(), 0);
        assert_eq!(mock.dirty.len(), 2);
    }

    #[test]
    fn redraw_ignores_text_and_foreign_layers() {
        let mut mock = MockPlatform::default();
        let registry = prepared(&mut mock);
        let mut fb = crate::host::FrameBuffer::new(Shape::Rect);
        assert_eq!(registry.redraw(registry.time_layer().unwrap(), &mut fb), Ok(false));
        assert_eq!(registry.redraw(LayerId(200), &mut fb), Ok(false));
        assert_eq!(registry.redraw(registry.line_layer().unwrap(), &mut fb), Ok(true));
    }

    #[test]
    fn destroy_releases_everything_once() {
        let mut mock = MockPlatform::default();
        let registry = prepared(&mut mock);
        registry.destroy(&mut mock);
        assert_eq!(mock.layers_destroyed, LAYER_COUNT);
        assert_eq!(mock.paths_destroyed, 1);
        assert!(mock.live_layers.is_empty());
    }

    #[test]
    fn partial_registry_destroys_what_it_has() {
        let mut mock = MockPlatform::default();
        let window = mock.create_window();
        let bounds = mock.window_bounds(window);
        let mut registry = LayerRegistry::new(window, bounds, Shape::Rect);
        registry.draw_time(&mut mock);
        registry.destroy(&mut mock);
        assert_eq!(mock.layers_created, 1);
        assert_eq!(mock.layers_destroyed, 1);
        assert_eq!(mock.paths_destroyed, 0);
    }
}
