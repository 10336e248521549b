//! Host
//!
//! A self contained platform for the face: one window, a fixed pool of layers
//! and paths, the subscription table and an event queue. Hardware glue feeds
//! it readings through the `set_*` methods, drains events into the face with
//! [`Host::dispatch`] and paints with [`Host::render`].

use embedded_graphics::draw_target::DrawTargetExt;
use embedded_graphics::mono_font::iso_8859_1::{FONT_10X20, FONT_9X18_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::spsc::Queue;
use heapless::{String, Vec};
use time::PrimitiveDateTime;

use crate::application::layout::Shape;
use crate::application::Watchface;
use crate::system::bms::ChargeState;
use crate::system::event::{Event, Service, TimeUnit, TimeUnits};
use crate::system::gfx::{
    FontKey, LayerId, PathId, PathInfo, TextAlignment, TextStyle, WindowId, INK, PAPER,
};
use crate::system::{BatteryManagement, Clock, Compositor, Connectivity, Services};

mod framebuffer;

pub use self::framebuffer::FrameBuffer;

pub const MAX_LAYERS: usize = 8;
pub const MAX_PATHS: usize = 2;
/// Longest text a text layer keeps, in bytes
pub const TEXT_LEN: usize = 16;
const LOCALE_LEN: usize = 8;
// spsc queues hold one less than their size
const QUEUE_LEN: usize = 16;

const DEFAULT_TEXT_STYLE: TextStyle = TextStyle {
    font: FontKey::Gothic24Bold,
    color: INK,
    background: Some(PAPER),
    alignment: TextAlignment::Left,
};

/// The monospace font standing in for a system font
pub fn system_font(key: FontKey) -> &'static MonoFont<'static> {
    match key {
        FontKey::Bitham42Bold => &FONT_10X20,
        FontKey::Gothic24Bold => &FONT_9X18_BOLD,
    }
}

enum Content {
    /// Painted by the face
    Custom,
    Text {
        text: String<TEXT_LEN>,
        style: TextStyle,
    },
}

struct LayerSlot {
    frame: Rectangle,
    content: Content,
    dirty: bool,
}

struct WindowState {
    id: WindowId,
    pushed: bool,
    loaded: bool,
    children: Vec<LayerId, MAX_LAYERS>,
}

pub struct Host {
    shape: Shape,
    now: PrimitiveDateTime,
    is_24h: bool,
    locale: String<LOCALE_LEN>,
    battery: ChargeState,
    connected: bool,
    tick: Option<TimeUnit>,
    battery_service: bool,
    connection_service: bool,
    window: Option<WindowState>,
    next_window: u8,
    layers: Vec<Option<LayerSlot>, MAX_LAYERS>,
    paths: Vec<Option<&'static PathInfo>, MAX_PATHS>,
    events: Queue<Event, QUEUE_LEN>,
}

impl Host {
    pub fn new(shape: Shape, now: PrimitiveDateTime) -> Self {
        let mut locale = String::new();
        locale.push_str("en_US").ok();
        Self {
            shape,
            now,
            is_24h: true,
            locale,
            battery: ChargeState::default(),
            connected: false,
            tick: None,
            battery_service: false,
            connection_service: false,
            window: None,
            next_window: 0,
            layers: Vec::new(),
            paths: Vec::new(),
            events: Queue::new(),
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn set_24h_style(&mut self, is_24h: bool) {
        self.is_24h = is_24h;
    }

    /// Longer locales are ignored, only the language prefix matters anyway
    pub fn set_locale(&mut self, locale: &str) {
        let mut value = String::new();
        if value.push_str(locale).is_ok() {
            self.locale = value;
        } else {
            warn!("locale {:?} too long, keeping {:?}", locale, self.locale.as_str());
        }
    }

    /// New wall clock reading, queues a tick if a subscribed unit changed
    pub fn set_time(&mut self, now: PrimitiveDateTime) {
        let units = TimeUnits::between(&self.now, &now);
        self.now = now;
        if let Some(unit) = self.tick {
            if units.intersects(unit.and_coarser()) {
                self.queue(Event::Tick { time: now, units });
            }
        }
    }

    pub fn set_battery(&mut self, state: ChargeState) {
        if state != self.battery {
            self.battery = state;
            if self.battery_service {
                self.queue(Event::Battery(state));
            }
        }
    }

    pub fn set_connected(&mut self, connected: bool) {
        if connected != self.connected {
            self.connected = connected;
            if self.connection_service {
                self.queue(Event::Connection(connected));
            }
        }
    }

    /// Take the window off the stack, the face unloads on the next dispatch
    pub fn pop_window(&mut self) {
        match &mut self.window {
            Some(window) if window.pushed => {
                window.pushed = false;
                self.queue(Event::Unload);
            }
            _ => warn!("nothing to pop"),
        }
    }

    fn queue(&mut self, event: Event) {
        if let Err(event) = self.events.enqueue(event) {
            error!("event queue full, dropping {:?}", event);
        }
    }

    /// Is anyone still listening for this event?
    fn wanted(&self, event: &Event) -> bool {
        match event {
            Event::Load | Event::Unload => true,
            Event::Tick { .. } => self.tick.is_some(),
            Event::Battery(_) => self.battery_service,
            Event::Connection(_) => self.connection_service,
        }
    }

    /// Deliver every queued event to the face, returns how many were handled
    pub fn dispatch(&mut self, face: &mut Watchface) -> usize {
        let mut handled = 0;
        while let Some(event) = self.events.dequeue() {
            if !self.wanted(&event) {
                trace!("dropping {:?}, no subscriber", event);
                continue;
            }
            if event == Event::Load {
                if let Some(window) = &mut self.window {
                    window.loaded = true;
                }
            }
            face.handle(self, event);
            if event == Event::Unload {
                if let Some(window) = &mut self.window {
                    window.loaded = false;
                }
            }
            handled += 1;
        }
        handled
    }

    /// Repaint the window if any of its layers is dirty.
    ///
    /// Returns the number of layers drawn, zero when nothing needed painting
    /// or the window is not loaded.
    pub fn render<D>(&mut self, face: &Watchface, display: &mut D) -> Result<usize, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let children = match &self.window {
            Some(window) if window.loaded => window.children.clone(),
            _ => return Ok(0),
        };
        if !children.iter().any(|layer| self.slot(*layer).dirty) {
            return Ok(0);
        }

        display.clear(PAPER)?;
        for layer in children.iter().copied() {
            let slot = self.slot(layer);
            let mut clipped = display.clipped(&slot.frame);
            match &slot.content {
                Content::Text { text, style } => {
                    draw_text(&mut clipped, &slot.frame, text, style)?;
                }
                Content::Custom => {
                    if !face.redraw(layer, &mut clipped)? {
                        warn!("{:?} has no draw routine", layer);
                    }
                }
            }
        }
        for layer in children.iter().copied() {
            self.slot_mut(layer).dirty = false;
        }
        Ok(children.len())
    }

    pub fn is_loaded(&self) -> bool {
        self.window.as_ref().map_or(false, |w| w.loaded)
    }

    pub fn has_window(&self) -> bool {
        self.window.is_some()
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }

    pub fn is_subscribed(&self, service: Service) -> bool {
        match service {
            Service::Tick(unit) => self.tick == Some(unit),
            Service::Battery => self.battery_service,
            Service::Connection => self.connection_service,
        }
    }

    pub fn live_layers(&self) -> usize {
        self.layers.iter().filter(|s| s.is_some()).count()
    }

    pub fn live_paths(&self) -> usize {
        self.paths.iter().filter(|p| p.is_some()).count()
    }

    /// Text of a live text layer
    pub fn text(&self, layer: LayerId) -> Option<&str> {
        match self.layers.get(layer.0 as usize) {
            Some(Some(LayerSlot {
                content: Content::Text { text, .. },
                ..
            })) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn is_dirty(&self, layer: LayerId) -> bool {
        matches!(self.layers.get(layer.0 as usize), Some(Some(slot)) if slot.dirty)
    }

    fn slot(&self, layer: LayerId) -> &LayerSlot {
        match self.layers.get(layer.0 as usize) {
            Some(Some(slot)) => slot,
            _ => panic!("unknown layer {:?}", layer),
        }
    }

    fn slot_mut(&mut self, layer: LayerId) -> &mut LayerSlot {
        match self.layers.get_mut(layer.0 as usize) {
            Some(Some(slot)) => slot,
            _ => panic!("unknown layer {:?}", layer),
        }
    }

    fn window_mut(&mut self, id: WindowId) -> &mut WindowState {
        match &mut self.window {
            Some(window) if window.id == id => window,
            _ => panic!("unknown window {:?}", id),
        }
    }

    fn alloc_layer(&mut self, frame: Rectangle, content: Content) -> LayerId {
        let slot = LayerSlot {
            frame,
            content,
            dirty: true,
        };
        if let Some(idx) = self.layers.iter().position(|s| s.is_none()) {
            self.layers[idx] = Some(slot);
            return LayerId(idx as u8);
        }
        let idx = self.layers.len();
        if self.layers.push(Some(slot)).is_err() {
            panic!("out of layers, {} in use", MAX_LAYERS);
        }
        LayerId(idx as u8)
    }
}

fn draw_text<D>(
    display: &mut D,
    frame: &Rectangle,
    text: &str,
    style: &TextStyle,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let mut character = MonoTextStyleBuilder::new()
        .font(system_font(style.font))
        .text_color(style.color);
    if let Some(background) = style.background {
        character = character.background_color(background);
    }
    let width = frame.size.width as i32;
    let (alignment, x) = match style.alignment {
        TextAlignment::Left => (Alignment::Left, 0),
        TextAlignment::Center => (Alignment::Center, width / 2),
        TextAlignment::Right => (Alignment::Right, width - 1),
    };
    let text_style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Top)
        .build();
    Text::with_text_style(
        text,
        frame.top_left + Point::new(x, 0),
        character.build(),
        text_style,
    )
    .draw(display)?;
    Ok(())
}

impl Clock for Host {
    fn local_time(&self) -> PrimitiveDateTime {
        self.now
    }

    fn is_24h_style(&self) -> bool {
        self.is_24h
    }

    fn locale(&self) -> &str {
        self.locale.as_str()
    }
}

impl BatteryManagement for Host {
    fn battery_peek(&self) -> ChargeState {
        self.battery
    }
}

impl Connectivity for Host {
    fn connection_peek(&self) -> bool {
        self.connected
    }
}

impl Services for Host {
    fn subscribe(&mut self, service: Service) {
        debug!("subscribe {:?}", service);
        match service {
            Service::Tick(unit) => self.tick = Some(unit),
            Service::Battery => self.battery_service = true,
            Service::Connection => self.connection_service = true,
        }
    }

    fn unsubscribe(&mut self, service: Service) {
        debug!("unsubscribe {:?}", service);
        match service {
            Service::Tick(_) => self.tick = None,
            Service::Battery => self.battery_service = false,
            Service::Connection => self.connection_service = false,
        }
    }
}

impl Compositor for Host {
    fn create_window(&mut self) -> WindowId {
        if let Some(window) = &self.window {
            panic!("{:?} still exists, only one window at a time", window.id);
        }
        let id = WindowId(self.next_window);
        self.next_window = self.next_window.wrapping_add(1);
        self.window = Some(WindowState {
            id,
            pushed: false,
            loaded: false,
            children: Vec::new(),
        });
        id
    }

    fn push_window(&mut self, window: WindowId, animated: bool) {
        let state = self.window_mut(window);
        if state.pushed {
            warn!("{:?} already pushed", window);
            return;
        }
        state.pushed = true;
        debug!("push {:?} animated: {}", window, animated);
        self.queue(Event::Load);
    }

    fn destroy_window(&mut self, window: WindowId) {
        let state = self.window_mut(window);
        if state.loaded {
            warn!("{:?} destroyed while loaded", window);
        }
        if !state.children.is_empty() {
            error!("{:?} destroyed with {} layers attached", window, state.children.len());
        }
        self.window = None;
        // whatever is still queued was meant for this window
        if !self.events.is_empty() {
            debug!("dropping {} pending events of {:?}", self.events.len(), window);
            self.events = Queue::new();
        }
    }

    fn window_bounds(&self, _window: WindowId) -> Rectangle {
        Rectangle::new(Point::zero(), self.shape.screen_size())
    }

    fn create_layer(&mut self, frame: Rectangle) -> LayerId {
        self.alloc_layer(frame, Content::Custom)
    }

    fn create_text_layer(&mut self, frame: Rectangle) -> LayerId {
        self.alloc_layer(
            frame,
            Content::Text {
                text: String::new(),
                style: DEFAULT_TEXT_STYLE,
            },
        )
    }

    fn set_text_style(&mut self, layer: LayerId, new_style: TextStyle) {
        let slot = self.slot_mut(layer);
        match &mut slot.content {
            Content::Text { style, .. } => {
                *style = new_style;
                slot.dirty = true;
            }
            Content::Custom => warn!("{:?} is not a text layer", layer),
        }
    }

    fn set_text(&mut self, layer: LayerId, new_text: &str) {
        let slot = self.slot_mut(layer);
        match &mut slot.content {
            Content::Text { text, .. } => {
                text.clear();
                for c in new_text.chars() {
                    if text.push(c).is_err() {
                        warn!("text for {:?} truncated", layer);
                        break;
                    }
                }
                slot.dirty = true;
            }
            Content::Custom => warn!("{:?} is not a text layer", layer),
        }
    }

    fn add_child(&mut self, window: WindowId, layer: LayerId) {
        self.slot_mut(layer).dirty = true;
        let state = self.window_mut(window);
        if state.children.contains(&layer) {
            warn!("{:?} already a child of {:?}", layer, window);
        } else if state.children.push(layer).is_err() {
            panic!("{:?} has too many children", window);
        }
    }

    fn mark_dirty(&mut self, layer: LayerId) {
        self.slot_mut(layer).dirty = true;
    }

    fn destroy_layer(&mut self, layer: LayerId) {
        match self.layers.get_mut(layer.0 as usize) {
            Some(slot) if slot.is_some() => *slot = None,
            _ => panic!("{:?} destroyed twice", layer),
        }
        if let Some(window) = &mut self.window {
            if let Some(pos) = window.children.iter().position(|l| *l == layer) {
                // keep the stacking order of the rest
                let children = &mut window.children;
                for i in pos..children.len() - 1 {
                    children[i] = children[i + 1];
                }
                children.pop();
            }
        }
    }

    fn create_path(&mut self, info: &'static PathInfo) -> PathId {
        if let Some(idx) = self.paths.iter().position(|p| p.is_none()) {
            self.paths[idx] = Some(info);
            return PathId(idx as u8);
        }
        let idx = self.paths.len();
        if self.paths.push(Some(info)).is_err() {
            panic!("out of paths, {} in use", MAX_PATHS);
        }
        PathId(idx as u8)
    }

    fn destroy_path(&mut self, path: PathId) {
        match self.paths.get_mut(path.0 as usize) {
            Some(slot) if slot.is_some() => *slot = None,
            _ => panic!("{:?} destroyed twice", path),
        }
    }
}
