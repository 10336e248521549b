//! Test doubles

use std::collections::{HashMap, HashSet};
use std::string::String;
use std::vec::Vec;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use time::{Date, Month, PrimitiveDateTime, Time};

use crate::application::layout::Shape;
use crate::system::bms::ChargeState;
use crate::system::event::Service;
use crate::system::gfx::{LayerId, PathId, PathInfo, TextStyle, WindowId};
use crate::system::{BatteryManagement, Clock, Compositor, Connectivity, Services};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 14:05 on Tuesday the 5th of March 2024
pub fn tuesday_afternoon() -> PrimitiveDateTime {
    PrimitiveDateTime::new(
        Date::from_calendar_date(2024, Month::March, 5).unwrap(),
        Time::from_hms(14, 5, 0).unwrap(),
    )
}

/// A platform that records every call made to it
pub struct MockPlatform {
    pub now: PrimitiveDateTime,
    pub is_24h: bool,
    pub locale: String,
    pub battery: ChargeState,
    pub connected: bool,
    pub bounds: Rectangle,

    pub windows_created: usize,
    pub windows_destroyed: Vec<WindowId>,
    pub pushed: Vec<(WindowId, bool)>,
    pub layers_created: usize,
    pub layers_destroyed: usize,
    pub live_layers: HashSet<LayerId>,
    pub paths_created: usize,
    pub paths_destroyed: usize,
    pub children: Vec<LayerId>,
    pub frames: HashMap<LayerId, Rectangle>,
    pub styles: HashMap<LayerId, TextStyle>,
    pub texts: HashMap<LayerId, String>,
    pub texts_set: usize,
    pub dirty: Vec<LayerId>,
    pub subscribes: usize,
    pub unsubscribes: usize,
    pub subscribed: Vec<Service>,
    next_id: u8,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self {
            now: tuesday_afternoon(),
            is_24h: true,
            locale: "en_US".into(),
            battery: ChargeState::default(),
            connected: false,
            bounds: Rectangle::new(Point::zero(), Shape::Rect.screen_size()),
            windows_created: 0,
            windows_destroyed: Vec::new(),
            pushed: Vec::new(),
            layers_created: 0,
            layers_destroyed: 0,
            live_layers: HashSet::new(),
            paths_created: 0,
            paths_destroyed: 0,
            children: Vec::new(),
            frames: HashMap::new(),
            styles: HashMap::new(),
            texts: HashMap::new(),
            texts_set: 0,
            dirty: Vec::new(),
            subscribes: 0,
            unsubscribes: 0,
            subscribed: Vec::new(),
            next_id: 0,
        }
    }
}

impl MockPlatform {
    pub fn text(&self, layer: LayerId) -> &str {
        self.texts.get(&layer).map(|t| t.as_str()).unwrap_or("")
    }

    fn next_id(&mut self) -> u8 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn new_layer(&mut self, frame: Rectangle) -> LayerId {
        let layer = LayerId(self.next_id());
        self.layers_created += 1;
        self.live_layers.insert(layer);
        self.frames.insert(layer, frame);
        layer
    }

    fn assert_live(&self, layer: LayerId) {
        assert!(self.live_layers.contains(&layer), "{:?} used after destroy", layer);
    }
}

impl Clock for MockPlatform {
    fn local_time(&self) -> PrimitiveDateTime {
        self.now
    }

    fn is_24h_style(&self) -> bool {
        self.is_24h
    }

    fn locale(&self) -> &str {
        &self.locale
    }
}

impl BatteryManagement for MockPlatform {
    fn battery_peek(&self) -> ChargeState {
        self.battery
    }
}

impl Connectivity for MockPlatform {
    fn connection_peek(&self) -> bool {
        self.connected
    }
}

impl Services for MockPlatform {
    fn subscribe(&mut self, service: Service) {
        assert!(!self.subscribed.contains(&service), "{:?} subscribed twice", service);
        self.subscribes += 1;
        self.subscribed.push(service);
    }

    fn unsubscribe(&mut self, service: Service) {
        assert!(self.subscribed.contains(&service), "{:?} was not subscribed", service);
        self.unsubscribes += 1;
        self.subscribed.retain(|s| *s != service);
    }
}

impl Compositor for MockPlatform {
    fn create_window(&mut self) -> WindowId {
        self.windows_created += 1;
        WindowId(self.next_id())
    }

    fn push_window(&mut self, window: WindowId, animated: bool) {
        self.pushed.push((window, animated));
    }

    fn destroy_window(&mut self, window: WindowId) {
        assert!(!self.windows_destroyed.contains(&window), "window destroyed twice");
        self.windows_destroyed.push(window);
    }

    fn window_bounds(&self, _window: WindowId) -> Rectangle {
        self.bounds
    }

    fn create_layer(&mut self, frame: Rectangle) -> LayerId {
        self.new_layer(frame)
    }

    fn create_text_layer(&mut self, frame: Rectangle) -> LayerId {
        self.new_layer(frame)
    }

    fn set_text_style(&mut self, layer: LayerId, style: TextStyle) {
        self.assert_live(layer);
        self.styles.insert(layer, style);
    }

    fn set_text(&mut self, layer: LayerId, text: &str) {
        self.assert_live(layer);
        self.texts_set += 1;
        self.texts.insert(layer, text.into());
    }

    fn add_child(&mut self, _window: WindowId, layer: LayerId) {
        self.assert_live(layer);
        self.children.push(layer);
    }

    fn mark_dirty(&mut self, layer: LayerId) {
        self.assert_live(layer);
        self.dirty.push(layer);
    }

    fn destroy_layer(&mut self, layer: LayerId) {
        assert!(self.live_layers.remove(&layer), "{:?} destroyed twice", layer);
        self.layers_destroyed += 1;
        self.children.retain(|l| *l != layer);
    }

    fn create_path(&mut self, _info: &'static PathInfo) -> PathId {
        self.paths_created += 1;
        PathId(self.next_id())
    }

    fn destroy_path(&mut self, _path: PathId) {
        self.paths_destroyed += 1;
    }
}
