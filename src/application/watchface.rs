//! Watchface
//!
//! Creates the window, builds the layers when it loads, keeps them up to date
//! from platform events and tears everything down when it unloads.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use time::PrimitiveDateTime;

use crate::application::format::HourStyle;
use crate::application::layers::LayerRegistry;
use crate::application::layout::Shape;
use crate::application::locale::Language;
use crate::system::bms::ChargeState;
use crate::system::event::{Event, Service, TimeUnit, TimeUnits};
use crate::system::gfx::{LayerId, WindowId};
use crate::system::Platform;

/// Services held while the window is loaded
pub const SERVICES: [Service; 3] = [
    Service::Tick(TimeUnit::Minute),
    Service::Battery,
    Service::Connection,
];

/// State that only exists between load and unload
struct Loaded {
    layers: LayerRegistry,
    language: Language,
    connected: bool,
}

pub struct Watchface {
    window: WindowId,
    shape: Shape,
    loaded: Option<Loaded>,
}

impl Watchface {
    /// Create the window and push it, the platform will follow up with
    /// [`Event::Load`]
    pub fn init(platform: &mut impl Platform) -> Self {
        Self::with_shape(platform, Shape::default())
    }

    pub fn with_shape(platform: &mut impl Platform, shape: Shape) -> Self {
        let window = platform.create_window();
        platform.push_window(window, true);
        debug!("Done initializing, pushed window: {:?}", window);
        Self {
            window,
            shape,
            loaded: None,
        }
    }

    /// Destroy the window, unloading it first if the platform did not
    pub fn deinit(mut self, platform: &mut impl Platform) {
        if self.loaded.is_some() {
            debug!("window {:?} still loaded at exit", self.window);
            self.unload(platform);
        }
        platform.destroy_window(self.window);
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// The registry of the loaded window
    pub fn layers(&self) -> Option<&LayerRegistry> {
        self.loaded.as_ref().map(|l| &l.layers)
    }

    pub fn is_connected(&self) -> bool {
        self.loaded.as_ref().map_or(false, |l| l.connected)
    }

    /// Route a platform event to its handler
    pub fn handle(&mut self, platform: &mut impl Platform, event: Event) {
        match event {
            Event::Load => self.load(platform),
            Event::Unload => self.unload(platform),
            Event::Tick { time, units } => self.handle_minute(platform, &time, units),
            Event::Battery(state) => self.handle_battery(platform, state),
            Event::Connection(connected) => self.handle_connection(connected),
        }
    }

    fn load(&mut self, platform: &mut impl Platform) {
        if self.loaded.is_some() {
            warn!("window {:?} loaded twice", self.window);
            return;
        }
        let language = Language::from_locale(platform.locale());
        let layers = LayerRegistry::prepare(platform, self.window, self.shape);
        for service in SERVICES {
            platform.subscribe(service);
        }
        self.loaded = Some(Loaded {
            layers,
            language,
            connected: false,
        });
        info!("window {:?} loaded, language {:?}", self.window, language);

        // don't show a blank face until the first events arrive
        let now = platform.local_time();
        self.update_time(platform, &now);
        let battery = platform.battery_peek();
        self.handle_battery(platform, battery);
        let connected = platform.connection_peek();
        self.handle_connection(connected);
    }

    fn unload(&mut self, platform: &mut impl Platform) {
        let loaded = match self.loaded.take() {
            Some(loaded) => loaded,
            None => {
                warn!("window {:?} unloaded while not loaded", self.window);
                return;
            }
        };
        for service in SERVICES {
            platform.unsubscribe(service);
        }
        loaded.layers.destroy(platform);
        info!("window {:?} unloaded", self.window);
    }

    pub fn handle_minute(
        &mut self,
        platform: &mut impl Platform,
        now: &PrimitiveDateTime,
        units: TimeUnits,
    ) {
        trace!("tick {:?}", units);
        self.update_time(platform, now);
    }

    fn update_time(&mut self, platform: &mut impl Platform, now: &PrimitiveDateTime) {
        let style = HourStyle::from_24h(platform.is_24h_style());
        match &self.loaded {
            Some(loaded) => loaded.layers.update_time(platform, now, style, loaded.language),
            None => warn!("tick while unloaded"),
        }
    }

    pub fn handle_battery(&mut self, platform: &mut impl Platform, state: ChargeState) {
        match &mut self.loaded {
            Some(loaded) => loaded.layers.update_battery_line(platform, &state),
            None => warn!("battery event while unloaded"),
        }
    }

    pub fn handle_connection(&mut self, connected: bool) {
        match &mut self.loaded {
            Some(loaded) => {
                loaded.connected = connected;
                Self::update_bluetooth(connected);
            }
            None => warn!("connection event while unloaded"),
        }
    }

    // The indicator has no layer yet, the state is only recorded
    fn update_bluetooth(connected: bool) {
        debug!("companion app connected: {}", connected);
    }

    /// Paint one of the face's own layers onto `display`.
    ///
    /// Returns `Ok(false)` when the window is unloaded or the layer is not
    /// ours to draw.
    pub fn redraw<D>(&self, layer: LayerId, display: &mut D) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        match &self.loaded {
            Some(loaded) => loaded.layers.redraw(layer, display),
            None => Ok(false),
        }
    }
}
