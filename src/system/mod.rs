//! Platform services
//!
//! The face never talks to hardware or to the windowing system directly. It is
//! handed something implementing [`Platform`] and only ever goes through these
//! traits.

use embedded_graphics::primitives::Rectangle;
use time::PrimitiveDateTime;

use self::bms::ChargeState;
use self::event::Service;
use self::gfx::{LayerId, PathId, PathInfo, TextStyle, WindowId};

pub mod bms;
pub mod event;
pub mod gfx;

pub trait Clock {
    /// Current wall clock time
    fn local_time(&self) -> PrimitiveDateTime;

    /// The user's 12h/24h preference
    fn is_24h_style(&self) -> bool;

    /// System locale, e.g `en_US`
    fn locale(&self) -> &str;
}

pub trait BatteryManagement {
    fn battery_peek(&self) -> ChargeState;
}

pub trait Connectivity {
    /// Is the companion app connected?
    fn connection_peek(&self) -> bool;
}

pub trait Services {
    fn subscribe(&mut self, service: Service);
    fn unsubscribe(&mut self, service: Service);
}

/// Windows, layers and paths.
///
/// Every handle returned here is owned by the caller until it hands it back
/// through the matching `destroy_*`. Handing back an unknown handle is a logic
/// error and implementations are free to panic.
pub trait Compositor {
    fn create_window(&mut self) -> WindowId;
    fn push_window(&mut self, window: WindowId, animated: bool);
    fn destroy_window(&mut self, window: WindowId);
    /// Drawable area of the window's root layer
    fn window_bounds(&self, window: WindowId) -> Rectangle;

    /// A layer whose content is drawn by the face on request
    fn create_layer(&mut self, frame: Rectangle) -> LayerId;
    /// A layer whose content is a string drawn by the platform
    fn create_text_layer(&mut self, frame: Rectangle) -> LayerId;
    fn set_text_style(&mut self, layer: LayerId, style: TextStyle);
    /// Replaces the text of a text layer and marks it dirty
    fn set_text(&mut self, layer: LayerId, text: &str);
    fn add_child(&mut self, window: WindowId, layer: LayerId);
    /// Ask for the layer to be redrawn at the next opportunity
    fn mark_dirty(&mut self, layer: LayerId);
    fn destroy_layer(&mut self, layer: LayerId);

    fn create_path(&mut self, info: &'static PathInfo) -> PathId;
    fn destroy_path(&mut self, path: PathId);
}

pub trait Platform: Clock + BatteryManagement + Connectivity + Services + Compositor {}

impl<T> Platform for T where T: Clock + BatteryManagement + Connectivity + Services + Compositor {}
