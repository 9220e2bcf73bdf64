//! Buildlight Device
//!
//! Renderer for the blink(1) USB notification LED. Opens the first attached
//! device over HID and plays a compiled pattern by writing one
//! fade-to-color feature report per frame.

use std::thread;
use std::time::Duration;

use buildlight_core::pattern::{Frame, Pattern};
use hidapi::{HidApi, HidDevice, HidError};
use thiserror::Error;
use tracing::debug;

/// blink(1) USB vendor id.
pub const VENDOR_ID: u16 = 0x27b8;
/// blink(1) USB product id.
pub const PRODUCT_ID: u16 = 0x01ed;

/// Errors raised while opening or driving the LED.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// No blink(1) is attached
    #[error("no blink(1) device found")]
    NotFound,

    /// HID transport failure
    #[error("HID error: {0}")]
    Hid(#[from] HidError),
}

/// Result type alias for device operations
pub type Result<T> = std::result::Result<T, DeviceError>;

/// An open handle onto one blink(1).
///
/// The underlying HID handle is released when the value is dropped,
/// whatever the outcome of rendering.
pub struct Blink1 {
    device: HidDevice,
}

impl Blink1 {
    /// Open the first attached blink(1).
    pub fn open_first() -> Result<Self> {
        let api = HidApi::new()?;

        let present = api
            .device_list()
            .any(|info| info.vendor_id() == VENDOR_ID && info.product_id() == PRODUCT_ID);
        if !present {
            return Err(DeviceError::NotFound);
        }

        let device = api.open(VENDOR_ID, PRODUCT_ID)?;
        debug!("opened blink(1)");

        Ok(Self { device })
    }

    /// Play a pattern: one pass, plus one extra pass per `repeat`.
    ///
    /// The repeat delay runs after each full pass.
    pub fn play(&mut self, pattern: &Pattern) -> Result<()> {
        debug!(
            frames = pattern.frames.len(),
            repeat = pattern.repeat,
            "playing pattern"
        );

        for _ in 0..=pattern.repeat {
            for frame in &pattern.frames {
                self.show(frame)?;
                thread::sleep(frame.duration);
            }
            thread::sleep(pattern.repeat_delay);
        }

        Ok(())
    }

    /// Set one frame's color. Holding it for the frame duration is the
    /// caller's concern (`play` does it).
    pub fn show(&mut self, frame: &Frame) -> Result<()> {
        self.device
            .send_feature_report(&fade_report(frame.red, frame.green, frame.blue, Duration::ZERO))?;
        Ok(())
    }

    /// Turn the LED off immediately.
    pub fn off(&mut self) -> Result<()> {
        self.device
            .send_feature_report(&fade_report(0, 0, 0, Duration::ZERO))?;
        Ok(())
    }
}

/// Encode a fade-to-color feature report.
///
/// Layout: report id, 'c' command, r, g, b, fade time in 10ms units split
/// across two bytes, led index (0 = all), padding.
fn fade_report(red: u8, green: u8, blue: u8, fade: Duration) -> [u8; 9] {
    let units = (fade.as_millis() / 10).min(u128::from(u16::MAX)) as u16;
    [
        1,
        b'c',
        red,
        green,
        blue,
        (units >> 8) as u8,
        (units & 0xff) as u8,
        0,
        0,
    ]
}
