//! Edge-watching inputs
//!
//! Each interrupt line gets one `EdgeInput`. It waits for a falling edge,
//! tells the handler which source fired and, for the push button, waits
//! out contact bounce before arming again. Nothing here touches a bus;
//! the coordinator does the work on its next tick.

use canopy_core::{EdgeHandler, EdgeSource};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;

/// Time the button contacts are given to settle after a press
pub const BUTTON_SETTLE_MS: u32 = 50;

/// One edge-triggered input line
pub struct EdgeInput<P, D> {
    pin: P,
    delay: D,
    source: EdgeSource,
    settle_ms: u32,
}

impl<P: Wait, D: DelayNs> EdgeInput<P, D> {
    /// Sensor interrupt line: open-drain output of a sensor, no bounce
    pub fn sensor(pin: P, delay: D, source: EdgeSource) -> Self {
        Self {
            pin,
            delay,
            source,
            settle_ms: 0,
        }
    }

    /// Push button line, debounced
    pub fn button(pin: P, delay: D) -> Self {
        Self {
            pin,
            delay,
            source: EdgeSource::Button,
            settle_ms: BUTTON_SETTLE_MS,
        }
    }

    pub fn source(&self) -> EdgeSource {
        self.source
    }

    /// Wait for the next falling edge and report it
    pub async fn next_edge<H: EdgeHandler>(&mut self, handler: &H) -> Result<(), P::Error> {
        self.pin.wait_for_falling_edge().await?;
        handler.on_edge(self.source);
        if self.settle_ms > 0 {
            self.delay.delay_ms(self.settle_ms).await;
        }
        Ok(())
    }

    /// Report edges until the pin fails
    pub async fn run<H: EdgeHandler>(&mut self, handler: &H) -> P::Error {
        loop {
            if let Err(e) = self.next_edge(handler).await {
                return e;
            }
        }
    }
}
