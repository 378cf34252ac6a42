//! Edge-watching task
//!
//! One instance per interrupt line. Each waits on its pin and raises the
//! matching flag in [`FLAGS`].

use core::convert::Infallible;

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Delay;

use canopy_core::InterruptFlags;
use canopy_drivers::input::EdgeInput;

/// Flags shared between the edge tasks and the tick loop
///
/// Sensor flags start pending so the first tick takes initial readings.
pub static FLAGS: InterruptFlags = InterruptFlags::primed();

/// Edge task - reports falling edges on one line forever
#[embassy_executor::task(pool_size = 3)]
pub async fn edge_task(mut input: EdgeInput<Input<'static>, Delay>) {
    info!("Edge task started: {}", input.source());

    let error: Infallible = input.run(&FLAGS).await;
    match error {}
}
