//! Utility functions for Candle models

use candle_core::Device;
use candle_core::Result as CandleResult;

/// Get the device to use for Candle operations
pub fn get_device() -> CandleResult<Device> {
    #[cfg(feature = "cuda")]
    {
        if let Ok(device) = Device::new_cuda(0) {
            return Ok(device);
        }
    }

    #[cfg(feature = "metal")]
    {
        if let Ok(device) = Device::new_metal(0) {
            return Ok(device);
        }
    }

    // Default to CPU if no accelerator is available
    Ok(Device::Cpu)
}

/// Index and value of the largest probability in a row.
///
/// Ties resolve to the lowest index. Returns `None` for an empty row.
pub fn argmax(row: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &value) in row.iter().enumerate() {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((idx, value)),
        }
    }
    best
}
