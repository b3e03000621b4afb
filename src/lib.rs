//! # Steam Plume - CPU-simulated, GPU-billboarded steam on wgpu
//!
//! A continuous plume of steam rising from a point emitter. Particles are
//! simulated on the CPU and streamed to the GPU every frame, where each one
//! becomes a soft camera-facing sprite.
//!
//! ## Modules
//!
//! - **Particles**: store, emitter, integrator, transfer buffer and the GPU pipeline
//! - **Core**: wgpu context, renderer, clock and the frame driver
//! - **Camera**: the view/projection seam the billboards orient against
//! - **Math**: the vector and matrix types everything above shares
//!
//! ## Example
//!
//! ```
//! use steam_plume::prelude::*;
//!
//! let config = SteamConfig::builder().seed(42).build().unwrap();
//! let mut simulation = SteamSimulation::new(&config);
//! let mut transfer = TransferBuffer::new(config.capacity);
//!
//! for _ in 0..180 {
//!     simulation.step(1.0 / 60.0);
//!     transfer.serialize(simulation.store());
//! }
//! assert_eq!(transfer.live_count(), simulation.store().len());
//! ```

#![warn(missing_docs)]

pub mod app;
pub mod camera;
pub mod config;
pub mod core;
pub mod math;
pub mod particles;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::camera::*;
    pub use crate::config::*;
    pub use crate::core::*;
    pub use crate::math::*;
    pub use crate::particles::*;
}

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "Steam Plume";
