//! Orbit crate - animation core of the Bloom Orbit demo
//!
//! Everything here is engine-agnostic and runs without a GPU. The engine
//! plugs in through the collaborator traits in [`host`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  ParamChange   ┌──────────────────────────────┐
//! │  ParamPanel  │ ─────────────▶ │         FrameDriver          │
//! │ (own values) │  bounded chan  │  1. drain changes            │
//! └──────────────┘                │  2. sync_size                │
//!                                 │  3. OrbitAnimator::animate   │
//!                                 │  4. PostProcess::render      │
//!                                 │  5. FrameScheduler           │
//!                                 └──────────────────────────────┘
//!                                   │ RenderTarget │ CameraProjection
//!                                   │ PostProcess  │ SceneGraph
//!                                   ▼              ▼
//!                                  rendering engine (host)
//! ```
//!
//! # Example
//!
//! ```rust
//! use orbit::{param_channel, AnimationParams, OrbitBodies, OrbitLayout, FrameDriver};
//!
//! let (sender, inbox) = param_channel(16);
//! let bodies = OrbitBodies::from_layout(&OrbitLayout::default()).unwrap();
//! let driver = FrameDriver::new(bodies, AnimationParams::default(), inbox);
//! assert_eq!(driver.bodies().len(), 4);
//! # drop(sender);
//! ```

pub mod animator;
pub mod binding;
pub mod body;
pub mod channel;
pub mod clock;
pub mod config;
pub mod driver;
mod error;
pub mod host;
pub mod panel;
pub mod params;

pub use animator::{orbit_angle, orbit_position, OrbitAnimator};
pub use binding::{apply_change, sync_bloom};
pub use body::{BodyId, OrbitBodies, OrbitBody, OrbitLayout, Rgb, MAX_BODIES};
pub use channel::{param_channel, ParamInbox, ParamSender, DEFAULT_QUEUE_CAPACITY};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{CameraConfig, DemoConfig, OrbitConfig, PanelConfig, WindowConfig};
pub use driver::{sync_size, FrameContext, FrameDriver, FrameReport, FrameState};
pub use error::{Error, Result};
pub use host::{
    BloomPass, CameraProjection, Extent, FrameScheduler, PostProcess, RenderTarget, SceneGraph,
};
pub use panel::{ControlGroup, ControlSpec, ParamPanel};
pub use params::{AnimationParams, Binding, ParamChange, ParamField, ParamRange};

// Re-export glam for convenience
pub use glam;
