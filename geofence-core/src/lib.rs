//! # Geofence Core
//!
//! Platform-independent geofence evaluation engine for devices that receive
//! periodic location fixes.
//!
//! This crate contains pure classification and event logic with **zero I/O
//! dependencies**. The location source, the periodic scheduler and zone
//! persistence belong to the application; the engine only defines the
//! shapes they plug into.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  geofence-core (platform-independent, no tokio/async deps)  │
//! │  ├── geo/         (haversine distance)                      │
//! │  ├── zones/       (circle & polygon zones, ray casting)     │
//! │  ├── transition/  (inside/outside/enter/exit state machine) │
//! │  ├── dispatch/    (subscriber fan-out)                      │
//! │  ├── feed/        (coalescing position sample slot)         │
//! │  └── engine/      (per-tick evaluation pass)                │
//! └─────────────────────────────────────────────────────────────┘
//!          ▲ push_sample                   ▲ tick
//!    ┌─────┴──────────┐            ┌───────┴────────┐
//!    │ location source│            │ scheduler      │
//!    └────────────────┘            └────────────────┘
//! ```
//!
//! ## Event Kinds
//!
//! | Kind      | Fires                                               |
//! |-----------|-----------------------------------------------------|
//! | `Inside`  | every evaluation with the point inside              |
//! | `Outside` | every evaluation with the point outside             |
//! | `Enter`   | the evaluation where the point moves in             |
//! | `Exit`    | the evaluation where the point moves out            |
//! | `Unknown` | never                                               |
//!
//! `Enter` and `Exit` need a previous evaluation: the first one after
//! [`GeofenceEngine::reset`] only records where the point was.
//!
//! ## Example
//!
//! ```rust
//! use geofence_core::{
//!     CallbackContext, GeofenceEngine, GeofenceEventType, GeofenceZone, PositionSample,
//! };
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let mut engine = GeofenceEngine::new(4);
//! engine.init();
//!
//! engine
//!     .set_zone(
//!         0,
//!         GeofenceZone::new_circular(37.76887, -122.48248, 2700.0, GeofenceEventType::Enter),
//!     )
//!     .unwrap();
//!
//! let entered = Arc::new(AtomicUsize::new(0));
//! let counter = entered.clone();
//! engine
//!     .register_callback(move |ctx: &CallbackContext| {
//!         if ctx.event_type == GeofenceEventType::Enter {
//!             counter.fetch_add(1, Ordering::Relaxed);
//!         }
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! // First fix outside the park, then one inside
//! engine.push_sample(PositionSample::new(-37.76887, 122.48248));
//! engine.tick().unwrap();
//! engine.push_sample(PositionSample::new(37.76705, -122.48593));
//! engine.tick().unwrap();
//!
//! assert_eq!(entered.load(Ordering::Relaxed), 1);
//! ```

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod feed;
pub mod geo;
pub mod transition;
pub mod zones;

// Re-export commonly used types
pub use dispatch::{CallbackContext, EventDispatcher, GeofenceCallback};
pub use engine::{GeofenceEngine, GeofenceSettings, ZoneStatus};
pub use error::{GeofenceError, SubscriberError};
pub use feed::{PositionFeed, PositionSample};
pub use transition::{next_transition, BoundaryState, Transition};
pub use zones::{GeofenceEventType, GeofenceZone, PolygonVertex, ZoneShape};
