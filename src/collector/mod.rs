//! Lightware device collector.
//!
//! One collection cycle fans out over the configured devices, one
//! thread each, and joins before returning:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        gather                            │
//! │   ┌────────────────┐  ┌────────────────┐                 │
//! │   │ collect_device │  │ collect_device │   ... one per   │
//! │   │  identity tags │  │  identity tags │       device    │
//! │   │  path loop     │  │  path loop     │                 │
//! │   └───────┬────────┘  └───────┬────────┘                 │
//! │           │                   │                          │
//! │    ┌──────▼──────┐     ┌──────▼──────┐                   │
//! │    │  HttpFetch  │     │ MetricSink  │     (traits)      │
//! │    └──────┬──────┘     └─────────────┘                   │
//! └───────────┼──────────────────────────────────────────────┘
//!             │
//!     ┌───────┴────────┐
//!     │                │
//! ┌───▼────────────┐ ┌─▼────────┐
//! │ ReqwestFetcher │ │ MockHttp │
//! │ (production)   │ │ (tests)  │
//! └────────────────┘ └──────────┘
//! ```
//!
//! Within a device, identity tags are always resolved before the
//! configured paths, and the paths run sequentially in configured
//! order. Across devices there is no ordering at all.

mod device;
pub mod mock;
pub mod traits;
pub mod value;

/// Measurement name under which every record is emitted.
pub const MEASUREMENT: &str = "lightware";

pub use device::{collect_device, gather};
pub use traits::{FetchError, HttpFetch, ReqwestFetcher};
pub use value::{FieldType, ValueError, parse_value};
