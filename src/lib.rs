//! # lta-datamall
//!
//! Typed async client for Singapore's Land Transport Authority DataMall API.
//!
//! ## Design Philosophy
//!
//! lta-datamall is designed to be:
//! - **Thin** - One typed call per DataMall endpoint, records passed through as served
//! - **Uniform** - Every call shares one request pipeline and one error taxonomy
//! - **Concurrency-safe** - A single client can be shared by any number of tasks
//! - **Library-first** - No CLI, no caching, no hidden retries
//!
//! ## Quick Start
//!
//! ```no_run
//! use lta_datamall::{Config, DataMallClient, TrainLine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DataMallClient::new(Config::default())?;
//!     client.configure("my-account-key").await;
//!
//!     // Single-shot call
//!     let arrivals = client.bus_arrivals("83139", None).await?;
//!     for service in &arrivals.services {
//!         println!("{}: {:?}", service.service_no, service.next_bus.estimated_arrival());
//!     }
//!
//!     // Paginated call, all pages collected
//!     let stops = client.bus_stops().await?;
//!     println!("{} bus stops", stops.len());
//!
//!     // Parameterised call
//!     let crowd = client.station_crowd_realtime(TrainLine::Ewl).await?;
//!     println!("{} stations", crowd.len());
//!
//!     // Bulk dataset via a signed link
//!     let dataset = client.download_passenger_volume_by_bus_stop().await?;
//!     dataset.save("./datasets", Default::default()).await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// DataMall client (session key, request pipeline, endpoint calls)
pub mod client;
/// Configuration types
pub mod config;
/// Downloaded bulk datasets
pub mod dataset;
/// Endpoint catalog
pub mod endpoint;
/// Error types
pub mod error;
/// Payload records
pub mod models;
/// Opt-in retry with exponential backoff
pub mod retry;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use client::{DataMallClient, PAGE_SIZE};
pub use config::{Config, FileCollisionAction, RetryConfig};
pub use dataset::{ArchiveEntry, DatasetFile};
pub use endpoint::Endpoint;
pub use error::{Error, Result};
pub use models::{TrainLine, ValueEnvelope};
