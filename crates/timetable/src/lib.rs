//! # Keyway Timetable
//!
//! Flight timetable client built on [`keyway_value`] extraction.
//!
//! A [`TimeTableService`] asks its injected [`TimeTableDataProvider`] for the
//! timetable document and turns the root list into [`TimeTableEntity`]
//! values. Rows that fail to convert are dropped unless the service runs in
//! strict mode (see [`TimeTableConfig::lenient`]).
//!
//! ## Usage
//!
//! ```rust
//! use keyway_timetable::{StaticDataProvider, TimeTableConfig, TimeTableService};
//!
//! # let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # runtime.block_on(async {
//! let payload = r#"[{"id": 5, "price_in_euros": "12.5", "departure_time": "08:30",
//!                    "arrival_time": "09:15", "number_of_stops": 0}]"#;
//! let service = TimeTableService::new(StaticDataProvider::new(payload), TimeTableConfig::default());
//!
//! let timetable = service.flight_timetable().await.unwrap();
//! assert_eq!(timetable[0].number_of_stops_description(), "Direct");
//! # });
//! ```

#![deny(unused_must_use)]
#![warn(missing_docs)]

pub mod config;
pub mod entity;
pub mod error;
pub mod provider;
pub mod service;

pub use config::TimeTableConfig;
pub use entity::TimeTableEntity;
pub use error::{ProviderError, ServiceError};
pub use provider::{StaticDataProvider, TimeTableDataProvider, ValueDataProvider};
pub use service::TimeTableService;
