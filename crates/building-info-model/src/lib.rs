// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building-Info Model - Component tree and query engine for building documents
//!
//! This crate provides the core abstractions for answering aggregate questions
//! about a building: a composite tree of levels and rooms, recursive
//! aggregation of room attributes, name-based lookup and threshold filtering.
//! Parser backends implement [`BuildingParser`] to produce the tree.
//!
//! # Architecture
//!
//! - [`Component`] - Capability set shared by every node (ids, names, sums)
//! - [`BuildingComponent`] - Tagged node variant: building, level or room
//! - [`BuildingParser`] - Entry point for turning a document into a tree
//! - [`query`] - Locator, aggregation and threshold queries
//! - [`report`] - Serializable query results
//!
//! # Example
//!
//! ```ignore
//! use building_info_model::{query, BuildingParser};
//!
//! let building = parser.parse(json)?;
//! let total = query::area(&building, None)?;
//! let office = query::area(&building, Some("Office 101"))?;
//! println!("{total} m² in total, {office} m² in the office");
//! ```

pub mod component;
pub mod error;
pub mod metrics;
pub mod query;
pub mod report;
pub mod traits;
pub mod types;

// Re-export all public types
pub use component::*;
pub use error::*;
pub use metrics::*;
pub use report::*;
pub use traits::*;
pub use types::*;
