//! # boxoffice-entity
//!
//! Domain entity models for BoxOffice. Every struct in this crate
//! represents a database table row or a domain value object. Entities are
//! flat records keyed by id; navigation between them happens through
//! repository calls, never through embedded object graphs. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod booking;
pub mod event;
pub mod hold;
pub mod seat;
