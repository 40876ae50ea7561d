//! `hr-route`: path planning between track endpoints.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`planner`]   | `PathPlanner` trait, `AStarPlanner`, `Route`, scratch     |
//! | [`obstacles`] | `Obstacles` predicate, `NoObstacles`, `FootprintMap`      |
//! | [`error`]     | `RouteError`, `RouteResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `PathRequest`.       |

pub mod error;
pub mod obstacles;
pub mod planner;

#[cfg(test)]
mod tests;

pub use error::{RouteError, RouteResult};
pub use obstacles::{FootprintMap, NoObstacles, Obstacles};
pub use planner::{AStarPlanner, PathPlanner, PathRequest, Route, SearchScratch};
