//! Seating plan data model

pub mod area;
pub mod geometry;
pub mod guest;
pub mod hall;
pub mod lock;
pub mod seat;
pub mod table;

pub use area::{Area, AreaKind, AreaUpdate};
pub use geometry::{Bounds, Footprint, Point};
pub use guest::{
    AssignmentRef, Dietary, ExtensionMap, ExtensionMapFull, Guest, GuestAttributes, GuestSide,
};
pub use hall::{HallSize, PlanMode};
pub use lock::{EditorIdentity, LockEvent, LockResourceType, ResourceLock};
pub use seat::Seat;
pub use table::{Table, TableCreate, TableShape, TableSize, TableUpdate};
