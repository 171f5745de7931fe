//! Algoscope Vis
//!
//! HTTP and WebSocket boundary for the visualizer pages.
//!
//! Each page (sorting, searching, trees, graphs) owns the structure the
//! learner is editing and a playback controller replaying traces of it.
//! Builder routes edit the structure and invalidate the trace; playback
//! routes drive the controller, regenerating the trace on demand. A
//! WebSocket per page streams every status change as JSON.
//!
//! Stack and queue pages have no trace; their routes apply one operation
//! and return the contents and operation history.

mod config;
mod error;
mod pages;
mod server;

pub use config::{PageDelays, VisConfig};
pub use error::{ApiError, ApiJson, ApiResult};
pub use pages::{
    Control, GraphPage, GraphView, Page, PageModel, PageResponse, PageSlot, SearchingPage,
    SearchingView, SortingPage, SortingView, SpeedSetting, TreeNodeView, TreePage, TreeView,
};
pub use server::{AppState, VisServer};
