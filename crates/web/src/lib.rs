//! Browser front-end: the prompt is served from a loopback port and the
//! answer comes back as a single GET request.

pub mod page;
pub mod server;

pub use server::{RunningDialog, WebDialog};
