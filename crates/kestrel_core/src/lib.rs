//! Kestrel Core
//!
//! Host-framework primitives shared by the Kestrel crates:
//!
//! - **Colors**: RGBA colors and light/dark color pairs
//! - **View containment**: a lightweight view tree answering "is X inside Y"
//! - **Dispatch**: a UI-thread task queue for work deferred to the next turn
//!
//! # Example
//!
//! ```rust
//! use kestrel_core::dispatch;
//! use kestrel_core::view::{Containment, ViewTree};
//!
//! let mut tree = ViewTree::new();
//! let window = tree.insert_root();
//! let button = tree.insert_child(window).unwrap();
//! assert!(tree.is_descendant(button, window));
//!
//! dispatch::dispatch_async(|| println!("runs on the next turn"));
//! assert_eq!(dispatch::run_until_idle(), 1);
//! ```

pub mod color;
pub mod dispatch;
pub mod view;

pub use color::{Color, ColorScheme, DynamicColor};
pub use view::{Containment, ViewError, ViewId, ViewTree};
