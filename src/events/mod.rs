//! # Events Module
//!
//! Progress events emitted by the pipeline.
//!
//! Workers push events through a crossbeam channel; the CLI (or any other
//! front end) drains them on its own thread to drive a progress bar and
//! per-record status lines.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Record(RecordEvent::Completed(p)) = event {
//!             println!("{}/{} {}", p.completed, p.total, p.outcome.id);
//!         }
//!     }
//! });
//!
//! pipeline.run_with_events(&records, &sender);
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
