//! Lazy, composable sequence combinators.
//!
//! A source is wrapped in a handle, [`Seq`] for iterators or [`AsyncSeq`]
//! for streams. Intermediate operations (`map`, `filter`, `zip`, `repeat`,
//! ...) return new handles without pulling anything; terminal operations
//! (`collect`, `fold`, `any`, `first`, ...) drive the pipeline one element at
//! a time and stop as soon as their result is known.
//!
//! # Feature Flags
//!
//! - `futures` (default): [`AsyncSeq`] and the stream adapters
//! - `tokio`: `from_receiver` for `tokio::sync::mpsc` channels
//! - `fuzz`: `arbitrary::Arbitrary` for [`SeqConfig`]

pub mod config;
mod cycle;
mod error;
pub mod generators;
mod iter;
mod seq;

#[cfg(feature = "futures")]
pub mod async_seq;

pub use config::SeqConfig;
pub use error::Error;
pub use generators::{ascending, descending};
pub use seq::{Seq, wrap, wrap_with_config};

#[cfg(feature = "futures")]
pub use async_seq::{AsyncSeq, Next, wrap_async, wrap_async_with_config};
#[cfg(feature = "futures")]
pub use generators::{ascending_async, descending_async};
#[cfg(feature = "tokio")]
pub use async_seq::tokio_impl::from_receiver;
