//! A bit-exact codec for a classic transport-sim's savegame format.
//!
//! Layers, leaf to root:
//! - [`io`]: minimal byte source/sink traits with short-read/short-write
//!   detection, blanket-implemented over `std::io::Read`/`std::io::Write`.
//! - [`checksum`]: the title checksum and the rolling body checksum.
//! - [`payload`]: little-endian primitive reads/writes and boolean packing
//!   over the decompressed field buffer.
//! - [`rle`]: the run-length codec wrapping the primitive layer.
//! - [`tiles`]: the tile-plane pack/unpack transform.
//! - [`model`]: the [`Savegame`] aggregate and its validation rules.
//! - `save`/`load`: inherent methods on [`Savegame`] implementing the
//!   structural codec (see `save.rs`/`load.rs`).

pub mod checksum;
pub mod error;
pub mod io;
pub mod layout;
pub mod load;
pub mod model;
pub mod payload;
pub mod rle;
pub mod save;
pub mod tiles;

pub use error::Error;
pub use io::{Reader, Writer};
pub use model::{Company, Depot, Savegame, TextEffect, Tile, Town};
