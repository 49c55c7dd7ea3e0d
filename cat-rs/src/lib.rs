//! # cat-rs
//!
//! `cat-rs` is a pure Rust reader and extractor for Egosoft's cat/dat archive
//! format, as shipped by X4: Foundations and its expansions.
//! It enables listing and extracting files from the game's data archives.
//!
//! ## Features
//! - Parse `.cat` catalog files and derive entry offsets
//! - Resolve patch and DLC layering across ordered archive pairs
//! - Extract files by extension, byte for byte (the format stores raw data)
//! - Discover official expansion archives under `extensions/`
//!
//! ## Usage
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! cat-rs = "0.1"
//! ```
//!
//! ### Example: Listing and Extracting Files
//! ```rust,no_run
//! use cat_rs::cat_storage::{CatStorage, StorageOptions};
//! use cat_rs::extension_filter::ExtensionFilter;
//! use cat_rs::extractor::Extractor;
//!
//! // Open a game directory (containing 01.cat/01.dat, 02.cat/02.dat, ...)
//! let storage = CatStorage::open("path/to/X4 Foundations", &StorageOptions::default()).unwrap();
//!
//! // List all resolved files
//! for (_, entry) in storage.files() {
//!     println!("File: {} ({} bytes)", entry.path, entry.size);
//! }
//!
//! // Extract all xml files
//! let filter = ExtensionFilter::new(["xml"]);
//! let summary = Extractor::new(filter).run(&storage, "output").unwrap();
//! println!("extracted {} files", summary.extracted);
//! ```

pub mod cat_entry;
pub mod cat_index;
pub mod cat_storage;
pub mod error;
pub mod expansion;
pub mod extension_filter;
pub mod extractor;
