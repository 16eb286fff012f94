//! Storefront configuration: the `[logging]`, `[http]`, `[database]` and
//! `[catalog]` tables of `data/configuration.toml`.
//!
//! Start with [`Configuration::load_from_default_path`] or [`Configuration::load_from_path`].
//!
//! # Internals
//! The TOML file is first deserialized into `UnresolvedConfiguration`, whose
//! tables mirror the file. Resolving it (`try_resolve_with_context`) checks
//! what serde alone cannot, such as tracing filters that must parse as an
//! `EnvFilter` or a validation status code that must be a 4xx,
//! and yields a [`Configuration`].

#![allow(rustdoc::private_intra_doc_links)]

mod error;
mod structure;
mod traits;
mod utilities;

pub use error::*;
pub use structure::*;
