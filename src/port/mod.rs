//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points of the pipeline. Adapters implement them
//! to integrate with the bazaar API, snapshot files and the SQLite store.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │  Quote  │            │   Recipe    │              │  Profit   │
//! │ Sources │            │    Store    │              │   Store   │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```

pub mod outbound;
