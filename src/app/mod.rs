//! Application layer with dependency injection container.
//!
//! The container owns the infrastructure (move log, predictor store) and
//! hands domain objects the ports they need.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           Application Layer (app)           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │          App (DI Container)          │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ owns                      │
//! │                 ▼                           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Infrastructure (adapters)           │   │
//! │  │  - CsvMoveLog / InMemoryMoveLog      │   │
//! │  │  - MsgPackPredictorStore             │   │
//! │  │  - InMemoryPredictorStore            │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ implements                │
//! │                 ▼                           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Domain Ports (ports)                │   │
//! │  │  - MoveLog, PredictorStore           │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ used by                   │
//! │                 ▼                           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Domain Logic                        │   │
//! │  │  - GameSession                       │   │
//! │  │  - Trainer                           │   │
//! │  └──────────────────────────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ## Production
//!
//! ```no_run
//! use triki::app::{App, AppConfig};
//!
//! let app = App::from_config(&AppConfig::default());
//! let mut session = app.new_session()?;
//! session.play_player_move(4)?;
//! # Ok::<(), triki::Error>(())
//! ```
//!
//! ## Testing
//!
//! ```
//! use triki::app::App;
//! use triki::adapters::InMemoryMoveLog;
//!
//! let app = App::for_testing()
//!     .with_move_log(InMemoryMoveLog::new())
//!     .with_default_seed(42)
//!     .build();
//! ```

pub mod config;
pub mod container;

pub use config::AppConfig;
pub use container::{App, AppBuilder};
