//! Pay Matrix View
//!
//! Loads a matrix from a [`DocumentStore`](paymatrix_store::DocumentStore),
//! pivots it into a grade x scale grid and edits one level at a time.
//!
//! # Components
//!
//! - [`MatrixLoader`]: list then per-level fetch with bounded concurrency
//! - [`render_html`] / [`render_text`]: grid projections
//! - [`LevelEditor`]: validated create, full-replace update, two-step delete
//! - [`LevelDialog`]: owned dialog state with a submission guard
//! - [`PayMatrixView`]: ties the above together and turns every error into a
//!   [`Notice`]
//!
//! # Example
//!
//! ```rust,ignore
//! use paymatrix_view::{PayMatrixView, ViewConfig};
//!
//! let mut view = PayMatrixView::new(store, Some(matrix)).with_config(ViewConfig::default());
//! view.refresh().await?;
//!
//! let mut dialog = view.open_create_dialog()?;
//! dialog.set_grade("3")?;
//! dialog.rows_mut()?.push("1", "8000");
//! let notice = view.submit(&mut dialog).await;
//! println!("{}", view.text());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod config;
mod dialog;
mod editor;
mod error;
mod loader;
mod notice;
mod render;
mod view_model;

pub use config::ViewConfig;
pub use dialog::{
    allowed_transitions, validate_transition, DialogMode, DialogSchema, DialogState, FieldKind,
    FieldSchema, LevelDialog, PairRows,
};
pub use editor::{DeleteRequest, EditOutcome, LevelEditor, DELETE_PROMPT};
pub use error::{ConfigError, DialogError, ViewError};
pub use loader::MatrixLoader;
pub use notice::{Indicator, Notice};
pub use render::{render_html, render_text, NO_DATA};
pub use view_model::PayMatrixView;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
