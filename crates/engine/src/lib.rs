//! Ordering core of the menu planner.
//!
//! The crate holds the validated menu [`Catalog`] and the two selection
//! stores the front end mutates:
//!
//! - [`SelectionStore`]: a plain cart, totals recomputed on every change;
//! - [`LimitedSelectionStore`]: a package cart where each category has a free
//!   allowance and extra units are billed as add-ons.
//!
//! Stores are plain values owned by the caller. All their mutations go through
//! a single `dispatch` method, so the allocation pass and the totals can never
//! fall out of sync with the selection list.

pub use catalog::{Catalog, DietaryTag, MenuCategory, MenuItem};
pub use currency::Currency;
pub use customer::{CustomerInfo, CustomerIssue};
pub use error::EngineError;
pub use import::{SheetFormat, guess_category, import_csv, import_xlsx, standard_categories};
pub use limits::{
    AllocationTotals, CategoryLimit, CategoryUsage, LimitedAction, LimitedSelection,
    LimitedSelectionStore, allocate, default_category_limits,
};
pub use loader::{CatalogLoader, CatalogState};
pub use money::MoneyCents;
pub use selection::{Selection, SelectionAction, SelectionStore};
pub use validation::{CatalogValidation, validate_menu_data};

mod catalog;
mod currency;
mod customer;
mod error;
mod import;
mod limits;
mod loader;
pub mod money;
mod selection;
mod util;
mod validation;

pub type ResultEngine<T> = Result<T, EngineError>;
