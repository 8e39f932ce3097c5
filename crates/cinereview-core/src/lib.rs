pub mod aggregate;
pub mod detail;
pub mod list;
pub mod notify;
pub mod validate;

pub use aggregate::{aggregate, aggregate_by_movie, Aggregate};
pub use detail::{DetailController, DetailPage, DetailState, SubmitOutcome};
pub use list::{ListController, ListEntry, ListPage, ListState};
pub use notify::{Notifier, SilentNotifier};
pub use validate::{NormalizedReview, ReviewDraft, ValidationError, MAX_NAME_LEN, MAX_TEXT_LEN, MIN_TEXT_LEN};
