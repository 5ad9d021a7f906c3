pub mod form;
pub mod list;
pub mod notification;

pub use self::form::{FormState, OrderFormController, SubmitOutcome};
pub use self::list::{DeleteOutcome, OrderDraft, OrderListController, SaveOutcome};
pub use self::notification::{Notification, Severity};
