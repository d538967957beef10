mod command;
mod observe;
mod query;

pub use self::command::{ProductCommandService, ProductCommandServiceDeps};
pub use self::observe::ServiceObserver;
pub use self::query::ProductQueryService;
