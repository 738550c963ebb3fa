pub mod activity;
pub mod antenna;
pub mod contribution;
pub mod contribution_payment;
pub mod document;
pub mod enums;
pub mod event;
pub mod payment;
pub mod project;
pub mod project_suggest;
pub mod quota_setting;
pub mod user;
pub mod vote;

pub use enums::*;

pub use activity::Entity as Activity;
pub use antenna::Entity as Antenna;
pub use contribution::Entity as Contribution;
pub use contribution_payment::Entity as ContributionPayment;
pub use document::Entity as Document;
pub use event::Entity as Event;
pub use payment::Entity as Payment;
pub use project::Entity as Project;
pub use project_suggest::Entity as ProjectSuggest;
pub use quota_setting::Entity as QuotaSetting;
pub use user::Entity as User;
pub use vote::Entity as Vote;
