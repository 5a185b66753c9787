pub mod clock;
pub mod dispatch;
pub mod ledger;
pub mod policy;
pub mod scheduler;
