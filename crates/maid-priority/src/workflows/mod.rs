pub mod distribution;
pub mod intake;
pub mod ledger;
pub mod operations;
pub mod priorities;
