pub mod clients;
pub mod config;
pub mod decision;
pub mod dispatcher;
pub mod ledger;
pub mod models;
pub mod phone;
pub mod template;
pub mod utils;
