pub mod automate;
pub mod countries;
pub mod health;
pub mod posts;
