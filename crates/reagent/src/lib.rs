pub mod action;
pub mod agent;
pub mod conversation;
pub mod errors;
pub mod models;
pub mod prompt_template;
pub mod providers;
pub mod react;
pub mod tools;
