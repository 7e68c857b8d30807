// Device Authorization Portal - ui/panels/mod.rs

pub mod admin;
pub mod confirm;
pub mod request_form;
