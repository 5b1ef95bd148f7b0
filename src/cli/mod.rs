pub mod compare;
pub mod compute;
pub mod sensitivity;
pub mod setup;
pub mod ui;
