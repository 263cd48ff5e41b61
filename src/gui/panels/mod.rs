pub mod inputs;
pub mod menu_bar;
pub mod viewport;
