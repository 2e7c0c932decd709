pub mod system_controller;
pub mod text_controller;
