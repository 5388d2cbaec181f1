mod border;
mod radio_button;
mod stack_panel;
mod tab_control;
mod text_block;

pub use border::*;
pub use radio_button::*;
pub use stack_panel::*;
pub use tab_control::*;
pub use text_block::*;
