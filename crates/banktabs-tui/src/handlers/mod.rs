pub mod slot_handlers;
pub mod tab_handlers;
