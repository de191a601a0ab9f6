mod dispatcher;
mod input_event;

pub use dispatcher::*;
pub use input_event::*;
