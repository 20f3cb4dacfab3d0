// Domain layer - Pure signal values and mapping tables
pub mod aspect;
pub mod frame;
pub mod readout;
pub mod selection;
pub mod speed;
