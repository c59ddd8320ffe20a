// Core utilities shared by the engine and the document layer

pub mod math;
