pub mod background;
pub mod canvas;
pub mod color;
pub mod icon_gen;
pub mod manifest;
pub mod pin;
