pub mod dom_driver;

pub use dom_driver::{DomDriver, FrameDriver};
