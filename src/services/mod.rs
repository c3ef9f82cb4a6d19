pub mod address_search;
pub mod keep_alive;

pub use address_search::AddressSearchFlow;
