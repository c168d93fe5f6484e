pub mod odata;

pub use odata::ODataGateway;
