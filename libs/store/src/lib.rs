pub mod client;
pub mod projection;
pub mod utils;
pub mod checkpoint {
    pub mod model;
    pub mod store;
}
pub mod prescription {
    pub mod adapter;
    pub mod model;
    pub mod store;
}
pub mod batch {
    pub mod adapter;
    pub mod model;
    pub mod store;
}
