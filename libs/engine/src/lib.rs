pub mod args;
pub mod context;
pub mod decode;
pub mod engine;
pub mod error;
pub mod gapfiller;
pub mod retry;
pub mod source {
    pub mod filter;
    pub mod handle;
    pub mod log;
    #[cfg(any(test, feature = "test-utils"))]
    pub mod memory;
}
pub mod live {
    pub mod pubsub {
        pub mod publisher;
        pub mod subscriber;
    }
    pub mod state {
        pub mod event;
        pub mod logic;
    }
}
