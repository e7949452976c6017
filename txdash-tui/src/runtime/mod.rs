mod event_loop;
mod fetch;
mod poller;
mod views;

pub use event_loop::run_app;
