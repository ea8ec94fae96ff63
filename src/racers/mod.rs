pub mod events;
pub mod handlers;
pub mod message_types;
pub mod models;
pub mod responses;
pub mod tracker;
#[cfg(test)]
mod tests;
