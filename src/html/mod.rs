pub mod command;
pub mod dom;
pub mod error;
pub mod events;
pub mod flyweight;
pub mod render;
pub mod traversal;
