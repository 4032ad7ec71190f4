pub mod batch;
pub mod form;
pub mod input;
pub mod message;
pub mod output;
pub mod projector;
pub mod scheme;
