mod client;

pub use client::{namespace, VectorIndexClient, VectorRecord};
