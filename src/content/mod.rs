//! Content module - typed entities and the read layer over the content store

pub mod access;
mod model;
pub mod sort;

pub use access::{ContentAccess, FetchError, Operation};
pub use model::{
    parse_timestamp, Author, AuthorMetadata, Category, CategoryMetadata, ContentObject,
    ImageAsset, Kind, Post, PostMetadata,
};
