pub mod canned_acl;
pub mod destination;
pub mod human_bytes;
pub mod metadata;
pub mod url;
