mod acl;
mod retry;
mod tracing;
mod transfer;
