// Client capabilities.
//
// A `MistClient` is parameterized by one of these markers. Only
// `MistClient<ReadWrite>` has `create`, `update` and `delete`, so a client
// built for reporting can never issue a mutating request.

mod sealed {
    pub trait Sealed {}
}

/// Capability marker carried by [`MistClient`](crate::MistClient).
///
/// Sealed: the only implementors are [`ReadOnly`] and [`ReadWrite`].
pub trait Access: sealed::Sealed + Send + Sync + 'static {
    /// Short label used in logs.
    const LABEL: &'static str;
}

/// GET only. The default capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnly;

/// GET, POST, PUT and DELETE.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadWrite;

impl sealed::Sealed for ReadOnly {}
impl sealed::Sealed for ReadWrite {}

impl Access for ReadOnly {
    const LABEL: &'static str = "read-only";
}

impl Access for ReadWrite {
    const LABEL: &'static str = "read-write";
}
