//! Job board engine: search client, poll timer and the runtime bridging them
//! to the synchronous host loop.
mod engine;
mod search;
mod timer;
mod types;

pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use search::{JobSearchService, ReqwestJobSearch, SearchSettings};
pub use timer::PollTimer;
pub use types::{
    EngineEvent, FailureKind, JobRecord, RequestId, SearchError, SearchPage, SearchRequest,
};
