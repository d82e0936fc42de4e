pub mod analysis;
pub mod patient;
pub mod range_query;
pub mod record;
pub mod record_type;
pub mod result_set;
pub mod retrieval;
pub mod timefmt;

pub use analysis::{
    AnalysisKind, AnalysisOutcome, AnalysisRequest, DedupGroup, DedupReport, GroupCount,
    RecordListing, Spike, SpikeReport, SubTypeCount, Summary, TypeBreakdown,
};
pub use patient::PatientId;
pub use range_query::RangeQuery;
pub use record::{ActivityRecord, Stream};
pub use record_type::RecordType;
pub use result_set::CachedResultSet;
pub use retrieval::RetrievalReport;
