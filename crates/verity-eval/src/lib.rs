pub mod dataset;
pub mod report;
pub mod responder;
pub mod runner;
pub mod score;

pub mod prelude {
    pub use crate::dataset::{Dataset, EvalCase};
    pub use crate::report::write_report;
    pub use crate::responder::{KeywordResponder, KeywordRule, Responder};
    pub use crate::runner::{EvalRunner, SuiteResults, SuiteSummary};
    pub use crate::score::{EvalResult, score_case};
}
